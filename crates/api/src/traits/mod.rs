//! Traits at the seams between the primitives and their callers

pub mod barrier;
pub mod magic;
pub mod spec_ctrl;

pub use barrier::SpeculationBarrier;
pub use magic::SpecMagic;
pub use spec_ctrl::SpeculationControl;
