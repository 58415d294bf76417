//! Speculation barrier trait

/// A platform instruction that stops speculation past the call site
///
/// Implementations must not fail and must not be used as a memory-ordering
/// fence: the barrier only keeps a single instruction stream from running
/// ahead of unresolved branches.
pub trait SpeculationBarrier {
    /// Short name of the emitted sequence, for diagnostics
    const NAME: &'static str;

    /// Whether the implementation emits any instruction at all
    const EMITS_INSTRUCTION: bool;

    /// Emit the barrier
    fn barrier();
}
