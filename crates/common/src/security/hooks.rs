//! Default speculation-control hooks
//!
//! Platforms that implement no per-task control use [`UnsupportedSpecCtrl`]:
//! every read or write is refused with `InvalidArgument` and the seccomp
//! mitigation does nothing. The task value is never touched.

use core::fmt;
use core::marker::PhantomData;

use nospec_api::{
    Error, Result, SpecCtrlCommand, SpecCtrlSelector, SpecCtrlStatus, SpeculationControl,
};

/// Control hooks for a platform without per-task speculation control
pub struct UnsupportedSpecCtrl<T = ()> {
    _task: PhantomData<fn(&mut T)>,
}

impl<T> UnsupportedSpecCtrl<T> {
    /// Hooks for tasks of type `T`
    pub const fn new() -> Self {
        Self { _task: PhantomData }
    }
}

impl<T> Default for UnsupportedSpecCtrl<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for UnsupportedSpecCtrl<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for UnsupportedSpecCtrl<T> {}

impl<T> fmt::Debug for UnsupportedSpecCtrl<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UnsupportedSpecCtrl")
    }
}

impl<T> SpeculationControl for UnsupportedSpecCtrl<T> {
    type Task = T;

    fn spec_ctrl_get(&self, _task: &T, which: SpecCtrlSelector) -> Result<SpecCtrlStatus> {
        log::debug!("speculation control get({}) refused: not implemented on this platform", which);
        Err(Error::InvalidArgument {
            context: "spec_ctrl_get",
        })
    }

    fn spec_ctrl_set(&self, _task: &mut T, which: SpecCtrlSelector, ctrl: SpecCtrlCommand) -> Result<()> {
        log::debug!(
            "speculation control set({}, {:?}) refused: not implemented on this platform",
            which,
            ctrl
        );
        Err(Error::InvalidArgument {
            context: "spec_ctrl_set",
        })
    }

    fn seccomp_mitigate(&self, _task: &mut T) {
        log::trace!("seccomp speculation mitigation: nothing to apply");
    }
}
