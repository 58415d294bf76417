//! Speculation-control hooks implemented by collaborators
//!
//! The sanitizers do not decide which tasks need mitigation. A platform that
//! supports per-task control implements [`SpeculationControl`]; the task
//! state it reads and writes is the explicit `Task` value handed to every
//! call, never global state.

use crate::error::Result;
use crate::types::{SpecCtrlCommand, SpecCtrlSelector, SpecCtrlStatus};

/// Per-task speculation-control hooks
pub trait SpeculationControl {
    /// The task (or process) state the hooks operate on
    type Task;

    /// Read the current setting of `which` for `task`
    fn spec_ctrl_get(&self, task: &Self::Task, which: SpecCtrlSelector) -> Result<SpecCtrlStatus>;

    /// Change the setting of `which` for `task`
    fn spec_ctrl_set(
        &self,
        task: &mut Self::Task,
        which: SpecCtrlSelector,
        ctrl: SpecCtrlCommand,
    ) -> Result<()>;

    /// Apply the fixed mitigation profile used when `task` enters a strict
    /// sandboxing mode
    fn seccomp_mitigate(&self, task: &mut Self::Task);

    /// Decode a raw selector and call [`spec_ctrl_get`](Self::spec_ctrl_get)
    ///
    /// Returns the status bits, or a negative errno.
    fn spec_ctrl_get_raw(&self, task: &Self::Task, which: u64) -> i64 {
        match SpecCtrlSelector::try_from(which).and_then(|which| self.spec_ctrl_get(task, which)) {
            Ok(status) => status.bits() as i64,
            Err(e) => i64::from(e.errno()),
        }
    }

    /// Decode raw arguments and call [`spec_ctrl_set`](Self::spec_ctrl_set)
    ///
    /// Returns 0, or a negative errno.
    fn spec_ctrl_set_raw(&self, task: &mut Self::Task, which: u64, ctrl: u64) -> i64 {
        let decoded = SpecCtrlSelector::try_from(which)
            .and_then(|which| SpecCtrlCommand::try_from(ctrl).map(|ctrl| (which, ctrl)));
        match decoded.and_then(|(which, ctrl)| self.spec_ctrl_set(task, which, ctrl)) {
            Ok(()) => 0,
            Err(e) => i64::from(e.errno()),
        }
    }
}
