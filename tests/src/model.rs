//! In-memory speculation-control collaborator
//!
//! `ModelSpecCtrl` implements the hooks over an explicit `ModelTask` value,
//! following the prctl rules a real platform applies: forced settings cannot
//! be relaxed, `DisableNoexec` is only meaningful for store bypass, and the
//! seccomp profile force-disables every controllable selector. It exists so
//! integration tests can drive the raw entry points end to end.

use nospec_api::{
    Error, Result, SpecCtrlCommand, SpecCtrlSelector, SpecCtrlStatus, SpeculationControl,
};
use nospec_params::prctl::PR_SPEC_SELECTOR_COUNT;

/// Per-selector state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    /// The platform is not affected; nothing to control
    NotAffected,
    /// Mitigation is fixed by boot configuration
    Fixed(SpecCtrlStatus),
    /// Mitigation follows the last accepted command
    Controlled(SpecCtrlCommand),
}

/// Explicit per-task state owned by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTask {
    states: [SelectorState; PR_SPEC_SELECTOR_COUNT],
}

impl ModelTask {
    /// A task whose every selector is controllable and currently enabled
    pub fn controllable() -> Self {
        Self {
            states: [SelectorState::Controlled(SpecCtrlCommand::Enable); PR_SPEC_SELECTOR_COUNT],
        }
    }

    pub fn with_state(mut self, which: SpecCtrlSelector, state: SelectorState) -> Self {
        self.states[Self::slot(which)] = state;
        self
    }

    pub fn state(&self, which: SpecCtrlSelector) -> SelectorState {
        self.states[Self::slot(which)]
    }

    /// Drop `DisableNoexec` settings, as an exec does
    pub fn exec(&mut self) {
        for state in self.states.iter_mut() {
            if *state == SelectorState::Controlled(SpecCtrlCommand::DisableNoexec) {
                *state = SelectorState::Controlled(SpecCtrlCommand::Enable);
            }
        }
    }

    fn slot(which: SpecCtrlSelector) -> usize {
        which.raw() as usize
    }
}

/// Hooks operating on [`ModelTask`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelSpecCtrl;

impl SpeculationControl for ModelSpecCtrl {
    type Task = ModelTask;

    fn spec_ctrl_get(&self, task: &ModelTask, which: SpecCtrlSelector) -> Result<SpecCtrlStatus> {
        Ok(match task.state(which) {
            SelectorState::NotAffected => SpecCtrlStatus::NOT_AFFECTED,
            SelectorState::Fixed(status) => status,
            SelectorState::Controlled(cmd) => SpecCtrlStatus::PRCTL | SpecCtrlStatus::from(cmd),
        })
    }

    fn spec_ctrl_set(
        &self,
        task: &mut ModelTask,
        which: SpecCtrlSelector,
        ctrl: SpecCtrlCommand,
    ) -> Result<()> {
        let current = match task.state(which) {
            SelectorState::NotAffected | SelectorState::Fixed(_) => {
                return Err(Error::NotControllable {
                    context: "spec_ctrl_set",
                })
            }
            SelectorState::Controlled(cmd) => cmd,
        };

        if current == SpecCtrlCommand::ForceDisable && !ctrl.disables_speculation() {
            return Err(Error::PermissionDenied {
                context: "spec_ctrl_set",
            });
        }
        if ctrl == SpecCtrlCommand::DisableNoexec && which != SpecCtrlSelector::StoreBypass {
            return Err(Error::OutOfRange {
                context: "spec_ctrl_set",
                value: ctrl.raw(),
            });
        }

        let next = if current == SpecCtrlCommand::ForceDisable {
            SpecCtrlCommand::ForceDisable
        } else {
            ctrl
        };
        log::debug!("{}: {:?} -> {:?}", which, current, next);
        task.states[ModelTask::slot(which)] = SelectorState::Controlled(next);
        Ok(())
    }

    fn seccomp_mitigate(&self, task: &mut ModelTask) {
        for which in [SpecCtrlSelector::StoreBypass, SpecCtrlSelector::IndirectBranch] {
            if let SelectorState::Controlled(_) = task.state(which) {
                task.states[ModelTask::slot(which)] =
                    SelectorState::Controlled(SpecCtrlCommand::ForceDisable);
            }
        }
    }
}
