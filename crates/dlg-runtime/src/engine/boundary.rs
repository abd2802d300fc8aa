use std::mem;

use dlg_core::{DialogueError, DialogueEvent};

use super::{DialogueEngine, RunState};

impl DialogueEngine {
    /// Continues a suspended run. An in-bounds choice index splices
    /// the matching continuation ahead of all queued work and clears
    /// the pending table; out-of-bounds or absent indices resume
    /// straight execution with the table left untouched. No-op while
    /// already `Running` or after `Finished`.
    pub fn resume(&mut self, choice: Option<usize>) -> Result<Vec<DialogueEvent>, DialogueError> {
        match self.run_state {
            RunState::Idle => {
                return Err(DialogueError::new(
                    "ENGINE_NOT_STARTED",
                    "Cannot resume before start.",
                ));
            }
            RunState::Running | RunState::Finished => return Ok(Vec::new()),
            RunState::Suspended => {}
        }

        if let Some(index) = choice {
            if index < self.pending_choices.len() {
                let mut table = mem::take(&mut self.pending_choices);
                let continuation = table.swap_remove(index);
                self.splice_front(continuation);
            }
        }

        self.run_state = RunState::Running;
        self.drain()
    }
}
