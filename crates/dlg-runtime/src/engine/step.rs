use dlg_core::{Command, DialogueError, DialogueEvent, DialogueResponse};

use super::interpolate::interpolate;
use super::{DialogueEngine, RunState};

impl DialogueEngine {
    /// Drains queued commands until a suspension boundary (page break,
    /// empty stack) and returns the notifications produced along the
    /// way. No-op unless the engine is `Running`.
    pub fn step(&mut self) -> Result<Vec<DialogueEvent>, DialogueError> {
        if self.run_state != RunState::Running {
            return Ok(Vec::new());
        }
        self.drain()
    }

    pub(super) fn drain(&mut self) -> Result<Vec<DialogueEvent>, DialogueError> {
        let mut events = Vec::new();
        let mut response = DialogueResponse::default();

        while self.run_state == RunState::Running {
            let Some(command) = self.stack.pop_front() else {
                if self.pending_choices.is_empty() {
                    self.run_state = RunState::Finished;
                    events.push(DialogueEvent::Ended);
                } else {
                    self.run_state = RunState::Suspended;
                }
                break;
            };
            if let Err(error) = self.dispatch(command, &mut events, &mut response) {
                // A bad jump target or a failed condition stops the run
                // rather than guessing at a continuation.
                self.run_state = RunState::Finished;
                return Err(error);
            }
        }

        events.push(DialogueEvent::Response(response));
        Ok(events)
    }

    fn dispatch(
        &mut self,
        command: Command,
        events: &mut Vec<DialogueEvent>,
        response: &mut DialogueResponse,
    ) -> Result<(), DialogueError> {
        match command {
            Command::Root { children } | Command::Bracket { children } => {
                self.splice_front(children);
            }
            Command::Signal { payload } => {
                events.push(DialogueEvent::Signal { payload });
            }
            Command::DisplayText { text } => {
                let state = self.state_ref()?;
                response.texts.push(interpolate(&text, &state.borrow()));
            }
            Command::PageBreak => {
                self.run_state = RunState::Suspended;
            }
            Command::Prompt { text, children } => {
                // Continuations left over from an earlier page (resume
                // without a choice) would misalign the table against
                // this response's choice indices.
                if response.choices.is_empty() && !self.pending_choices.is_empty() {
                    self.pending_choices.clear();
                }
                let state = self.state_ref()?;
                response.choices.push(interpolate(&text, &state.borrow()));
                self.pending_choices.push(children);
            }
            Command::Goto { target } => {
                self.jump_to(&target)?;
            }
            Command::Conditional {
                when_expr,
                children,
            }
            | Command::Elif {
                when_expr,
                children,
            } => {
                if self.eval_condition(&when_expr)? {
                    self.prune_chain_front();
                    self.splice_front(children);
                }
            }
            Command::Else { children } => {
                self.splice_front(children);
            }
        }
        Ok(())
    }

    /// Terminating jump: the rest of the queued work is discarded and
    /// the target node's full command sequence takes its place. The
    /// stack is untouched if the target is missing.
    fn jump_to(&mut self, target: &str) -> Result<(), DialogueError> {
        let tree = self.tree_ref()?;
        let commands = tree.node(target).map(<[Command]>::to_vec).ok_or_else(|| {
            DialogueError::new(
                "ENGINE_NODE_NOT_FOUND",
                format!("Goto target \"{}\" is not present in the tree.", target),
            )
        })?;
        self.stack.clear();
        self.stack.extend(commands);
        Ok(())
    }

    /// Drops the contiguous Elif/Else entries sitting at the front of
    /// the remaining stack, i.e. the rest of the chain a matched
    /// branch suppresses. Entries further down are left alone.
    fn prune_chain_front(&mut self) {
        while matches!(
            self.stack.front(),
            Some(Command::Elif { .. } | Command::Else { .. })
        ) {
            self.stack.pop_front();
        }
    }

    /// Prepends a command's children ahead of the remaining work,
    /// preserving depth-first left-to-right order.
    pub(super) fn splice_front(&mut self, children: Vec<Command>) {
        for command in children.into_iter().rev() {
            self.stack.push_front(command);
        }
    }

    fn eval_condition(&self, expr: &str) -> Result<bool, DialogueError> {
        let state = self.state_ref()?;
        let state = state.borrow();
        self.evaluator.eval_condition(expr, &state)
    }
}
