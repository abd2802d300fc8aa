use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use dlg_core::{Command, DialogueError, DialogueTree, StateMap};

mod boundary;
mod eval;
mod interpolate;
mod step;

pub use self::eval::{ConditionEvaluator, RhaiConditionEvaluator};
pub use self::interpolate::interpolate;

/// Lifecycle of one dialogue session. `Finished` is terminal for the
/// session but the engine object may be restarted with a new tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Suspended,
    Finished,
}

#[derive(Default)]
pub struct DialogueEngineOptions {
    pub evaluator: Option<Box<dyn ConditionEvaluator>>,
}

/// The command-stack interpreter. Owns its execution stack and
/// pending-choice table exclusively; the tree is shared read-only and
/// the state mapping stays caller-owned, borrowed per drain.
pub struct DialogueEngine {
    evaluator: Box<dyn ConditionEvaluator>,
    tree: Option<Rc<DialogueTree>>,
    state: Option<Rc<RefCell<StateMap>>>,
    stack: VecDeque<Command>,
    pending_choices: Vec<Vec<Command>>,
    run_state: RunState,
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new(DialogueEngineOptions::default())
    }
}

impl DialogueEngine {
    pub fn new(options: DialogueEngineOptions) -> Self {
        Self {
            evaluator: options
                .evaluator
                .unwrap_or_else(|| Box::new(RhaiConditionEvaluator)),
            tree: None,
            state: None,
            stack: VecDeque::new(),
            pending_choices: Vec::new(),
            run_state: RunState::Idle,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn pending_choice_count(&self) -> usize {
        self.pending_choices.len()
    }

    /// (Re)initializes the session: loads the entry node's command
    /// sequence, clears pending choices, binds tree and state, and
    /// transitions to `Running`. A missing entry node fails before any
    /// engine state is touched.
    pub fn start(
        &mut self,
        tree: Rc<DialogueTree>,
        entry_node: &str,
        state: Rc<RefCell<StateMap>>,
    ) -> Result<(), DialogueError> {
        let commands = tree
            .node(entry_node)
            .map(<[Command]>::to_vec)
            .ok_or_else(|| {
                DialogueError::new(
                    "ENGINE_NODE_NOT_FOUND",
                    format!("Entry node \"{}\" is not present in the tree.", entry_node),
                )
            })?;
        self.stack = VecDeque::from(commands);
        self.pending_choices.clear();
        self.tree = Some(tree);
        self.state = Some(state);
        self.run_state = RunState::Running;
        Ok(())
    }

    fn tree_ref(&self) -> Result<Rc<DialogueTree>, DialogueError> {
        self.tree.clone().ok_or_else(|| {
            DialogueError::new("ENGINE_NOT_STARTED", "No tree is bound; call start first.")
        })
    }

    fn state_ref(&self) -> Result<Rc<RefCell<StateMap>>, DialogueError> {
        self.state.clone().ok_or_else(|| {
            DialogueError::new(
                "ENGINE_NOT_STARTED",
                "No state mapping is bound; call start first.",
            )
        })
    }
}
