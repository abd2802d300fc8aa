use std::cell::RefCell;
use std::rc::Rc;

use dlg_core::{DialogueError, DialogueTree, StateMap};
use dlg_runtime::{ConditionEvaluator, DialogueEngine, DialogueEngineOptions};

/// Node name used when the caller does not name an entry point.
pub const DEFAULT_ENTRY_NODE: &str = "start";

pub struct CreateEngineOptions {
    pub tree_json: String,
    pub state_json: Option<String>,
    pub entry_node: Option<String>,
    pub evaluator: Option<Box<dyn ConditionEvaluator>>,
}

/// A running dialogue session plus the shared handles the host keeps:
/// the tree (shareable with further engines) and the state mapping
/// (mutable between steps).
pub struct StartedDialogue {
    pub engine: DialogueEngine,
    pub tree: Rc<DialogueTree>,
    pub state: Rc<RefCell<StateMap>>,
    pub entry_node: String,
}

impl std::fmt::Debug for StartedDialogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartedDialogue")
            .field("entry_node", &self.entry_node)
            .finish_non_exhaustive()
    }
}

pub fn parse_tree_from_json(tree_json: &str) -> Result<DialogueTree, DialogueError> {
    serde_json::from_str(tree_json).map_err(|error| {
        DialogueError::new("API_TREE_PARSE", format!("Tree json is invalid: {}", error))
    })
}

pub fn parse_state_from_json(state_json: &str) -> Result<StateMap, DialogueError> {
    serde_json::from_str(state_json).map_err(|error| {
        DialogueError::new(
            "API_STATE_PARSE",
            format!("State json is invalid: {}", error),
        )
    })
}

pub fn resolve_entry_node(
    tree: &DialogueTree,
    explicit: Option<String>,
) -> Result<String, DialogueError> {
    if let Some(entry) = explicit {
        if !tree.contains(&entry) {
            return Err(DialogueError::new(
                "API_ENTRY_NOT_FOUND",
                format!("Entry node \"{}\" is not present in the tree.", entry),
            ));
        }
        return Ok(entry);
    }

    if tree.contains(DEFAULT_ENTRY_NODE) {
        return Ok(DEFAULT_ENTRY_NODE.to_string());
    }

    Err(DialogueError::new(
        "API_ENTRY_NOT_FOUND",
        format!(
            "Expected a node named \"{}\" as default entry.",
            DEFAULT_ENTRY_NODE
        ),
    ))
}

/// Parses the compiled tree and optional state, resolves the entry
/// node, and returns an engine already transitioned to `Running`.
pub fn create_engine_from_json(
    options: CreateEngineOptions,
) -> Result<StartedDialogue, DialogueError> {
    let tree = Rc::new(parse_tree_from_json(&options.tree_json)?);
    let state = match options.state_json {
        Some(state_json) => parse_state_from_json(&state_json)?,
        None => StateMap::new(),
    };
    let state = Rc::new(RefCell::new(state));
    let entry_node = resolve_entry_node(&tree, options.entry_node)?;

    let mut engine = DialogueEngine::new(DialogueEngineOptions {
        evaluator: options.evaluator,
    });
    engine.start(Rc::clone(&tree), &entry_node, Rc::clone(&state))?;

    Ok(StartedDialogue {
        engine,
        tree,
        state,
        entry_node,
    })
}
