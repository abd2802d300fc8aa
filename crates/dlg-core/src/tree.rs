use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One tagged command of a compiled dialogue script. Commands owning
/// children form a tree; the interpreter copies children onto its
/// execution stack and never mutates the source tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Command {
    Root {
        children: Vec<Command>,
    },
    Signal {
        payload: String,
    },
    Bracket {
        children: Vec<Command>,
    },
    DisplayText {
        text: String,
    },
    PageBreak,
    Prompt {
        text: String,
        children: Vec<Command>,
    },
    Goto {
        target: String,
    },
    Conditional {
        when_expr: String,
        children: Vec<Command>,
    },
    Elif {
        when_expr: String,
        children: Vec<Command>,
    },
    Else {
        children: Vec<Command>,
    },
}

impl Command {
    /// Child commands spliced into execution when this command runs,
    /// if the variant carries any.
    pub fn children(&self) -> Option<&[Command]> {
        match self {
            Self::Root { children }
            | Self::Bracket { children }
            | Self::Prompt { children, .. }
            | Self::Conditional { children, .. }
            | Self::Elif { children, .. }
            | Self::Else { children } => Some(children),
            Self::Signal { .. } | Self::DisplayText { .. } | Self::PageBreak | Self::Goto { .. } => {
                None
            }
        }
    }
}

/// Compiled dialogue script: named nodes, each an ordered command
/// sequence. Built once by the external compiler and read-only for
/// the lifetime of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueTree {
    pub nodes: BTreeMap<String, Vec<Command>>,
}

impl DialogueTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, name: &str) -> Option<&[Command]> {
        self.nodes.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn insert_node(&mut self, name: impl Into<String>, commands: Vec<Command>) {
        self.nodes.insert(name.into(), commands);
    }
}
