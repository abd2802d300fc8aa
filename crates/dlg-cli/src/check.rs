use std::collections::BTreeSet;
use std::fs;

use dlg_api::{parse_tree_from_json, resolve_entry_node};
use dlg_core::{Command, DialogueError, DialogueTree};

use crate::{map_cli_tree_read, CheckArgs};

/// Structural validation of a compiled tree: the entry node must
/// resolve and every goto target, however deeply nested, must name an
/// existing node.
pub(crate) fn run_check(args: CheckArgs) -> Result<i32, DialogueError> {
    let tree_json = fs::read_to_string(&args.tree).map_err(map_cli_tree_read)?;
    let tree = parse_tree_from_json(&tree_json)?;
    let entry_node = resolve_entry_node(&tree, args.entry)?;

    let missing = missing_goto_targets(&tree);
    if !missing.is_empty() {
        return Err(DialogueError::new(
            "CLI_CHECK_FAILED",
            format!("Unresolved goto targets: {}", missing.join(", ")),
        ));
    }

    println!("ok: entry \"{}\", {} nodes", entry_node, tree.nodes.len());
    Ok(0)
}

pub(crate) fn missing_goto_targets(tree: &DialogueTree) -> Vec<String> {
    let mut missing = BTreeSet::new();
    for commands in tree.nodes.values() {
        collect_missing_targets(tree, commands, &mut missing);
    }
    missing.into_iter().collect()
}

fn collect_missing_targets(
    tree: &DialogueTree,
    commands: &[Command],
    missing: &mut BTreeSet<String>,
) {
    for command in commands {
        if let Command::Goto { target } = command {
            if !tree.contains(target) {
                missing.insert(target.clone());
            }
        }
        if let Some(children) = command.children() {
            collect_missing_targets(tree, children, missing);
        }
    }
}
