use std::io::Cursor;

use dlg_api::{create_engine_from_json, CreateEngineOptions};
use dlg_core::{Command, DialogueTree};
use dlg_runtime::DialogueEngine;

use crate::check::missing_goto_targets;
use crate::play::run_play_with_io;

const SCENARIO_TREE: &str = r#"
{
  "nodes": {
    "start": [
      { "kind": "displayText", "text": "Hi" },
      { "kind": "prompt", "text": "Go?", "children": [ { "kind": "goto", "target": "end" } ] },
      { "kind": "pageBreak" }
    ],
    "end": [
      { "kind": "signal", "payload": "door:open" },
      { "kind": "displayText", "text": "Bye" }
    ]
  }
}
"#;

fn engine_from_json(tree_json: &str) -> DialogueEngine {
    create_engine_from_json(CreateEngineOptions {
        tree_json: tree_json.to_string(),
        state_json: None,
        entry_node: None,
        evaluator: None,
    })
    .expect("engine should build")
    .engine
}

#[test]
fn play_transcript_covers_choice_signal_and_end() {
    let mut engine = engine_from_json(SCENARIO_TREE);
    let mut reader = Cursor::new(b"0\n".to_vec());
    let mut out = Vec::new();

    let code =
        run_play_with_io(&mut engine, &mut reader, &mut out).expect("play loop should pass");
    assert_eq!(code, 0);

    let transcript = String::from_utf8(out).expect("transcript should be utf8");
    assert!(transcript.contains("Hi\n"));
    assert!(transcript.contains("  [0] Go?\n"));
    assert!(transcript.contains("[signal] door:open\n"));
    assert!(transcript.contains("Bye\n"));
    assert!(transcript.ends_with("[END]\n"));
}

#[test]
fn play_waits_for_an_empty_line_on_plain_page_breaks() {
    let tree_json = r#"
{
  "nodes": {
    "start": [
      { "kind": "displayText", "text": "one" },
      { "kind": "pageBreak" },
      { "kind": "displayText", "text": "two" }
    ]
  }
}
"#;
    let mut engine = engine_from_json(tree_json);
    let mut reader = Cursor::new(b"\n".to_vec());
    let mut out = Vec::new();

    let code =
        run_play_with_io(&mut engine, &mut reader, &mut out).expect("play loop should pass");
    assert_eq!(code, 0);

    let transcript = String::from_utf8(out).expect("transcript should be utf8");
    assert!(transcript.contains("one\n"));
    assert!(transcript.contains("two\n"));
}

#[test]
fn play_rejects_non_numeric_choice_input() {
    let mut engine = engine_from_json(SCENARIO_TREE);
    let mut reader = Cursor::new(b"left\n".to_vec());
    let mut out = Vec::new();

    let error = run_play_with_io(&mut engine, &mut reader, &mut out)
        .expect_err("non-numeric choice should fail");
    assert_eq!(error.code, "CLI_CHOICE_PARSE");
}

#[test]
fn missing_goto_targets_walks_nested_children() {
    let mut tree = DialogueTree::new();
    tree.insert_node(
        "start",
        vec![Command::Prompt {
            text: "pick".to_string(),
            children: vec![Command::Conditional {
                when_expr: "true".to_string(),
                children: vec![Command::Goto {
                    target: "nowhere".to_string(),
                }],
            }],
        }],
    );

    assert_eq!(missing_goto_targets(&tree), vec!["nowhere".to_string()]);
}

#[test]
fn missing_goto_targets_accepts_resolvable_tree() {
    let mut tree = DialogueTree::new();
    tree.insert_node(
        "start",
        vec![Command::Goto {
            target: "end".to_string(),
        }],
    );
    tree.insert_node("end", vec![]);

    assert!(missing_goto_targets(&tree).is_empty());
}
