use std::fs;
use std::io::{self, BufRead, Write};

use dlg_api::{create_engine_from_json, CreateEngineOptions};
use dlg_core::{DialogueError, DialogueEvent, DialogueResponse};
use dlg_runtime::DialogueEngine;

use crate::{map_cli_io, map_cli_state_read, map_cli_tree_read, PlayArgs};

pub(crate) fn run_play(args: PlayArgs) -> Result<i32, DialogueError> {
    let tree_json = fs::read_to_string(&args.tree).map_err(map_cli_tree_read)?;
    let state_json = match &args.state {
        Some(path) => Some(fs::read_to_string(path).map_err(map_cli_state_read)?),
        None => None,
    };
    let mut started = create_engine_from_json(CreateEngineOptions {
        tree_json,
        state_json,
        entry_node: args.entry,
        evaluator: None,
    })?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_play_with_io(&mut started.engine, &mut reader, &mut writer)
}

pub(crate) fn run_play_with_io(
    engine: &mut DialogueEngine,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, DialogueError> {
    let mut events = engine.step()?;
    loop {
        let mut ended = false;
        let mut response: Option<DialogueResponse> = None;
        for event in events {
            match event {
                DialogueEvent::Signal { payload } => {
                    writeln!(writer, "[signal] {}", payload).map_err(map_cli_io)?;
                }
                DialogueEvent::Ended => ended = true,
                DialogueEvent::Response(page) => response = Some(page),
            }
        }

        let response = response.unwrap_or_default();
        for line in &response.texts {
            writeln!(writer, "{}", line).map_err(map_cli_io)?;
        }
        for (index, choice) in response.choices.iter().enumerate() {
            writeln!(writer, "  [{}] {}", index, choice).map_err(map_cli_io)?;
        }

        if ended {
            writeln!(writer, "[END]").map_err(map_cli_io)?;
            return Ok(0);
        }

        let choice = if response.choices.is_empty() {
            // Plain page break; an empty line advances.
            prompt_input_from("> ", reader, writer)?;
            None
        } else {
            let raw = prompt_input_from("> ", reader, writer)?;
            let index = raw.trim().parse::<usize>().map_err(|_| {
                DialogueError::new("CLI_CHOICE_PARSE", format!("Invalid choice index: {}", raw))
            })?;
            Some(index)
        };
        events = engine.resume(choice)?;
    }
}

pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<String, DialogueError> {
    write!(writer, "{}", prefix).map_err(map_cli_io)?;
    writer.flush().map_err(map_cli_io)?;
    let mut input = String::new();
    reader.read_line(&mut input).map_err(map_cli_io)?;
    Ok(input.trim_end_matches(&['\r', '\n'][..]).to_string())
}
