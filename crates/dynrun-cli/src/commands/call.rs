//! Run a single command non-interactively

use crate::dispatch::{dispatch, Reply};
use crate::prompt::ScriptedPrompter;
use crate::session::Session;
use anyhow::{bail, Result};

/// Dispatch `command`, answering its prompts from `inputs` in order
pub fn run(session: &Session, command: &str, inputs: Vec<String>) -> Result<()> {
    let line = normalize_command(command);
    let mut prompter = ScriptedPrompter::new(inputs);

    let reply = dispatch(session, &line, &mut prompter)?;
    if prompter.remaining() > 0 {
        log::warn!("{} unused input(s) for {}", prompter.remaining(), line);
    }

    match reply {
        Reply::Unknown(_) => bail!("{}", reply),
        Reply::Nothing | Reply::Exit => Ok(()),
        reply => {
            println!("{}", reply);
            Ok(())
        }
    }
}

/// Commands may be given without the leading dash
fn normalize_command(command: &str) -> String {
    let command = command.trim();
    if command.starts_with('-') {
        command.to_string()
    } else {
        format!("-{}", command)
    }
}
