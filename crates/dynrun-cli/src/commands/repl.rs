//! REPL command implementation

use crate::dispatch::{dispatch, Reply};
use crate::prompt::Prompter;
use crate::session::Session;
use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Prompts answered from the same line editor as commands
struct EditorPrompter<'a> {
    editor: &'a mut DefaultEditor,
}

impl Prompter for EditorPrompter<'_> {
    fn prompt(&mut self, question: &str) -> Option<String> {
        println!("{}", question);
        match self.editor.readline("? ") {
            Ok(line) => Some(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(err) => {
                log::warn!("input error: {}", err);
                None
            }
        }
    }
}

/// Run the interactive command loop until `-exit` or end of input
pub fn run(session: &Session, no_history: bool) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let history_path = if no_history {
        None
    } else {
        crate::config::history_path()
    };
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path); // Ignore errors if file doesn't exist
    }

    println!(
        "dynrun v{} [{}]",
        dynrun_core::VERSION,
        session.library().path().display()
    );
    println!("Enter a command: -help, -list, -{{functionName}}, -exit");
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                let mut prompter = EditorPrompter { editor: &mut rl };
                match dispatch(session, &line, &mut prompter) {
                    Ok(Reply::Exit) => {
                        println!("{}", Reply::Exit);
                        break;
                    }
                    Ok(Reply::Unknown(command)) => {
                        println!("{}", Reply::Unknown(command).to_string().yellow());
                    }
                    Ok(reply) => println!("{}", reply),
                    Err(err) => eprintln!("{} {}", "error:".red().bold(), err),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                println!("Use -exit to quit");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("{}", Reply::Exit);
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(&path); // Ignore errors
    }

    Ok(())
}
