use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

mod commands;
mod config;
mod dispatch;
mod fixtures;
mod prompt;
mod session;

use session::Session;

/// Load a native pricing library and call its exported functions.
///
/// The library is chosen by `dynrun.toml` (or a legacy
/// `application.properties`) found in the current directory or a parent,
/// and can be overridden with flags.
///
/// EXAMPLES:
///     dynrun                          Start the interactive loop
///     dynrun list --json              Print exported functions as JSON
///     dynrun call -Div 10 4           Call Div(10, 4) once
///     dynrun --lib-name bond call -pricing
///
/// ENVIRONMENT VARIABLES:
///     DYNRUN_LIB_DIR       Library directory
///     DYNRUN_LIB_NAME      Library base name (no extension)
///     DYNRUN_TOOL_TIMEOUT  Export listing timeout in seconds
///     DYNRUN_LOG           Log level
#[derive(Parser)]
#[command(name = "dynrun")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (.toml or .properties)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Directory containing the library
    #[arg(long, global = true)]
    lib_dir: Option<PathBuf>,

    /// Library base name without extension
    #[arg(long, global = true)]
    lib_name: Option<String>,

    /// Export listing timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive command loop (default)
    ///
    /// COMMANDS:
    ///     -help          Show available commands
    ///     -list          List exported functions
    ///     -{function}    Call a supported function
    ///     -exit          Quit
    Repl {
        /// Disable history persistence
        #[arg(long, env = "DYNRUN_NO_HISTORY")]
        no_history: bool,
    },

    /// List the library's exported functions
    #[command(visible_alias = "l")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one command; inputs answer its prompts in order
    ///
    /// EXAMPLES:
    ///     dynrun call -Sum 1.5 2
    ///     dynrun call printStruct TRF240123 ABC,DEF 20341223 365 9999
    ///     dynrun call -updateDoubleArr 1.1,2.2,3.3
    Call {
        /// Command, e.g. -Div or -pricing
        #[arg(allow_hyphen_values = true)]
        command: String,
        /// Answers to the command's prompts
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        inputs: Vec<String>,
    },

    /// Generate shell completion scripts
    ///
    /// EXAMPLES:
    ///     dynrun completions bash > ~/.local/share/bash-completion/completions/dynrun
    ///     dynrun completions zsh > ~/.zfunc/_dynrun
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Repl { no_history: false });
    if let Commands::Completions { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    let overrides = config::Overrides {
        config: cli.config,
        lib_dir: cli.lib_dir,
        lib_name: cli.lib_name,
        timeout: cli.timeout,
    };
    let runner = config::resolve(&overrides, &cwd).context("Failed to load configuration")?;

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        runner.logging.level.clone()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let session = Session::open(runner, &cwd)?;

    match command {
        Commands::Repl { no_history } => commands::repl::run(&session, no_history)?,
        Commands::List { json } => commands::list::run(&session, json)?,
        Commands::Call { command, inputs } => commands::call::run(&session, &command, inputs)?,
        Commands::Completions { .. } => {}
    }

    session.close()?;
    Ok(())
}
