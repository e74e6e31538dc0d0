//! List the loaded library's exported functions

use crate::dispatch::{dispatch, Reply};
use crate::prompt::ScriptedPrompter;
use crate::session::Session;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Listing<'a> {
    library: &'a str,
    path: &'a Path,
    symbols: &'a [String],
}

pub fn run(session: &Session, json: bool) -> Result<()> {
    if json {
        let listing = Listing {
            library: session.library_name(),
            path: session.library().path(),
            symbols: session.library().symbols(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let reply = dispatch(session, "-list", &mut ScriptedPrompter::default())?;
    if let Reply::Symbols { symbols, .. } = &reply {
        if symbols.is_empty() {
            println!("No exported functions found.");
            return Ok(());
        }
    }
    println!("{}", reply);
    Ok(())
}
