//! Export-table discovery by shelling out to the platform's dump tool
//!
//! The loader has no type metadata for native functions. All it learns about
//! a library is the list of names the platform tool prints:
//! - Windows: `dumpbin /EXPORTS <path>` (run through `cmd.exe`)
//! - Linux: `nm -D <path>`
//!
//! Parsing is kept separate from process handling so both dump formats can be
//! exercised without the tools installed.

use crate::error::IntrospectionError;
use log::{debug, warn};
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::OnceLock;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default upper bound for one export-listing subprocess
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Names that dumpbin prints in its banner ("Microsoft (R)", "Copyright (C)")
const DUMPBIN_ARTIFACTS: [&str; 2] = ["R", "C"];

/// Operating system family, as far as export listing is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Other(String),
}

impl Platform {
    /// Platform this binary was compiled for
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            other => Platform::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Other(name) => name,
        }
    }
}

/// Source of the exported-symbol list of a library file
pub trait ExportSource {
    /// List exported function names in encounter order, duplicates included
    fn list_exports(&self, path: &Path) -> Result<Vec<String>, IntrospectionError>;
}

/// Parse `dumpbin /EXPORTS` output
///
/// Two line shapes are recognised:
/// - an import thunk, `... = @ILT+50(Div)`: the last parenthesised word
/// - a plain export row, `ordinal hint RVA name`
pub fn parse_dumpbin_output(text: &str) -> Vec<String> {
    let mut names = Vec::new();

    for line in text.lines() {
        let captured = thunk_pattern()
            .captures(line)
            .or_else(|| export_row_pattern().captures(line))
            .and_then(|caps| caps.get(1));

        if let Some(name) = captured {
            let name = name.as_str();
            if !DUMPBIN_ARTIFACTS.contains(&name) {
                names.push(name.to_string());
            }
        }
    }

    names
}

/// Parse `nm -D` output
///
/// Only text (code) symbols are kept; the name is the last column. Runtime
/// internals such as `_init` or `__cxa_finalize` start with an underscore and
/// are skipped.
pub fn parse_nm_output(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.contains(" T "))
        .filter_map(|line| line.split_whitespace().last())
        .filter(|name| !name.starts_with('_'))
        .map(str::to_string)
        .collect()
}

/// Parse tool output in the format used on `platform`
pub fn parse_exports(platform: &Platform, text: &str) -> Result<Vec<String>, IntrospectionError> {
    match platform {
        Platform::Windows => Ok(parse_dumpbin_output(text)),
        Platform::Linux => Ok(parse_nm_output(text)),
        Platform::Other(name) => Err(IntrospectionError::UnsupportedPlatform(name.clone())),
    }
}

fn thunk_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^.*\(([A-Za-z0-9_]+)\).*$").expect("thunk pattern"))
}

fn export_row_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*\d+\s+\d+\s+[0-9A-Fa-f]+\s+([A-Za-z0-9_]+)$").expect("export row pattern")
    })
}

/// Export listing backed by the platform's dump tool
#[derive(Debug, Clone)]
pub struct ExportTool {
    platform: Platform,
    timeout: Duration,
}

impl ExportTool {
    pub fn new(platform: Platform, timeout: Duration) -> Self {
        Self { platform, timeout }
    }

    pub fn for_current_platform(timeout: Duration) -> Self {
        Self::new(Platform::current(), timeout)
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command(&self, path: &Path) -> Result<(&'static str, Command), IntrospectionError> {
        match &self.platform {
            Platform::Windows => {
                let mut command = Command::new("cmd.exe");
                command.arg("/c");
                let line = format!("dumpbin /EXPORTS \"{}\"", path.display());
                #[cfg(windows)]
                {
                    use std::os::windows::process::CommandExt;
                    command.raw_arg(line);
                }
                #[cfg(not(windows))]
                {
                    command.arg(line);
                }
                Ok(("dumpbin", command))
            }
            Platform::Linux => {
                let mut command = Command::new("nm");
                command.arg("-D").arg(path);
                Ok(("nm", command))
            }
            Platform::Other(name) => Err(IntrospectionError::UnsupportedPlatform(name.clone())),
        }
    }
}

impl Default for ExportTool {
    fn default() -> Self {
        Self::for_current_platform(DEFAULT_TOOL_TIMEOUT)
    }
}

impl ExportSource for ExportTool {
    fn list_exports(&self, path: &Path) -> Result<Vec<String>, IntrospectionError> {
        let (tool, command) = self.command(path)?;
        debug!("Listing exports of {} with {}", path.display(), tool);

        let stdout = run_tool(command, tool, self.timeout)?;
        let names = parse_exports(&self.platform, &stdout)?;

        if names.is_empty() {
            warn!("{} reported no exported functions for {}", tool, path.display());
        } else {
            debug!("{} exported functions found in {}", names.len(), path.display());
        }
        Ok(names)
    }
}

/// Run `command` to completion, draining both pipes, and return its stdout
fn run_tool(mut command: Command, tool: &str, timeout: Duration) -> Result<String, IntrospectionError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| IntrospectionError::Spawn {
        tool: tool.to_string(),
        source,
    })?;

    let stdout_reader = child.stdout.take().map(drain);
    let stderr_reader = child.stderr.take().map(drain);

    let status = wait_with_timeout(&mut child, tool, timeout)?;

    let stdout = collect(stdout_reader, tool)?;
    let stderr = collect(stderr_reader, tool)?;

    if !status.success() {
        return Err(IntrospectionError::ToolFailed {
            tool: tool.to_string(),
            status,
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

fn wait_with_timeout(
    child: &mut Child,
    tool: &str,
    timeout: Duration,
) -> Result<ExitStatus, IntrospectionError> {
    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if started.elapsed() >= timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(IntrospectionError::Timeout {
                    tool: tool.to_string(),
                    timeout,
                });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                return Err(IntrospectionError::Read {
                    tool: tool.to_string(),
                    source,
                })
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(
    reader: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    tool: &str,
) -> Result<Vec<u8>, IntrospectionError> {
    let Some(handle) = reader else {
        return Ok(Vec::new());
    };
    let result = handle
        .join()
        .unwrap_or_else(|_| {
            Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "pipe reader panicked",
            ))
        });
    result.map_err(|source| IntrospectionError::Read {
        tool: tool.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const DUMPBIN_SAMPLE: &str = "\
Microsoft (R) COFF/PE Dumper Version 14.38.33135.0
Copyright (C) Microsoft Corporation.  All rights reserved.


Dump of file C:\\work\\MyMath.dll

File Type: DLL

  Section contains the following exports for MyMath.dll

    00000000 characteristics
    FFFFFFFF time date stamp
        0.00 version
           1 ordinal base
           4 number of functions
           4 number of names

    ordinal hint RVA      name

          1    0 00011037 Div = @ILT+50(Div)
          2    1 0001100A Mul = @ILT+5(Mul)
          3    2 000110C8 Sub = @ILT+195(Sub)
          4    3 00011064 Sum = @ILT+95(Sum)

  Summary

        1000 .data
        1000 .idata
";

    const NM_SAMPLE: &str = "\
                 w __cxa_finalize@GLIBC_2.2.5
                 w __gmon_start__
0000000000001140 T __cxa_finalize
0000000000001139 T Div
0000000000001160 T Mul
                 U printf@GLIBC_2.2.5
0000000000001180 T Sub
00000000000011a0 T Sum
0000000000001000 T _init
0000000000004028 B completed.0
";

    #[test]
    fn test_dumpbin_thunk_lines() {
        assert_eq!(
            parse_dumpbin_output(DUMPBIN_SAMPLE),
            vec!["Div", "Mul", "Sub", "Sum"]
        );
    }

    #[test]
    fn test_dumpbin_plain_export_rows() {
        let text = "    ordinal hint RVA      name\n\n          1    0 00028C30 pricing\n          2    1 00028D10 pricingFRN\n";
        assert_eq!(parse_dumpbin_output(text), vec!["pricing", "pricingFRN"]);
    }

    #[rstest]
    #[case("Microsoft (R) COFF/PE Dumper Version 14.38")]
    #[case("Copyright (C) Microsoft Corporation.")]
    #[case("        1000 .rdata")]
    #[case("    ordinal hint RVA      name")]
    #[case("")]
    fn test_dumpbin_ignored_lines(#[case] line: &str) {
        assert!(parse_dumpbin_output(line).is_empty());
    }

    #[test]
    fn test_dumpbin_keeps_duplicates() {
        let text = "1 0 1000 Div\n2 1 2000 Div\n";
        assert_eq!(parse_dumpbin_output(text), vec!["Div", "Div"]);
    }

    #[test]
    fn test_nm_text_symbols_only() {
        assert_eq!(parse_nm_output(NM_SAMPLE), vec!["Div", "Mul", "Sub", "Sum"]);
    }

    #[test]
    fn test_nm_single_line() {
        assert_eq!(parse_nm_output("0000000000001139 T Div"), vec!["Div"]);
        assert!(parse_nm_output("0000000000001140 T __cxa_finalize").is_empty());
    }

    #[test]
    fn test_parse_exports_dispatches_on_platform() {
        assert_eq!(
            parse_exports(&Platform::Linux, NM_SAMPLE).unwrap().len(),
            4
        );
        assert_eq!(
            parse_exports(&Platform::Windows, DUMPBIN_SAMPLE).unwrap().len(),
            4
        );
        assert!(matches!(
            parse_exports(&Platform::Other("macos".to_string()), NM_SAMPLE),
            Err(IntrospectionError::UnsupportedPlatform(name)) if name == "macos"
        ));
    }

    #[test]
    fn test_empty_output_is_not_an_error() {
        assert!(parse_exports(&Platform::Linux, "").unwrap().is_empty());
        assert!(parse_exports(&Platform::Windows, "").unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_platform_tool() {
        let tool = ExportTool::new(Platform::Other("haiku".to_string()), DEFAULT_TOOL_TIMEOUT);
        let result = tool.list_exports(Path::new("lib.so"));
        assert!(matches!(
            result,
            Err(IntrospectionError::UnsupportedPlatform(_))
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_run_tool_reports_failed_exit() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo boom >&2; exit 3"]);
        let result = run_tool(command, "sh", DEFAULT_TOOL_TIMEOUT);
        match result {
            Err(IntrospectionError::ToolFailed { stderr, status, .. }) => {
                assert_eq!(stderr, "boom");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_run_tool_times_out() {
        let mut command = Command::new("sleep");
        command.arg("5");
        let result = run_tool(command, "sleep", Duration::from_millis(50));
        assert!(matches!(result, Err(IntrospectionError::Timeout { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_run_tool_captures_stdout() {
        let mut command = Command::new("sh");
        command.args(["-c", "printf '0000000000001139 T Div\\n'"]);
        let stdout = run_tool(command, "sh", DEFAULT_TOOL_TIMEOUT).unwrap();
        assert_eq!(parse_nm_output(&stdout), vec!["Div"]);
    }

    #[test]
    fn test_missing_tool_fails_to_spawn() {
        let command = Command::new("dynrun-no-such-tool-xyz");
        let result = run_tool(command, "dynrun-no-such-tool-xyz", DEFAULT_TOOL_TIMEOUT);
        assert!(matches!(result, Err(IntrospectionError::Spawn { .. })));
    }
}
