//! Command dispatch
//!
//! Maps one line of operator input to a native call. Which commands exist is
//! data ([`COMMANDS`]); a command is offered only when its symbol was
//! discovered in the loaded library and, for the pricing entry points, the
//! library is the one the command was written for.

use crate::fixtures;
use crate::prompt::Prompter;
use crate::session::Session;
use dynrun_core::calls::{self, CallShape, MathOp};
use dynrun_core::{
    FixedRateBondResult, FxForwardResult, HiFiveSwapResult, NativeStructInput, PrintTypeInput,
    SensitivityCurve, StockPricingResult,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One operator command bound to a native entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// What the operator types, e.g. `-pricing`
    pub command: &'static str,
    /// Exported symbol the command calls
    pub symbol: &'static str,
    /// Library base names the command is valid for; empty means any
    pub libraries: &'static [&'static str],
    pub shape: CallShape,
}

impl CommandSpec {
    pub fn is_available(&self, session: &Session) -> bool {
        session.library().symbols().iter().any(|s| s == self.symbol)
            && (self.libraries.is_empty() || self.libraries.contains(&session.library_name()))
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "-Sum",
        symbol: "Sum",
        libraries: &[],
        shape: CallShape::Math(MathOp::Sum),
    },
    CommandSpec {
        command: "-Sub",
        symbol: "Sub",
        libraries: &[],
        shape: CallShape::Math(MathOp::Sub),
    },
    CommandSpec {
        command: "-Mul",
        symbol: "Mul",
        libraries: &[],
        shape: CallShape::Math(MathOp::Mul),
    },
    CommandSpec {
        command: "-Div",
        symbol: "Div",
        libraries: &[],
        shape: CallShape::Math(MathOp::Div),
    },
    CommandSpec {
        command: "-printType",
        symbol: "printType",
        libraries: &[],
        shape: CallShape::PrintType,
    },
    CommandSpec {
        command: "-updateDoubleArr",
        symbol: "updateDoubleArr",
        libraries: &[],
        shape: CallShape::UpdateDoubleArr,
    },
    CommandSpec {
        command: "-printStruct",
        symbol: "printStruct",
        libraries: &[],
        shape: CallShape::PrintStruct,
    },
    CommandSpec {
        command: "-stockPricing",
        symbol: "stockPricing",
        libraries: &["libOtStock", "OtStock"],
        shape: CallShape::StockPricing,
    },
    CommandSpec {
        command: "-pricing",
        symbol: "pricing",
        libraries: &["fxForward"],
        shape: CallShape::FxForwardPricing,
    },
    CommandSpec {
        command: "-pricing",
        symbol: "pricing",
        libraries: &["bond"],
        shape: CallShape::FixedRateBondPricing,
    },
    CommandSpec {
        command: "-KISP_CalcHiFiveSwapMC",
        symbol: "KISP_CalcHiFiveSwapMC",
        libraries: &["KISPEQ_HiFiveSwapMC64"],
        shape: CallShape::HiFiveSwapMc,
    },
];

/// Commands usable with this session, in table order
pub fn available_commands(session: &Session) -> Vec<&'static CommandSpec> {
    COMMANDS.iter().filter(|spec| spec.is_available(session)).collect()
}

/// Result of one dispatched line
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Blank input
    Nothing,
    Exit,
    Help { commands: Vec<&'static str> },
    Symbols { library: String, symbols: Vec<String> },
    Unknown(String),
    Math { op: MathOp, value: f64 },
    PrintType { value: f64 },
    UpdatedArray(Vec<f64>),
    StructPrinted,
    Stock(StockPricingResult),
    FxForward(FxForwardResult),
    Bond(FixedRateBondResult),
    Swap(HiFiveSwapResult),
}

impl Reply {
    pub fn is_exit(&self) -> bool {
        matches!(self, Reply::Exit)
    }
}

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Native(#[from] dynrun_core::Error),

    #[error("Invalid {field} '{input}': {reason}")]
    InvalidInput {
        field: String,
        input: String,
        reason: String,
    },

    #[error("No answer given for '{0}'")]
    MissingInput(String),
}

/// Handle one line of operator input
pub fn dispatch(
    session: &Session,
    line: &str,
    prompter: &mut dyn Prompter,
) -> Result<Reply, DispatchError> {
    let input = line.trim();

    match input {
        "" => return Ok(Reply::Nothing),
        "-exit" => return Ok(Reply::Exit),
        "-help" => {
            let mut commands: Vec<&'static str> = available_commands(session)
                .into_iter()
                .map(|spec| spec.command)
                .collect();
            commands.dedup();
            return Ok(Reply::Help { commands });
        }
        "-list" => {
            return Ok(Reply::Symbols {
                library: session.library_name().to_string(),
                symbols: session.library().symbols().to_vec(),
            })
        }
        _ => {}
    }

    let spec = COMMANDS
        .iter()
        .find(|spec| spec.command == input && spec.is_available(session));

    match spec {
        Some(spec) => {
            log::debug!("{} -> {} ({:?})", input, spec.symbol, spec.shape);
            run(session, spec, prompter)
        }
        None => Ok(Reply::Unknown(input.to_string())),
    }
}

/// Collect inputs first, then resolve and call the entry point
fn run(
    session: &Session,
    spec: &CommandSpec,
    prompter: &mut dyn Prompter,
) -> Result<Reply, DispatchError> {
    let library = session.library();

    let reply = match spec.shape {
        CallShape::Math(op) => {
            let a = parse_value("input 1", &ask(prompter, &format!("[{op}] input 1"))?)?;
            let b = parse_value("input 2", &ask(prompter, &format!("[{op}] input 2"))?)?;
            let function = library.function(spec.symbol)?;
            Reply::Math {
                op,
                value: calls::call_math(&function, a, b)?,
            }
        }
        CallShape::PrintType => {
            let input = read_print_type_input(prompter)?;
            let function = library.function(spec.symbol)?;
            Reply::PrintType {
                value: calls::call_print_type(&function, &input)?,
            }
        }
        CallShape::UpdateDoubleArr => {
            let answer = ask(
                prompter,
                "Doubles to update (comma-separated) e.g. 1.1,2.2,3.3,4.4,5.5",
            )?;
            let values: Vec<f64> = parse_list("double array", &answer)?;
            let function = library.function(spec.symbol)?;
            Reply::UpdatedArray(calls::call_update_double_arr(&function, &values)?)
        }
        CallShape::PrintStruct => {
            let input = read_struct_input(prompter)?;
            let function = library.function(spec.symbol)?;
            calls::call_print_struct(&function, &input)?;
            Reply::StructPrinted
        }
        CallShape::StockPricing => {
            let function = library.function(spec.symbol)?;
            Reply::Stock(calls::call_stock_pricing(&function, &fixtures::stock_pricing())?)
        }
        CallShape::FxForwardPricing => {
            let function = library.function(spec.symbol)?;
            Reply::FxForward(calls::call_fx_forward_pricing(
                &function,
                &fixtures::fx_forward(),
            )?)
        }
        CallShape::FixedRateBondPricing => {
            let function = library.function(spec.symbol)?;
            Reply::Bond(calls::call_fixed_rate_bond_pricing(
                &function,
                &fixtures::fixed_rate_bond(),
            )?)
        }
        CallShape::HiFiveSwapMc => {
            let function = library.function(spec.symbol)?;
            Reply::Swap(calls::call_hifive_swap_mc(&function, &fixtures::hifive_swap())?)
        }
    };

    Ok(reply)
}

/// Four arrays and the pointer value for `printType`
pub fn read_print_type_input(prompter: &mut dyn Prompter) -> Result<PrintTypeInput, DispatchError> {
    let strings = ask(prompter, "Input 1 (comma-separated strings) e.g. apple,banana,grape")?;
    let ints = ask(prompter, "Input 2 (comma-separated integers) e.g. 1,2,3,4")?;
    let doubles = ask(prompter, "Input 3 (comma-separated doubles) e.g. 1.1,2.2,3.3,4.4")?;
    let longs = ask(
        prompter,
        "Input 4 (comma-separated longs) e.g. 10000000000,20000000000,300000000000",
    )?;
    let value = ask(prompter, "Input 5 (double behind the pointer) e.g. 123.12")?;

    Ok(PrintTypeInput {
        strings: split_list(&strings),
        ints: parse_list("integer array", &ints)?,
        doubles: parse_list("double array", &doubles)?,
        longs: parse_list("long array", &longs)?,
        value: parse_or("pointer value", &value, 0.0)?,
    })
}

/// Fields of `struct MyStruct`; blank answers take the defaults
pub fn read_struct_input(prompter: &mut dyn Prompter) -> Result<NativeStructInput, DispatchError> {
    let position_name = ask(prompter, "Input 1 (positionNm) e.g. TRF240123")?;
    let bucket = ask(prompter, "Input 2 (bucketNm) e.g. ABC,DEF,GHI,XYZ")?;
    let business_date = ask(prompter, "Input 3 (bsdt) e.g. 20341223")?;
    let tenor = ask(prompter, "Input 4 (tenor) e.g. 365")?;
    let value = ask(prompter, "Input 5 (value) e.g. 9999.00")?;

    Ok(NativeStructInput {
        position_name: non_empty_or(position_name, "Default Position"),
        bucket: split_list(&bucket),
        business_date: non_empty_or(business_date, "99991231"),
        tenor: parse_or("tenor", &tenor, 365)?,
        value: parse_or("value", &value, 0.0)?,
    })
}

fn ask(prompter: &mut dyn Prompter, question: &str) -> Result<String, DispatchError> {
    prompter
        .prompt(question)
        .map(|answer| answer.trim().to_string())
        .ok_or_else(|| DispatchError::MissingInput(question.to_string()))
}

fn parse_value<T>(field: &str, text: &str) -> Result<T, DispatchError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.trim()
        .parse()
        .map_err(|e: T::Err| DispatchError::InvalidInput {
            field: field.to_string(),
            input: text.to_string(),
            reason: e.to_string(),
        })
}

fn parse_or<T>(field: &str, text: &str, default: T) -> Result<T, DispatchError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if text.is_empty() {
        Ok(default)
    } else {
        parse_value(field, text)
    }
}

/// Comma-separated values; blank input is an empty list
fn parse_list<T>(field: &str, text: &str) -> Result<Vec<T>, DispatchError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    split_list(text)
        .iter()
        .map(|item| parse_value(field, item))
        .collect()
}

fn split_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(|item| item.trim().to_string()).collect()
}

fn non_empty_or(text: String, default: &str) -> String {
    if text.is_empty() {
        default.to_string()
    } else {
        text
    }
}

// ============================================================================
// Presentation
// ============================================================================

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Nothing => Ok(()),
            Reply::Exit => write!(f, "Goodbye!"),
            Reply::Help { commands } => {
                writeln!(f, "Available commands:")?;
                writeln!(f, "  -list              List the library's exported functions")?;
                writeln!(f, "  -exit              Exit")?;
                write!(f, "  -help              Show this help message")?;
                for command in commands {
                    write!(f, "\n  {}", command)?;
                }
                Ok(())
            }
            Reply::Symbols { library, symbols } => {
                write!(f, "[{}] available functions", library)?;
                for (i, symbol) in symbols.iter().enumerate() {
                    write!(f, "\n{}. {}", i + 1, symbol)?;
                }
                Ok(())
            }
            Reply::Unknown(command) => {
                write!(f, "Unknown command '{}'. Try -help.", command)
            }
            Reply::Math { op, value } => write!(f, "[{}] result: {}", op, value),
            Reply::PrintType { value } => write!(f, "Pointer value after call: {}", value),
            Reply::UpdatedArray(values) => {
                write!(f, "Updated array: ")?;
                write_list(f, values)
            }
            Reply::StructPrinted => write!(f, "printStruct returned"),
            Reply::Stock(result) => {
                writeln!(f, "Return code: {}", result.return_code)?;
                write!(f, "PRICE: {:.10}", result.price)
            }
            Reply::FxForward(result) => {
                writeln!(f, "Net PV: {:.2}", result.net_pv)?;
                write!(f, "FX Sensitivity: {:.2}", result.fx_sensitivity)?;
                if let Some(curve) = &result.girr_delta {
                    write_curve(f, "GIRR", curve, 2)?;
                }
                Ok(())
            }
            Reply::Bond(result) => {
                write!(f, "Net PV: {:.10}", result.net_pv)?;
                if let Some(curve) = &result.girr_delta {
                    write_curve(f, "GIRR", curve, 10)?;
                }
                if let Some(curve) = &result.csr_delta {
                    write_curve(f, "CSR", curve, 10)?;
                }
                Ok(())
            }
            Reply::Swap(result) => {
                writeln!(f, "Return code: {}", result.return_code)?;
                match result.price() {
                    Some(price) => write!(f, "PRICE: {:.10}", price),
                    None => write!(f, "PRICE: n/a"),
                }
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    write!(f, "[")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    write!(f, "]")
}

fn write_curve(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    curve: &SensitivityCurve,
    precision: usize,
) -> fmt::Result {
    write!(f, "\n{} Delta Size: {}", label, curve.len())?;
    for (i, (tenor, sensitivity)) in curve.points().enumerate() {
        write!(
            f,
            "\n{}. {} Tenor: {:.2}, Sensitivity: {:.*}",
            i + 1,
            label,
            tenor,
            precision,
            sensitivity
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_struct_input_defaults() {
        let mut prompter = ScriptedPrompter::new(["", "", "", "", ""]);
        let input = read_struct_input(&mut prompter).unwrap();
        assert_eq!(
            input,
            NativeStructInput {
                position_name: "Default Position".to_string(),
                bucket: Vec::new(),
                business_date: "99991231".to_string(),
                tenor: 365,
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_struct_input_values() {
        let mut prompter =
            ScriptedPrompter::new(["TRF240123", "ABC, DEF", "20341223", "730", "9999.00"]);
        let input = read_struct_input(&mut prompter).unwrap();
        assert_eq!(input.position_name, "TRF240123");
        assert_eq!(input.bucket, vec!["ABC".to_string(), "DEF".to_string()]);
        assert_eq!(input.business_date, "20341223");
        assert_eq!(input.tenor, 730);
        assert_eq!(input.value, 9999.0);
    }

    #[test]
    fn test_struct_input_bad_tenor() {
        let mut prompter = ScriptedPrompter::new(["", "", "", "one year", ""]);
        match read_struct_input(&mut prompter) {
            Err(DispatchError::InvalidInput { field, input, .. }) => {
                assert_eq!(field, "tenor");
                assert_eq!(input, "one year");
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_print_type_input() {
        let mut prompter = ScriptedPrompter::new([
            "apple,banana,grape",
            "1,2,3,4",
            "1.1,2.2",
            "10000000000,20000000000",
            "123.12",
        ]);
        let input = read_print_type_input(&mut prompter).unwrap();
        assert_eq!(input.strings, vec!["apple", "banana", "grape"]);
        assert_eq!(input.ints, vec![1, 2, 3, 4]);
        assert_eq!(input.doubles, vec![1.1, 2.2]);
        assert_eq!(input.longs, vec![10_000_000_000, 20_000_000_000]);
        assert_eq!(input.value, 123.12);
    }

    #[test]
    fn test_print_type_blank_inputs() {
        let mut prompter = ScriptedPrompter::new(["", "", "", "", ""]);
        assert_eq!(
            read_print_type_input(&mut prompter).unwrap(),
            PrintTypeInput::default()
        );
    }

    #[test]
    fn test_print_type_runs_out_of_answers() {
        let mut prompter = ScriptedPrompter::new(["a", "1"]);
        assert!(matches!(
            read_print_type_input(&mut prompter),
            Err(DispatchError::MissingInput(_))
        ));
    }

    #[rstest]
    #[case("1,x,3")]
    #[case("1,,3")]
    #[case("3000000000")]
    fn test_int_list_rejects(#[case] text: &str) {
        assert!(parse_list::<i32>("integer array", text).is_err());
    }

    #[rstest]
    #[case("", vec![])]
    #[case("1.5", vec![1.5])]
    #[case(" 1.5 , -2 ,3e2", vec![1.5, -2.0, 300.0])]
    fn test_double_list(#[case] text: &str, #[case] expected: Vec<f64>) {
        assert_eq!(parse_list::<f64>("double array", text).unwrap(), expected);
    }

    #[test]
    fn test_command_table_pricing_is_per_library() {
        let pricing: Vec<_> = COMMANDS.iter().filter(|c| c.command == "-pricing").collect();
        assert_eq!(pricing.len(), 2);
        assert_eq!(pricing[0].libraries, &["fxForward"]);
        assert_eq!(pricing[1].libraries, &["bond"]);
    }

    #[test]
    fn test_reply_fx_display() {
        let reply = Reply::FxForward(FxForwardResult {
            net_pv: 1234.567,
            fx_sensitivity: -0.5,
            girr_delta: Some(SensitivityCurve {
                tenors: vec![0.25, 1.0],
                sensitivities: vec![10.0, 20.0],
            }),
        });
        assert_eq!(
            reply.to_string(),
            "Net PV: 1234.57\n\
             FX Sensitivity: -0.50\n\
             GIRR Delta Size: 2\n\
             1. GIRR Tenor: 0.25, Sensitivity: 10.00\n\
             2. GIRR Tenor: 1.00, Sensitivity: 20.00"
        );
    }

    #[test]
    fn test_reply_symbols_display() {
        let reply = Reply::Symbols {
            library: "fxForward".to_string(),
            symbols: vec!["pricing".to_string(), "Div".to_string()],
        };
        assert_eq!(
            reply.to_string(),
            "[fxForward] available functions\n1. pricing\n2. Div"
        );
    }

    #[test]
    fn test_reply_misc_display() {
        assert_eq!(Reply::Nothing.to_string(), "");
        assert_eq!(
            Reply::Math {
                op: MathOp::Div,
                value: 2.5
            }
            .to_string(),
            "[Div] result: 2.5"
        );
        assert_eq!(
            Reply::UpdatedArray(vec![1.5, 12.25]).to_string(),
            "Updated array: [1.5, 12.25]"
        );
        assert!(Reply::Unknown("-foo".to_string()).to_string().contains("-help"));
    }

    /// Dispatch against a real library with a chosen export list
    #[cfg(target_os = "linux")]
    mod with_library {
        use super::*;
        use dynrun_config::RunnerConfig;
        use pretty_assertions::assert_eq;
        use dynrun_core::{Error, ExportSource, IntrospectionError, LibraryHandle};
        use std::path::{Path, PathBuf};

        struct ListedExports(Vec<&'static str>);

        impl ExportSource for ListedExports {
            fn list_exports(&self, _path: &Path) -> Result<Vec<String>, IntrospectionError> {
                Ok(self.0.iter().map(|s| s.to_string()).collect())
            }
        }

        fn loaded_libc() -> PathBuf {
            let maps = std::fs::read_to_string("/proc/self/maps").unwrap();
            maps.lines()
                .filter_map(|line| line.split_whitespace().nth(5))
                .find(|p| {
                    let file = p.rsplit('/').next().unwrap_or_default();
                    file.starts_with("libc.so") || file.starts_with("libc-")
                })
                .map(PathBuf::from)
                .expect("libc mapped into test process")
        }

        /// Session over libc that claims to export `listed`
        fn session(name: &str, listed: Vec<&'static str>) -> Session {
            let library = LibraryHandle::open_with(loaded_libc(), &ListedExports(listed)).unwrap();
            Session::new(RunnerConfig::for_library(name), library)
        }

        fn run_line(session: &Session, line: &str, answers: &[&str]) -> Result<Reply, DispatchError> {
            let mut prompter = ScriptedPrompter::new(answers.iter().copied());
            dispatch(session, line, &mut prompter)
        }

        #[test]
        fn test_builtins() {
            let session = session("fxForward", vec!["pricing", "Div"]);

            assert_eq!(run_line(&session, "  ", &[]).unwrap(), Reply::Nothing);
            assert!(run_line(&session, "-exit", &[]).unwrap().is_exit());
            assert_eq!(
                run_line(&session, "-list", &[]).unwrap(),
                Reply::Symbols {
                    library: "fxForward".to_string(),
                    symbols: vec!["pricing".to_string(), "Div".to_string()],
                }
            );
        }

        #[test]
        fn test_help_lists_available_commands_only() {
            let session = session("bond", vec!["Sum", "pricing", "stockPricing"]);
            assert_eq!(
                run_line(&session, "-help", &[]).unwrap(),
                Reply::Help {
                    commands: vec!["-Sum", "-pricing"]
                }
            );
        }

        #[test]
        fn test_unknown_command() {
            let session = session("fxForward", vec!["Div"]);
            assert_eq!(
                run_line(&session, "-Sum", &[]).unwrap(),
                Reply::Unknown("-Sum".to_string())
            );
            assert_eq!(
                run_line(&session, "Div", &[]).unwrap(),
                Reply::Unknown("Div".to_string())
            );
        }

        #[rstest]
        #[case::stock_wrong_library("bond", "stockPricing", "-stockPricing")]
        #[case::pricing_wrong_library("OtStock", "pricing", "-pricing")]
        #[case::swap_wrong_library("fxForward", "KISP_CalcHiFiveSwapMC", "-KISP_CalcHiFiveSwapMC")]
        fn test_library_gating(#[case] name: &str, #[case] symbol: &'static str, #[case] line: &str) {
            let session = session(name, vec![symbol]);
            assert_eq!(
                run_line(&session, line, &[]).unwrap(),
                Reply::Unknown(line.to_string())
            );
        }

        #[rstest]
        #[case::stock("libOtStock", "stockPricing", "-stockPricing")]
        #[case::fx("fxForward", "pricing", "-pricing")]
        #[case::bond("bond", "pricing", "-pricing")]
        #[case::swap("KISPEQ_HiFiveSwapMC64", "KISP_CalcHiFiveSwapMC", "-KISP_CalcHiFiveSwapMC")]
        fn test_listed_but_not_exported(
            #[case] name: &str,
            #[case] symbol: &'static str,
            #[case] line: &str,
        ) {
            let session = session(name, vec![symbol]);
            match run_line(&session, line, &[]) {
                Err(DispatchError::Native(Error::SymbolNotFound { symbol: missing, .. })) => {
                    assert_eq!(missing, symbol)
                }
                other => panic!("expected SymbolNotFound, got {:?}", other),
            }
            assert_eq!(session.library().symbols(), &[symbol.to_string()]);
        }

        #[test]
        fn test_math_input_checked_before_lookup() {
            let session = session("calc", vec!["Mul"]);
            match run_line(&session, "-Mul", &["2", "three"]) {
                Err(DispatchError::InvalidInput { field, input, .. }) => {
                    assert_eq!(field, "input 2");
                    assert_eq!(input, "three");
                }
                other => panic!("expected InvalidInput, got {:?}", other),
            }
        }

        #[test]
        fn test_math_missing_input() {
            let session = session("calc", vec!["Sub"]);
            assert!(matches!(
                run_line(&session, "-Sub", &["1"]),
                Err(DispatchError::MissingInput(_))
            ));
        }

        #[test]
        fn test_failed_command_leaves_session_usable() {
            let session = session("calc", vec!["Sum"]);
            assert!(run_line(&session, "-Sum", &["1", "2"]).is_err());
            assert_eq!(
                run_line(&session, "-list", &[]).unwrap(),
                Reply::Symbols {
                    library: "calc".to_string(),
                    symbols: vec!["Sum".to_string()],
                }
            );
        }
    }
}
