use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, error, trace};

use symname::errors::StringifyError;
use symname::stringify;
use symname::table::{self, SymbolTable};
use symname::{Category, Resolved};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about,
    help_template = r#"{about-section}
{usage-heading} {usage}
{all-args}{tab}

{name}: v{version}
"#
)]
/// Symbolic names for signals, si_codes, errno values and ptrace requests
///
/// A query is either a number (decimal, or hex with a `0x` prefix) which is translated to its
/// name, or a name like `SIGSEGV` which is translated to its value. Numbers without a name are
/// printed in hex and the exit status is 1. A name that is not in the table is an error and the
/// exit status is 2.
struct Args {
    #[arg(long, global = true)]
    /// Print the result as JSON
    json: bool,

    #[arg(long, global = true)]
    /// Abort instead of printing the raw value when a number has no name
    die_on_fail: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    /// Log more, can be given multiple times
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a signal
    Signal {
        #[arg(allow_negative_numbers = true, value_parser = parse_query)]
        query: Query,
    },
    /// Look up the si_code of SIGILL, SIGBUS or SIGSEGV
    Code {
        #[arg(allow_negative_numbers = true, value_parser = parse_query)]
        signal: Query,
        #[arg(allow_negative_numbers = true, value_parser = parse_query)]
        query: Query,
    },
    /// Look up an errno value
    Errno {
        #[arg(allow_negative_numbers = true, value_parser = parse_query)]
        query: Query,
    },
    /// Look up a ptrace request
    Ptrace {
        #[arg(allow_negative_numbers = true, value_parser = parse_query)]
        query: Query,
    },
    /// Print every entry of a table
    List { table: ListTable },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ListTable {
    Signal,
    Ill,
    Bus,
    Segv,
    Errno,
    Ptrace,
}

impl ListTable {
    /// The signal the sub-codes of this table belong to
    fn signal(self) -> Option<i32> {
        match self {
            ListTable::Ill => Some(nix::libc::SIGILL),
            ListTable::Bus => Some(nix::libc::SIGBUS),
            ListTable::Segv => Some(nix::libc::SIGSEGV),
            ListTable::Signal | ListTable::Errno | ListTable::Ptrace => None,
        }
    }

    fn table(self) -> &'static SymbolTable {
        match self {
            ListTable::Signal => &table::SIGNALS,
            ListTable::Ill => &table::ILL_CODES,
            ListTable::Bus => &table::BUS_CODES,
            ListTable::Segv => &table::SEGV_CODES,
            ListTable::Errno => &table::ERRNOS,
            ListTable::Ptrace => &table::PTRACE_REQUESTS,
        }
    }
}

#[derive(Clone, Debug)]
enum Query {
    Value(i32),
    Name(String),
}

fn parse_query(raw: &str) -> Result<Query, String> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        // allow the full 32 bit range, so 0xffffffff is -1
        return u32::from_str_radix(hex, 16)
            .map(|v| Query::Value(v as i32))
            .map_err(|e| format!("bad hex number {raw}: {e}"));
    }
    if raw.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        return raw
            .parse::<i32>()
            .map(Query::Value)
            .map_err(|e| format!("bad number {raw}: {e}"));
    }
    if raw.is_empty() {
        return Err("empty query".to_string());
    }
    Ok(Query::Name(raw.to_string()))
}

fn main() {
    human_panic::setup_panic!();

    let args = Args::parse();
    setup_logger(args.verbose);
    debug!("{args:?}");

    match run(&args) {
        Ok(true) => (),
        Ok(false) => exit(1),
        Err(e) => {
            error!("{e}");
            exit(2);
        }
    }
}

/// Answers the command, returns whether the queried value has a name
fn run(args: &Args) -> Result<bool, StringifyError> {
    match &args.command {
        Command::List { table: which } => {
            list(*which, args.json);
            Ok(true)
        }
        Command::Signal { query } => query_table(Category::Signal, None, query, args),
        Command::Errno { query } => query_table(Category::Errno, None, query, args),
        Command::Ptrace { query } => query_table(Category::Ptrace, None, query, args),
        Command::Code { signal, query } => {
            let signal = match signal {
                Query::Value(v) => *v,
                Query::Name(n) => stringify::code_of(Category::Signal, n)?,
            };
            query_table(Category::SignalCode, Some(signal), query, args)
        }
    }
}

/// Prints the answer to `query` and returns whether it was known
fn query_table(
    category: Category,
    signal: Option<i32>,
    query: &Query,
    args: &Args,
) -> Result<bool, StringifyError> {
    let resolved = match query {
        Query::Value(code) => {
            let result = stringify::try_lookup(category, signal, *code);
            let name = stringify::resolve(result, args.die_on_fail);
            Resolved {
                category,
                signal,
                code: *code,
                name,
            }
        }
        Query::Name(name) => {
            let code = reverse(category, signal, name)?;
            stringify::resolved(category, signal, code)
        }
    };
    trace!("{resolved:?}");

    if args.json {
        println!(
            "{}",
            serde_json::to_string(&resolved).expect("a resolved code is always serializable")
        );
    } else {
        match query {
            Query::Value(_) => println!("{resolved}"),
            Query::Name(_) => println!("{}", resolved.code),
        }
    }

    Ok(resolved.name.is_some())
}

fn reverse(category: Category, signal: Option<i32>, name: &str) -> Result<i32, StringifyError> {
    let Some(signal) = signal else {
        return stringify::code_of(category, name);
    };
    table::signal_code_table(signal)
        .ok_or(StringifyError::UnknownSignal(signal))?
        .code_of(name)
        .ok_or_else(|| StringifyError::UnknownName {
            category,
            name: name.to_string(),
        })
}

fn list_entries(which: ListTable) -> Vec<Resolved> {
    let table = which.table();
    table
        .iter()
        .map(|(code, name)| Resolved {
            category: table.category(),
            signal: which.signal(),
            code,
            name: Some(name),
        })
        .collect()
}

fn list(which: ListTable, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string(&list_entries(which))
                .expect("a resolved code is always serializable")
        );
    } else {
        for (code, name) in which.table().iter() {
            println!("{code:>6} {code:#010x} {name}");
        }
    }
}

fn setup_logger(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    // construct a subscriber that prints formatted traces to stderr, stdout is for the answers
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time()
        .with_file(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    // use that subscriber to process traces emitted after this point
    tracing::subscriber::set_global_default(subscriber).expect("could not setup logger");
    trace!("set up the logger");
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_query() {
        assert!(matches!(parse_query("11"), Ok(Query::Value(11))));
        assert!(matches!(parse_query("0x1f"), Ok(Query::Value(0x1f))));
        assert!(matches!(parse_query("0xffffffff"), Ok(Query::Value(-1))));
        assert!(matches!(parse_query("-3"), Ok(Query::Value(-3))));
        assert!(matches!(parse_query("SIGSEGV"), Ok(Query::Name(n)) if n == "SIGSEGV"));
        assert!(parse_query("0xzz").is_err());
        assert!(parse_query("12abc").is_err());
        assert!(parse_query("").is_err());
    }

    #[test]
    fn test_args() {
        use clap::CommandFactory;
        Args::command().debug_assert();

        let args = Args::try_parse_from(["symname", "--json", "code", "SIGSEGV", "0x2"])
            .expect("valid arguments");
        assert!(args.json);
        assert!(matches!(
            args.command,
            Command::Code {
                signal: Query::Name(_),
                query: Query::Value(2)
            }
        ));

        let args = Args::try_parse_from(["symname", "errno", "-1"]).expect("valid arguments");
        assert!(matches!(
            args.command,
            Command::Errno {
                query: Query::Value(-1)
            }
        ));
    }

    #[test]
    fn test_reverse() {
        assert_eq!(
            reverse(Category::SignalCode, Some(nix::libc::SIGBUS), "BUS_OBJERR"),
            Ok(symname::consts::BUS_OBJERR)
        );
        assert!(reverse(Category::SignalCode, Some(nix::libc::SIGSEGV), "BUS_OBJERR").is_err());
        assert_eq!(
            reverse(Category::SignalCode, Some(nix::libc::SIGTRAP), "BUS_OBJERR"),
            Err(StringifyError::UnknownSignal(nix::libc::SIGTRAP))
        );
    }

    #[test]
    fn test_run_reports_unknown_names_as_errors() {
        let args = Args::try_parse_from(["symname", "code", "SIGSEGV", "BUS_NOPE"])
            .expect("valid arguments");
        assert_eq!(
            run(&args),
            Err(StringifyError::UnknownName {
                category: Category::SignalCode,
                name: "BUS_NOPE".to_string()
            })
        );

        let args =
            Args::try_parse_from(["symname", "code", "SIGNOPE", "1"]).expect("valid arguments");
        assert!(matches!(
            run(&args),
            Err(StringifyError::UnknownName {
                category: Category::Signal,
                ..
            })
        ));
    }

    #[test]
    fn test_sub_code_entries_name_their_signal() {
        let entries = list_entries(ListTable::Segv);
        assert!(!entries.is_empty());
        assert!(entries
            .iter()
            .all(|e| e.signal == Some(nix::libc::SIGSEGV) && e.category == Category::SignalCode));
        assert!(list_entries(ListTable::Bus)
            .iter()
            .all(|e| e.signal == Some(nix::libc::SIGBUS)));
        assert!(list_entries(ListTable::Ill)
            .iter()
            .all(|e| e.signal == Some(nix::libc::SIGILL)));
        assert!(list_entries(ListTable::Errno)
            .iter()
            .all(|e| e.signal.is_none()));
    }
}
