//! PolyGlot CLI entry point.

use polyglot_check::has_errors;
use polyglot_engine::EngineConfig;
use polyglot_runtime::{Repl, Reply, Session, demo_language};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    file: Option<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    demo: bool,
    check: bool,
    commands: Vec<String>,
    // Engine flags
    trace_rules: bool,
    max_recursion: Option<usize>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--check" => config.check = true,
            "--demo" => config.demo = true,
            "--trace" => config.trace_rules = true,
            "-e" | "--eval" => {
                i += 1;
                if i >= args.len() {
                    return Err("--eval requires a command".into());
                }
                config.commands.push(args[i].clone());
            }
            "--max-recursion" => {
                i += 1;
                if i >= args.len() {
                    return Err("--max-recursion requires a value".into());
                }
                let limit: usize = args[i]
                    .parse()
                    .map_err(|_| format!("invalid --max-recursion value: {}", args[i]))?;
                if limit == 0 {
                    return Err("--max-recursion must be at least 1".into());
                }
                config.max_recursion = Some(limit);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.file.is_some() {
                    return Err(format!("only one language file may be given, got {path} too").into());
                }
                config.file = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    if config.demo && config.file.is_some() {
        return Err("--demo cannot be combined with a language file".into());
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    if config.show_version {
        println!("polyglot {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let mut engine = EngineConfig::default().with_record_traces(config.trace_rules);
    if let Some(limit) = config.max_recursion {
        engine = engine.with_max_recursion(limit);
    }

    let mut session = Session::new().with_config(engine);
    if config.demo {
        session.set_language(demo_language());
    }
    if let Some(file) = &config.file {
        session.load(&file.to_string_lossy())?;
    }

    let mut repl = Repl::new()?.with_session(session);

    for command in &config.commands {
        match repl.eval(command)? {
            Reply::Output(text) => println!("{text}"),
            Reply::Silent => {}
            Reply::Quit => return Ok(ExitCode::SUCCESS),
        }
    }

    let mut code = ExitCode::SUCCESS;
    if config.check {
        let problems = repl.session_mut().check()?;
        for problem in problems {
            println!("{problem}");
        }
        if has_errors(problems) {
            code = ExitCode::FAILURE;
        } else if problems.is_empty() {
            println!("no problems found");
        }
    }

    // If batch mode, exit now
    if config.batch_mode || config.check || !config.commands.is_empty() {
        return Ok(code);
    }

    repl.run()?;
    Ok(code)
}

fn print_help() {
    println!(
        "\x1b[1mPolyGlot\x1b[0m - Conjugation rules and phonology for constructed languages

\x1b[1mUSAGE:\x1b[0m
    polyglot [OPTIONS] [FILE]

\x1b[1mARGUMENTS:\x1b[0m
    [FILE]    Language snapshot to load before starting the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help             Print help information
    -V, --version          Print version information
    -b, --batch            Load the file and exit (no REPL)
    -e, --eval CMD         Run a REPL command and exit (repeatable)
    --check                Print validation problems; exit 1 if any is an error
    --demo                 Start with the built-in demo language

\x1b[1mENGINE OPTIONS:\x1b[0m
    --max-recursion N      Bound on recursive phonology passes (default 100)
    --trace                Record rule traces for every derivation

\x1b[1mEXAMPLES:\x1b[0m
    polyglot --demo                        Explore the demo language
    polyglot lang.pgs                      Load lang.pgs, then start the REPL
    polyglot --check lang.pgs              Validate lang.pgs
    polyglot --demo -e \"decline bus\"       Decline one word and exit
    RUST_LOG=debug polyglot lang.pgs       Log rule skips and faults

\x1b[1mREPL COMMANDS:\x1b[0m
    help                               List commands
    words / pos / combos <pos>         Browse the language
    decline <word> [<combination>]     Derive forms
    trace <word> <combination>         Show which rules ran
    pronounce / romanize <text>        Transcribe text
    segment <text>                     Split text into rule matches
    check                              Run the validation pass
    load <path> / save [<path>]        Snapshot files
    Ctrl+D                             Exit REPL"
    );
}
