mod repl;

use std::{fs, path::PathBuf, process};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::Builder;
use log::{debug, info, LevelFilter};
use monkey_interp::{interpreter::EvaluatorConfig, new_interpreter_with_config, ParseErrors};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Maximum nesting of function calls before evaluation fails
    #[arg(long, global = true, default_value_t = EvaluatorConfig::default().max_call_depth)]
    max_depth: usize,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// run a file
    Run {
        #[arg(name = "FILE")]
        file: PathBuf,
    },
}

// RUST_LOG wins over the verbosity flag.
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run_file(file: PathBuf, config: EvaluatorConfig) -> Result<i32> {
    info!("Reading file: {:?}", file);
    let source =
        fs::read_to_string(&file).with_context(|| format!("Failed to read file {:?}", file))?;
    debug!("Read {} bytes from {:?}", source.len(), file);

    let mut engine = new_interpreter_with_config(config);
    match engine.run(&source) {
        Ok(result) => {
            if result != "null" {
                println!("{}", result);
            }
            Ok(0)
        }
        Err(err) if err.is::<ParseErrors>() => {
            eprintln!("{}", err);
            Ok(65)
        }
        Err(err) => {
            eprintln!("ERROR: {}", err);
            Ok(70)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    info!("CLI arguments: {:?}", cli);

    let config = EvaluatorConfig {
        max_call_depth: cli.max_depth,
    };

    match cli.command {
        Some(Commands::Run { file }) => {
            let code = run_file(file, config)?;
            if code != 0 {
                debug!("exiting with code {}", code);
                process::exit(code);
            }
        }
        None => repl::start(config)?,
    }
    Ok(())
}
