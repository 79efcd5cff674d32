//! pdfi CLI - PDF content extraction tool

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use colored::Colorize;

use pdfi::{Command, DispatchFlags, JsonFormat, Router, RouterConfig};

#[derive(Parser)]
#[command(name = "pdfi")]
#[command(version)]
#[command(about = "Extract text, metadata, cross references and objects from PDF files", long_about = None)]
#[command(override_usage = "pdfi <COMMAND> <FILE> [ARGS]...")]
struct Cli {
    /// Command to run
    #[arg(value_name = "COMMAND")]
    command: Option<String>,

    /// Input PDF file
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Command arguments (object addresses for `objects`)
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    args: Vec<String>,

    /// Decode content streams
    #[arg(long)]
    decode: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print extra output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let mut app = Cli::command().after_help(pdfi::usage());

    let matches = match app.try_get_matches_from_mut(std::env::args_os()) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            e.print().ok();
            println!("{}", app.render_help());
            process::exit(1);
        }
    };
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // --verbose forces colour even when stderr is not a terminal
    let colorize = cli.verbose
        || (io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none());
    colored::control::set_override(colorize);

    let config = RouterConfig::new()
        .with_verbose(cli.verbose)
        .with_colorize(colorize);

    let Some(command_id) = cli.command else {
        println!("{}", app.render_help());
        process::exit(1);
    };

    // An unknown command is reported as such even when FILE is missing
    if let Err(e) = command_id.parse::<Command>() {
        fail(&e, &mut app);
    }

    let Some(file) = cli.file else {
        eprintln!("{}: missing <FILE> argument", "Error".red().bold());
        println!("{}", app.render_help());
        process::exit(1);
    };

    let flags = DispatchFlags {
        decode: cli.decode,
        json_format: if cli.pretty {
            JsonFormat::Pretty
        } else {
            JsonFormat::Compact
        },
    };

    log::debug!("{} {} ({} argument(s))", command_id, file.display(), cli.args.len());

    let router = Router::new(config);
    let stdout = io::stdout();
    let stderr = io::stderr();
    let result = router.dispatch(
        &command_id,
        &file,
        &cli.args,
        &flags,
        &mut stdout.lock(),
        &mut stderr.lock(),
    );

    if let Err(e) = result {
        fail(&e, &mut app);
    }
}

fn fail(error: &pdfi::Error, app: &mut clap::Command) -> ! {
    eprintln!("{}: {}", "Error".red().bold(), error);
    if error.is_usage() {
        println!("{}", app.render_help());
    }
    process::exit(1);
}
