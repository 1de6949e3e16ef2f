//! tex-converter CLI.
//!
//! Provides commands for:
//! - `convert`: render a JSON node tree to a LaTeX file
//! - `environments`: run only the display-math environment pass over a file

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use tex_converter::{convert, process_environments, Config, Fragments, Result, SourceNode};

/// Render parsed documents to LaTeX.
#[derive(Parser)]
#[command(name = "tex-converter", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON node tree to LaTeX.
    Convert(ConvertArgs),
    /// Strip display-math markers around self-delimiting environments.
    Environments(EnvironmentsArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Node tree produced by the parser (JSON).
    input: PathBuf,
    /// Output file (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Config file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Preamble fragment, overrides the config file.
    #[arg(long)]
    preamble: Option<PathBuf>,
    /// Framework macros fragment, overrides the config file.
    #[arg(long)]
    macros: Option<PathBuf>,
    /// User macros fragment, overrides the config file.
    #[arg(long)]
    user_macros: Option<PathBuf>,
    /// Trace every rendered node.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only report errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args)]
struct EnvironmentsArgs {
    /// LaTeX file to process.
    input: PathBuf,
    /// Output file (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => load_config(&args).and_then(|config| {
            init_tracing(config.verbose, config.quiet);
            run_convert(args, config)
        }),
        Commands::Environments(args) => {
            init_tracing(false, false);
            run_environments(args)
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Initialize tracing. Verbose enables DEBUG, quiet only ERROR, otherwise
/// RUST_LOG or WARN.
fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read the config file, if any, and apply command-line overrides.
fn load_config(args: &ConvertArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.verbose {
        config.verbose = true;
        config.quiet = false;
    }
    if args.quiet {
        config.quiet = true;
        config.verbose = false;
    }
    if let Some(path) = &args.preamble {
        config.fragments.preamble = Some(path.clone());
    }
    if let Some(path) = &args.macros {
        config.fragments.macros = Some(path.clone());
    }
    if let Some(path) = &args.user_macros {
        config.fragments.user_macros = Some(path.clone());
    }
    Ok(config)
}

fn run_convert(args: ConvertArgs, config: Config) -> Result<()> {
    let fragments = Fragments::load(&config.fragments)?;
    let root = SourceNode::load(&args.input)?;
    let rendered = convert(&root, &fragments, &config.render_config());

    if !rendered.diagnostics.is_empty() && !config.quiet {
        eprintln!(
            "{}: {} node(s) could not be rendered",
            args.input.display(),
            rendered.diagnostics.len()
        );
    }

    write_output(args.output.as_deref(), &rendered.output)
}

fn run_environments(args: EnvironmentsArgs) -> Result<()> {
    let input = std::fs::read_to_string(&args.input)?;
    write_output(args.output.as_deref(), &process_environments(&input))
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}
