//! domlens - Main Entry Point
//!
//! `domlens analyze` renders the DOM hierarchy of an HTML document;
//! `domlens shorten` sends a URL to the shortening backend.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use domlens_engine::render::{HtmlWriter, OutlineWriter, to_json};
use domlens_engine::{Analyzer, Config, OutputFormat, ShortenClient, View};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "domlens", version, about = "HTML/DOM analyzer and URL shortener")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse HTML and print its DOM hierarchy
    Analyze(AnalyzeArgs),
    /// Shorten a URL using the configured backend
    Shorten {
        /// URL to shorten
        url: String,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// HTML file to read (stdin when omitted)
    file: Option<PathBuf>,

    /// Analyze this HTML string instead of a file
    #[arg(long, conflicts_with = "file")]
    html: Option<String>,

    /// Output format: outline, html or json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Disable coloured outline output
    #[arg(long)]
    no_color: bool,

    /// Append palette classes to outline lines
    #[arg(long)]
    styles: bool,

    /// Fail on documents the parser had to repair
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            if io::stderr().is_terminal() {
                eprintln!("{} {:#}", "error:".red().bold(), err);
            } else {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Command::Analyze(args) => analyze(config, args),
        Command::Shorten { url } => shorten(&config, &url),
    }
}

fn analyze(mut config: Config, args: AnalyzeArgs) -> Result<ExitCode> {
    if args.strict {
        config.parser.strict = true;
    }
    let format = args.format.unwrap_or(config.render.format);

    let mut analyzer = Analyzer::from_config(&config).context("building renderer")?;
    // Failures are recorded on the analyzer and shown through its view
    let _ = match (&args.html, &args.file) {
        (Some(html), _) => {
            analyzer.set_input(html.as_str());
            analyzer.analyze()
        }
        (None, Some(path)) => {
            let mut file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            analyzer.analyze_reader(&mut file)
        }
        (None, None) => analyzer.analyze_reader(&mut io::stdin().lock()),
    };
    tracing::debug!("Analyzed {} bytes as {:?}", analyzer.input().len(), format);

    match analyzer.view() {
        View::Tree(rendered) => {
            let output = match format {
                OutputFormat::Outline => {
                    let color =
                        config.render.color && !args.no_color && io::stdout().is_terminal();
                    OutlineWriter::new()
                        .with_color(color)
                        .with_styles(args.styles || config.render.show_styles)
                        .write(&rendered)
                }
                OutputFormat::Html => HtmlWriter::new().write(&rendered),
                OutputFormat::Json => to_json(&rendered).context("serializing render tree")?,
            };
            print!("{output}");
            if format == OutputFormat::Json {
                println!();
            }
            Ok(ExitCode::SUCCESS)
        }
        View::Error(message) => {
            if io::stderr().is_terminal() {
                eprintln!("{}", message.red());
            } else {
                eprintln!("{message}");
            }
            Ok(ExitCode::FAILURE)
        }
        View::Placeholder => {
            println!("{}", domlens_engine::PLACEHOLDER);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn shorten(config: &Config, url: &str) -> Result<ExitCode> {
    let client = ShortenClient::new(&config.shortener).context("building HTTP client")?;
    let shortened = client.shorten(url)?;

    println!("Original URL:  {}", shortened.actual_url);
    println!("Shortened URL: {}", shortened.short_url.blue().underline());
    Ok(ExitCode::SUCCESS)
}
