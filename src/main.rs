//! CLI entrypoint for `credcheck`.
//!
//! Resolves credentials from `-t` and/or an input file, checks each one
//! against the configured identity-lookup endpoint, streams per-credential
//! results to the terminal, prints a summary, and saves the results to a text
//! file unless `--no-output` is given.
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use colored::Colorize;
use credcheck::{
    aggregator::Aggregator,
    config::{CheckerConfig, DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_SECS},
    credential::{Credential, dedup_preserving_order},
    export::default_output_name,
    io::load_credentials,
    report::{BANNER, colorize_summary, render_summary},
    verifier::HttpVerifier,
};
use log::{LevelFilter, error, info, warn};
use url::Url;

/// Input file read when neither `-t` nor `-i` is given.
const DEFAULT_INPUT_FILE: &str = "Token.txt";

#[derive(Parser, Debug)]
#[command(
    name = "credcheck",
    version,
    about = "Validate credentials against an identity-lookup endpoint"
)]
struct Args {
    /// Single credential to check
    #[arg(short = 't', long = "token")]
    token: Option<Credential>,

    /// File containing one credential per line
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Output file for results (default: results_<timestamp>.txt)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Do not write a results file
    #[arg(long = "no-output", conflicts_with = "output")]
    no_output: bool,

    /// Identity-lookup URL queried once per credential
    #[arg(long = "endpoint", env = "CREDCHECK_ENDPOINT")]
    endpoint: Url,

    /// Base URL for avatar links (default: origin of the endpoint)
    #[arg(long = "avatar-base", env = "CREDCHECK_AVATAR_BASE")]
    avatar_base: Option<Url>,

    /// Request timeout in seconds
    #[arg(long = "timeout", env = "CREDCHECK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Pause between consecutive lookups, in milliseconds
    #[arg(long = "delay-ms", env = "CREDCHECK_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control color output (auto, always, never)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Only print the summary (still writes the results file)
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn usage_error(kind: ErrorKind, msg: impl std::fmt::Display) -> ! {
    Args::command().error(kind, msg).exit()
}

fn build_config(args: &Args) -> CheckerConfig {
    let config = CheckerConfig::new(args.endpoint.clone())
        .and_then(|c| c.with_timeout(Duration::from_secs(args.timeout_secs)))
        .unwrap_or_else(|e| usage_error(ErrorKind::InvalidValue, e));
    let config = config.with_delay(Duration::from_millis(args.delay_ms));
    match &args.avatar_base {
        Some(base) => config.with_avatar_base(base.clone()),
        None => config,
    }
}

/// Which file to read credentials from, if any. An explicit `-i` must exist;
/// the default file is only used when neither `-t` nor `-i` is given.
fn resolve_input(args: &Args) -> Option<PathBuf> {
    match &args.input {
        Some(p) if !p.exists() => usage_error(
            ErrorKind::ValueValidation,
            format!("input file not found: {}", p.display()),
        ),
        Some(p) => Some(p.clone()),
        None if args.token.is_none() => {
            let default = Path::new(DEFAULT_INPUT_FILE);
            if default.exists() {
                Some(default.to_path_buf())
            } else {
                warn!("default input file {} not found", DEFAULT_INPUT_FILE);
                None
            }
        }
        None => None,
    }
}

fn collect_credentials(args: &Args) -> Vec<Credential> {
    let mut creds: Vec<Credential> = Vec::new();
    if let Some(c) = &args.token {
        creds.push(c.clone());
    }
    if let Some(path) = resolve_input(args) {
        match load_credentials(&path) {
            Ok(loaded) => {
                info!("loaded {} credentials from {}", loaded.len(), path.display());
                creds.extend(loaded);
            }
            Err(e) => {
                error!("failed to load credentials: {:#}", e);
                std::process::exit(3);
            }
        }
    }
    let (creds, dropped) = dedup_preserving_order(creds);
    if dropped > 0 {
        warn!("dropped {} duplicate credentials", dropped);
    }
    creds
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    match args.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }

    let config = build_config(&args);
    let creds = collect_credentials(&args);
    if creds.is_empty() {
        usage_error(
            ErrorKind::MissingRequiredArgument,
            "no credentials provided. Use -t for a single credential or -i for an input file",
        );
    }

    let verifier = match HttpVerifier::new(&config) {
        Ok(v) => v,
        Err(e) => {
            error!("failed to initialise HTTP client: {}", e);
            std::process::exit(2);
        }
    };
    let output = if args.no_output {
        None
    } else {
        Some(
            args.output
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_output_name())),
        )
    };

    let aggregator = Aggregator::new(verifier, &config);
    let run = if args.quiet {
        aggregator.run_with_console(&creds, output.as_deref(), &mut std::io::sink())
    } else {
        println!("{}", BANNER.bold().cyan());
        aggregator.run(&creds, output.as_deref())
    };
    match run {
        Ok(report) => {
            if args.quiet {
                println!("{}", colorize_summary(&render_summary(&report.summary)));
            }
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    }
}
