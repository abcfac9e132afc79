use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use xmlchain::{
    error::{Error, ErrorKind, Result},
    script::run_script_with,
    BuilderConfig, FormatConfig,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Build script (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spaces per nesting level
    #[arg(short, long, default_value_t = 2)]
    indent: usize,

    /// Maximum element depth
    #[arg(long, default_value_t = xmlchain::config::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Accept element and attribute names that are not valid XML names
    #[arg(long)]
    no_validate: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let script = read_input(args.input.as_ref())?;

    let config = BuilderConfig {
        max_depth: args.max_depth,
        validate_names: !args.no_validate,
        ..BuilderConfig::default()
    };
    let format = FormatConfig {
        indent_spaces: args.indent,
        ..FormatConfig::default()
    };
    let xml = run_script_with(&script, &config, &format)?;

    if let Some(output_path) = args.output {
        info!("Writing {}", output_path.display());
        std::fs::write(&output_path, format!("{xml}\n"))
            .map_err(|e| Error::from(e).with_context(output_path.display()))?;
    } else {
        println!("{}", xml);
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            info!("Reading script: {}", path.display());
            std::fs::read_to_string(path).map_err(|e| Error::from(e).with_context(path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            if buffer.trim().is_empty() {
                return Err(Error::with_message(
                    ErrorKind::Io("empty input".to_string()),
                    "no script provided on stdin",
                ));
            }
            Ok(buffer)
        }
    }
}
