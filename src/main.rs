use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docconf::config::{default_config, DEFAULT_CONFIG_FILE};
use docconf::resolve::resolve;
use docconf::ConfigLoader;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Documentation build configuration resolver
///
/// Loads docconf.toml, validates it, and reports the resolved configuration.
#[derive(Parser, Debug)]
#[command(name = "docconf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    ///
    /// If not specified, searches:
    /// 1. $DOCCONF_CONFIG
    /// 2. ./docconf.toml
    /// 3. ~/.config/docconf/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the configuration and print the snapshot
    Resolve {
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Print the parser each file is dispatched to
    Lookup {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Write the built-in starter configuration
    Init {
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Toml,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt().with_env_filter(filter).with_target(true);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).with_ansi(false).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file)?;

    info!("Starting docconf v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Init { output, force } => {
            if output.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    output.display()
                );
            }
            let text = toml::to_string_pretty(&default_config())
                .context("Failed to serialize starter configuration")?;
            std::fs::write(&output, text)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote starter configuration to {}", output.display());
            println!("{}", output.display());
        }
        Command::Resolve { format } => {
            let loaded = ConfigLoader::new(args.config).load()?;
            let resolved = resolve(&loaded)?;
            let text = match format {
                Format::Json => resolved.to_json_pretty()?,
                Format::Toml => resolved.to_toml()?,
            };
            println!("{}", text);
        }
        Command::Lookup { files } => {
            let loaded = ConfigLoader::new(args.config).load()?;
            let resolved = resolve(&loaded)?;
            let parsers = files
                .iter()
                .map(|file| resolved.dispatch_table().resolve_path(file))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            for (file, parser) in files.iter().zip(parsers) {
                println!("{}\t{}", file.display(), parser);
            }
        }
    }

    Ok(())
}
