use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use generic_node_provider::cli::{self, DiscoverOptions};
use generic_node_provider::output::NodeFormat;
use owo_colors::OwoColorize;
use std::path::PathBuf;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// nodeprobe: discover service nodes from any JSON inventory endpoint
#[derive(Parser)]
#[command(name = "nodeprobe", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the inventory and print the discovered nodes
    Discover {
        /// Discovery config file (YAML, or JSON with a .json extension)
        #[arg(short, long, default_value = "nodes.yml")]
        config: PathBuf,

        /// Write nodes to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = NodeFormat::Json)]
        format: NodeFormat,

        /// Drop nodes without an id or private address
        #[arg(long)]
        complete_only: bool,

        /// Accept invalid TLS certificates
        #[arg(short = 'k', long)]
        insecure: bool,
    },

    /// Validate a discovery config without fetching anything
    Check {
        #[arg(short, long, default_value = "nodes.yml")]
        config: PathBuf,
    },

    /// Show how property paths compile
    Paths {
        /// Dotted property paths, e.g. node.ips.0
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Write a starter discovery config
    Init {
        #[arg(default_value = "nodes.yml")]
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    // Credentials may also come straight from the environment
    if let Err(e) = dotenvy::from_filename(&cli.env) {
        log::debug!("Not loading {}: {}", cli.env, e);
    }

    match cli.command {
        Commands::Discover {
            config,
            output,
            format,
            complete_only,
            insecure,
        } => {
            let options = DiscoverOptions {
                output,
                format,
                complete_only,
                insecure,
            };
            cli::discover(&config, &options).await?;
        }
        Commands::Check { config } => {
            let paths = cli::check_config(&config)?;
            log::info!(
                "{} is valid: id={} private={} public={}",
                config.display().bright_black(),
                format!("'{}'", paths.id).cyan(),
                format!("'{}'", paths.ip_private).cyan(),
                format!("'{}'", paths.ip_public).cyan(),
            );
        }
        Commands::Paths { paths } => {
            for (raw, compiled) in cli::compile_paths(&paths) {
                let tokens = if compiled.is_root() {
                    "<whole record>".to_string()
                } else {
                    format!("{:?}", compiled.tokens())
                };
                println!("{} -> {}", format!("'{}'", raw).green(), tokens);
            }
        }
        Commands::Init { file, force } => {
            log::info!("Writing starter config {}", file.display().bright_black());
            cli::init_config(&file, force)?;
        }
    }

    Ok(())
}
