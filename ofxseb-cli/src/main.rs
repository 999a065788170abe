use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ofxseb_ingest::{find_plugin, plugins};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

mod config;
mod logging;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "ofxseb", version, about = "Normalize SEB statement exports")]
struct Cli {
    /// Config file (default: ~/.ofxseb/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement export and print the normalized statement as JSON
    Parse {
        /// Statement file (.xlsx, .xls, .ods or .csv)
        file: PathBuf,

        /// Config profile naming the plugin to use
        #[arg(long)]
        profile: Option<String>,

        /// Plugin name, bypassing profiles
        #[arg(long, conflicts_with = "profile")]
        plugin: Option<String>,

        #[arg(long)]
        pretty: bool,
    },

    /// List the available parser plugins
    ListPlugins,

    /// Write the default config file if none exists
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(p) => p,
        None => config::default_config_path()?,
    };
    let cfg = config::load_config(&config_path)?;
    logging::init(&cfg.log_level);

    match cli.command {
        Command::Parse {
            file,
            profile,
            plugin,
            pretty,
        } => {
            parse_statement(&cfg, &file, profile.as_deref(), plugin.as_deref(), pretty)?;
        }

        Command::ListPlugins => {
            for p in plugins() {
                println!("{:<12} {}", p.name(), p.description());
            }
        }

        Command::InitConfig => {
            if config::init_config(&config_path)? {
                println!("Wrote {}", config_path.display());
            } else {
                println!("Config already exists: {}", config_path.display());
            }
        }
    }

    Ok(())
}

fn parse_statement(
    cfg: &Config,
    file: &Path,
    profile: Option<&str>,
    plugin: Option<&str>,
    pretty: bool,
) -> Result<()> {
    if !file.exists() {
        bail!("statement not found: {}", file.display());
    }

    let plugin_name = cfg.resolve_plugin(profile, plugin)?;
    let plugin = find_plugin(&plugin_name)
        .with_context(|| format!("unknown plugin {plugin_name:?} (see `ofxseb list-plugins`)"))?;
    info!(plugin = plugin.name(), file = %file.display(), "parsing statement");

    let statement = plugin
        .get_parser(file)
        .parse()
        .with_context(|| format!("parsing {}", file.display()))?;

    if let Err(e) = statement.validate() {
        warn!(error = %e, "statement does not reconcile");
    }

    let json = if pretty {
        serde_json::to_string_pretty(&statement)?
    } else {
        serde_json::to_string(&statement)?
    };
    println!("{json}");

    Ok(())
}
