use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use ingredient_common::Translations;
use ingredient_guard::ClientConfig;
use tracing_subscriber::EnvFilter;

mod demo;

const EN_US: &str = include_str!("../lang/en_us.json");

#[derive(Parser)]
#[command(name = "ingredient-cli", about = "CLI tool for the ingredient guard")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Render a grid of ingredients through a buggy plugin renderer
    Demo {
        /// Number of frames to draw
        #[arg(short, long, default_value = "2")]
        frames: u32,
        /// Contain single-render faults instead of raising a crash report
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        catch_render_errors: bool,
        /// Load the client config from a JSON file instead
        #[arg(long, conflicts_with = "no_config")]
        config: Option<PathBuf>,
        /// Run as if no client config were available
        #[arg(long)]
        no_config: bool,
        /// Show advanced tooltips
        #[arg(short, long)]
        advanced: bool,
    },
    /// Validate a client config file and print the effective settings
    CheckConfig {
        /// Path to the JSON config file
        path: PathBuf,
    },
}

/// Route panic messages through tracing. Plugin panics are also logged by the
/// guard with ingredient context once they are contained.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "thread panicked");
    }));
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    install_panic_hook();

    match cli.command {
        Commands::Info => {
            println!("ingredient-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", ingredient_common::crate_info());
            println!("render: {}", ingredient_render::crate_info());
            println!("registry: {}", ingredient_registry::crate_info());
            println!("guard: {}", ingredient_guard::crate_info());
        }
        Commands::Demo {
            frames,
            catch_render_errors,
            config,
            no_config,
            advanced,
        } => {
            let config = if no_config {
                None
            } else if let Some(path) = config {
                Some(ClientConfig::load(&path)?)
            } else {
                Some(ClientConfig {
                    catch_render_errors,
                })
            };
            match config {
                Some(c) => println!(
                    "Demo: frames={frames}, catch_render_errors={}",
                    c.catch_render_errors
                ),
                None => println!("Demo: frames={frames}, no client config"),
            }

            let translations = Translations::from_json_str(EN_US)?;
            demo::run(
                &demo::DemoOptions {
                    config,
                    frames,
                    advanced_tooltips: advanced,
                },
                &translations,
            )?;
        }
        Commands::CheckConfig { path } => {
            let config = ClientConfig::load(&path)?;
            println!("{}: OK", path.display());
            println!("catch_render_errors = {}", config.catch_render_errors);
        }
    }

    Ok(())
}
