//! monit-conf - Render monit check configuration from declarative attributes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use monit_conf::commands::{self, CommandContext, CommandError};
use monit_conf::display;

#[derive(Parser)]
#[command(
    name = "monit-conf",
    about = "Render monit check configuration from declarative attributes",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (default: .monit-conf.toml, then ~/.config/monit-conf/config.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render checks into the monit configuration directory.
    Render {
        /// Checks file with one [checks.<name>] table per check.
        #[arg(long)]
        checks: PathBuf,
        /// Override the configured output directory.
        #[arg(long)]
        conf_dir: Option<PathBuf>,
        /// Render only this check.
        #[arg(long)]
        only: Option<String>,
        /// Print outcomes as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print a rendered check without writing it.
    Preview {
        /// Checks file with one [checks.<name>] table per check.
        #[arg(long)]
        checks: PathBuf,
        /// Check to render.
        name: String,
    },
    /// Remove rendered check files.
    Remove {
        /// Override the configured output directory.
        #[arg(long)]
        conf_dir: Option<PathBuf>,
        /// Checks to remove.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let mut ctx = CommandContext {
        config_path: cli.config,
        conf_dir: None,
    };

    match cli.command {
        Commands::Render {
            checks,
            conf_dir,
            only,
            json,
        } => {
            ctx.conf_dir = conf_dir;
            let outcomes = commands::render_checks(&ctx, &checks, only.as_deref())?;
            if json {
                println!("{}", commands::outcomes_json(&outcomes)?);
            } else {
                for outcome in &outcomes {
                    display::print_outcome(outcome);
                }
                display::print_summary(&outcomes);
            }
        }
        Commands::Preview { checks, name } => {
            print!("{}", commands::preview_check(&ctx, &checks, &name)?);
        }
        Commands::Remove { conf_dir, names } => {
            ctx.conf_dir = conf_dir;
            for (name, removed) in commands::remove_checks(&ctx, &names)? {
                display::print_removed(&name, removed);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
