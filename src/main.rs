use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use pkgcmd::common::config::Config;
use pkgcmd::common::distro::OsRelease;
use pkgcmd::common::package::{AtomicMetrics, PackageManager};
use pkgcmd::ui::{self, prelude::*};

/// Print the package manager commands for this system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit one JSON object per line
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Use this package manager family instead of detecting one
    #[arg(short, long, global = true)]
    family: Option<String>,

    /// Read this file instead of /etc/os-release
    #[arg(long = "os-release", global = true)]
    os_release: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the detected package manager
    Detect,
    /// List supported package manager families
    Families,
    /// Print the command that refreshes the package index
    Update,
    /// Print the command that upgrades all packages
    Upgrade,
    /// Print the command that installs packages
    Install {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Print the command that removes packages
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Print the command that checks whether a package is installed
    Installed { package: String },
    /// Print the commands that show installed and latest versions
    Version { package: String },
}

fn main() {
    let cli = Cli::parse();

    ui::set_debug_mode(cli.debug);
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    ui::init(format, !cli.no_color);

    if let Err(e) = run(cli) {
        emit(Level::Error, "pkgcmd.error", &format!("Error: {:#}", e), None);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.os_release {
        config.os_release_path = Some(path);
    }
    if let Some(family) = cli.family {
        config.family = Some(family);
    }

    let manager = || resolve_manager(&config);

    match cli.command {
        Commands::Families => {
            for manager in PackageManager::ALL {
                emit(
                    Level::Info,
                    "pkgcmd.family",
                    manager.name(),
                    Some(json!({ "family": manager, "display_name": manager.display_name() })),
                );
            }
        }
        Commands::Detect => {
            let manager = manager()?;
            let distro = OsRelease::read(&config.os_release_path())
                .map(|release| release.to_string())
                .unwrap_or_else(|_| "Unknown".to_string());
            emit(
                Level::Success,
                "pkgcmd.detect",
                &format!("{} ({})", manager.name(), distro),
                Some(json!({ "family": manager, "distro": distro })),
            );
        }
        Commands::Update => {
            let manager = manager()?;
            print_command("update", manager, manager.update()?);
        }
        Commands::Upgrade => {
            let manager = manager()?;
            print_command("upgrade", manager, manager.upgrade()?);
        }
        Commands::Install { packages } => {
            let manager = manager()?;
            print_command("install", manager, manager.install(&packages)?);
        }
        Commands::Remove { packages } => {
            let manager = manager()?;
            print_command("remove", manager, manager.remove(&packages)?);
        }
        Commands::Installed { package } => {
            let manager = manager()?;
            print_command("installed", manager, manager.is_installed(&package)?);
        }
        Commands::Version { package } => {
            let manager = manager()?;
            let (installed, latest) = manager.version_check(&package)?;
            emit(
                Level::Info,
                "pkgcmd.version",
                &format!("{}\n{}", installed, latest),
                Some(json!({ "family": manager, "installed": installed, "latest": latest })),
            );
        }
    }

    Ok(())
}

/// Use the pinned family when there is one, otherwise detect.
fn resolve_manager(config: &Config) -> Result<PackageManager> {
    if let Some(manager) = config.pinned_family()? {
        return Ok(manager);
    }

    let metrics = Arc::new(AtomicMetrics::new());
    let detector = config.detector().with_metrics(metrics.clone());
    let result = detector.detect();

    if ui::is_debug_enabled() {
        emit(
            Level::Debug,
            "detect.metrics",
            &format!("Detection counters: {:?}", metrics.snapshot()),
            serde_json::to_value(metrics.snapshot()).ok(),
        );
    }

    result.with_context(|| {
        format!(
            "Could not determine the package manager from {} or PATH",
            detector.os_release_path().display()
        )
    })
}

fn print_command(operation: &str, manager: PackageManager, command: String) {
    emit(
        Level::Info,
        &format!("pkgcmd.{}", operation),
        &command,
        Some(json!({ "family": manager, "operation": operation, "command": command })),
    );
}
