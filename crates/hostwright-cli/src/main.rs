//! hostwright CLI
//!
//! Drives a hostwright agent from the command line, addressed through a
//! TOML node-definition file.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use hostwright_client::{Host, HostAddress};
use hostwright_primitives::{
    ApplyOutcome, Command, File, Package, Runnable, Service, UploadOptions, telemetry,
};
use hostwright_proto::PackageProvider;

#[derive(Parser)]
#[command(name = "hostwright")]
#[command(about = "Typed client for driving a hostwright agent", long_about = None)]
struct Cli {
    /// Node-definition file (TOML) for the managed host
    #[arg(long)]
    node: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a shell command on the host
    Run {
        /// Command text, passed to the remote shell verbatim
        cmd: String,
    },
    /// Upload a local file to the host
    Push {
        local: PathBuf,
        remote: String,
        /// Back up a pre-existing destination under this suffix
        #[arg(long)]
        backup_suffix: Option<String>,
        /// Bytes per chunk on the transfer channel
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// Install a package
    Install {
        name: String,
        /// Pin a provider instead of using the OS default
        #[arg(long, value_parser = parse_provider)]
        provider: Option<PackageProvider>,
    },
    /// Uninstall a package
    Remove {
        name: String,
        #[arg(long, value_parser = parse_provider)]
        provider: Option<PackageProvider>,
    },
    /// Run an action against a system-managed service
    Service { name: String, action: String },
    /// Fetch a telemetry snapshot and print it as JSON
    Facts,
}

fn parse_provider(raw: &str) -> std::result::Result<PackageProvider, String> {
    raw.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let addr = HostAddress::from_file(&cli.node)?;
    let mut host = Host::connect(addr).await?;

    let exit_code = match cli.command {
        Commands::Run { cmd } => {
            let outcome = Command::new(cmd).exec(&mut host).await?;
            std::io::stdout().write_all(&outcome.stdout)?;
            std::io::stderr().write_all(&outcome.stderr)?;
            outcome.exit_code
        }
        Commands::Push {
            local,
            remote,
            backup_suffix,
            chunk_size,
        } => {
            let mut options = UploadOptions::default();
            if let Some(suffix) = backup_suffix {
                options = options.with_backup_suffix(suffix);
            }
            if let Some(size) = chunk_size {
                options = options.with_chunk_size(size);
            }
            File::new(&remote).upload(&mut host, &local, &options).await?;
            println!("uploaded {} to {remote}", local.display());
            0
        }
        Commands::Install { name, provider } => {
            let mut package = Package::new(&mut host, &name, provider).await?;
            let outcome = package.install(&mut host).await?;
            report_apply(&name, "install", &outcome)
        }
        Commands::Remove { name, provider } => {
            let mut package = Package::new(&mut host, &name, provider).await?;
            let outcome = package.uninstall(&mut host).await?;
            report_apply(&name, "remove", &outcome)
        }
        Commands::Service { name, action } => {
            let service = Service::new(Runnable::Service(name));
            let outcome = service.action(&mut host, &action).await?;
            match outcome.changed() {
                Some(result) => {
                    std::io::stdout().write_all(&result.stdout)?;
                    std::io::stderr().write_all(&result.stderr)?;
                    result.exit_code
                }
                None => {
                    println!("already in the requested state");
                    0
                }
            }
        }
        Commands::Facts => {
            let snapshot = telemetry::load(&mut host).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            0
        }
    };

    host.close().await;

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn report_apply(name: &str, verb: &str, outcome: &ApplyOutcome) -> i32 {
    match outcome.changed() {
        Some(result) if result.success() => {
            println!("{verb} {name}: done");
            0
        }
        Some(result) => {
            eprintln!("{verb} {name} failed: {}", result.stderr_lossy());
            result.exit_code
        }
        None => {
            println!("{verb} {name}: nothing to do");
            0
        }
    }
}
