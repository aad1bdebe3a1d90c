//! hostwright-primitives: Typed operations against a managed host
//!
//! The executors encode an intended operation into a request, send it
//! over a [`Host`](hostwright_client::Host) session, and interpret the
//! structured result. They hold no session state: the same descriptor
//! is reusable against any number of hosts.
//!
//! - [`Command`]: run a shell command verbatim
//! - [`Directory`] / [`File`]: filesystem management, including
//!   chunked upload with backup-on-overwrite
//! - [`Package`]: install/uninstall through an OS-resolved provider
//! - [`Service`]: action dispatch through runnables, with aliasing
//! - [`telemetry`]: one-shot host facts

pub mod command;
pub mod directory;
pub mod error;
pub mod file;
pub mod outcome;
pub mod package;
pub mod provider;
pub mod service;
pub mod telemetry;

mod reply;

pub use command::Command;
pub use directory::{Directory, DirectoryOptions};
pub use error::{PrimitiveError, Result};
pub use file::{File, UploadOptions};
pub use outcome::ApplyOutcome;
pub use package::Package;
pub use service::{Runnable, Service};
