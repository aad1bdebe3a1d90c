//! The primitive for running shell commands on a managed host
//!
//! A [`Command`] is a reusable descriptor: construct it once, execute
//! it against as many hosts as you like. Execution never mutates the
//! stored text.
//!
//! ```no_run
//! use hostwright_client::{Host, HostAddress};
//! use hostwright_primitives::Command;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut web = Host::connect(HostAddress::from_file("nodes/web.toml")?).await?;
//! let mut db = Host::connect(HostAddress::from_file("nodes/db.toml")?).await?;
//!
//! let cmd = Command::new("whoami");
//! let web_result = cmd.exec(&mut web).await?;
//! let db_result = cmd.exec(&mut db).await?;
//! assert!(web_result.success() && db_result.success());
//! # Ok(())
//! # }
//! ```

use tracing::instrument;

use hostwright_client::Host;
use hostwright_proto::{ExecOutcome, Request};

use crate::error::Result;
use crate::reply;

/// A shell command to run on a managed host.
///
/// The string is passed to the remote shell verbatim; quoting and
/// escaping are the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    cmd: String,
}

impl Command {
    /// Create a new command.
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }

    /// The command text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.cmd
    }

    /// Run the command on `host` and wait for it to finish.
    ///
    /// A nonzero exit code is not an error: the command ran and failed,
    /// and the outcome says so. Only session-level failures are
    /// returned as errors.
    ///
    /// # Errors
    /// Propagates session errors (`Transport`, `Remote`, `Closed`).
    #[instrument(skip(self, host), fields(cmd = %self.cmd))]
    pub async fn exec(&self, host: &mut Host) -> Result<ExecOutcome> {
        let payload = host
            .send(Request::RunCommand {
                cmd: self.cmd.clone(),
            })
            .await?;
        reply::exec(payload)
    }
}
