//! The primitive for controlling services on a managed host
//!
//! A [`Service`] maps action names ("start", "stop", …) onto
//! [`Runnable`]s. The `Service` runnable kind goes through the host's
//! native service manager; the `Command` kind runs a script through the
//! shell, for daemons with no service-manager integration.
//!
//! ```no_run
//! use hostwright_client::{Host, HostAddress};
//! use hostwright_primitives::{Runnable, Service};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut host = Host::connect(HostAddress::from_file("nodes/web.toml")?).await?;
//!
//! let nginx = Service::new(Runnable::Service("nginx".into()));
//! let outcome = nginx.action(&mut host, "start").await?;
//! # Ok(())
//! # }
//! ```
//!
//! Individual actions can be mapped to their own runnables, with an
//! optional default for everything unmapped:
//!
//! ```
//! use std::collections::HashMap;
//! use hostwright_primitives::{Runnable, Service};
//!
//! let service = Service::from_actions(HashMap::from([
//!     ("status".to_string(), Runnable::Command("/usr/bin/my_svc_status".into())),
//! ]))
//! .with_default(Runnable::Service("my_svc".into()));
//! ```
//!
//! An alias table renames an action before lookup, useful when a
//! daemon's verbs differ across platforms. Substitution is a single
//! level: an alias pointing at another alias is rejected at
//! construction.
//!
//! ```
//! use std::collections::HashMap;
//! use hostwright_primitives::{Runnable, Service};
//!
//! let service = Service::new(Runnable::Service("my_svc".into()))
//!     .with_aliases(HashMap::from([("start".to_string(), "load".to_string())]))
//!     .unwrap();
//! ```

use std::collections::HashMap;

use tracing::instrument;

use hostwright_client::Host;
use hostwright_proto::{Payload, Request};

use crate::error::{PrimitiveError, Result};
use crate::outcome::ApplyOutcome;

/// What a service action executes.
///
/// Immutable once constructed. A default `Command` runnable gets the
/// action appended as an argument; a per-action `Command` runnable is
/// executed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Runnable {
    /// A shell command template.
    Command(String),
    /// A name known to the host's native service manager.
    Service(String),
}

/// A service on a managed host.
#[derive(Debug, Clone, Default)]
pub struct Service {
    actions: HashMap<String, Runnable>,
    default: Option<Runnable>,
    aliases: HashMap<String, String>,
}

impl Service {
    /// Create a service that dispatches `default` for every action.
    #[must_use]
    pub fn new(default: Runnable) -> Service {
        Service {
            actions: HashMap::new(),
            default: Some(default),
            aliases: HashMap::new(),
        }
    }

    /// Create a service from a per-action runnable map. Actions missing
    /// from the map fail with `UnknownAction` unless a default is added
    /// with [`with_default`](Self::with_default).
    #[must_use]
    pub fn from_actions(actions: HashMap<String, Runnable>) -> Service {
        Service {
            actions,
            default: None,
            aliases: HashMap::new(),
        }
    }

    /// Set the fallback runnable for unmapped actions.
    #[must_use]
    pub fn with_default(mut self, default: Runnable) -> Service {
        self.default = Some(default);
        self
    }

    /// Set the action alias table.
    ///
    /// # Errors
    /// `PrimitiveError::AliasChain` if any alias points at another
    /// alias key (including itself); the table must resolve in one
    /// step.
    pub fn with_aliases(mut self, aliases: HashMap<String, String>) -> Result<Service> {
        for (alias, target) in &aliases {
            if aliases.contains_key(target) {
                return Err(PrimitiveError::AliasChain {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }
        self.aliases = aliases;
        Ok(self)
    }

    /// Run a service action, e.g. "start" or "stop".
    ///
    /// Returns [`ApplyOutcome::NoOp`] when the backend reports the
    /// target state already held.
    ///
    /// # Errors
    /// `PrimitiveError::UnknownAction` when the action is unmapped and
    /// no default is configured; session errors otherwise.
    #[instrument(skip(self, host))]
    pub async fn action(&self, host: &mut Host, action: &str) -> Result<ApplyOutcome> {
        let request = self.encode(action)?;

        match host.send(request).await? {
            Payload::Exec(outcome) => Ok(ApplyOutcome::Changed(outcome)),
            Payload::NoOp => Ok(ApplyOutcome::NoOp),
            other => Err(PrimitiveError::unexpected("exec", &other)),
        }
    }

    /// Resolve an action to the request it dispatches.
    ///
    /// Resolution: substitute the alias (one level), look the result up
    /// in the action map, fall back to the default.
    fn encode(&self, action: &str) -> Result<Request> {
        let effective = self
            .aliases
            .get(action)
            .map(String::as_str)
            .unwrap_or(action);

        let (runnable, is_default) = match self.actions.get(effective) {
            Some(runnable) => (runnable, false),
            None => match &self.default {
                Some(runnable) => (runnable, true),
                None => return Err(PrimitiveError::UnknownAction(effective.to_string())),
            },
        };

        Ok(match runnable {
            Runnable::Service(name) => Request::ServiceAction {
                name: name.clone(),
                action: effective.to_string(),
            },
            Runnable::Command(cmd) => Request::RunCommand {
                cmd: if is_default {
                    format!("{cmd} {effective}")
                } else {
                    cmd.clone()
                },
            },
        })
    }
}
