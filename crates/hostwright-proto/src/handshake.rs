//! Connect handshake on the control channel
//!
//! The first exchange after the TCP connect: the client sends
//! [`ClientHello`], the agent answers [`AgentHello`]. The agent's reply
//! carries its detected OS family, which the client caches for provider
//! resolution so no later operation needs a separate detection
//! round-trip.

use serde::{Deserialize, Serialize};

use crate::os::OsFamily;

/// Protocol revision spoken by this crate. A version mismatch fails the
/// connect on the client side.
pub const PROTOCOL_VERSION: u32 = 1;

/// First frame on a fresh control channel, client to agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientHello {
    pub version: u32,
    /// `host:port` of the auth relay the client was configured with, if
    /// any, for the agent to verify against its own configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_relay: Option<String>,
}

/// Agent's answer to [`ClientHello`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentHello {
    pub version: u32,
    pub os: OsFamily,
}
