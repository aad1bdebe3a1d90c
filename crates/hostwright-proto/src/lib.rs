//! hostwright-proto: Wire contract between the client and the agent
//!
//! Contains the request/response types exchanged on the control channel,
//! the chunk frames exchanged on the transfer channel, the connect
//! handshake, and the frame codec both channels use.
//!
//! The framing is normative for both sides and is documented on the
//! [`frame`] module.

pub mod frame;
pub mod handshake;
pub mod os;
pub mod provider;
pub mod request;
pub mod response;
pub mod telemetry;
pub mod transfer;

pub use frame::{FrameError, MAX_FRAME_LEN, read_frame, write_frame};
pub use handshake::{AgentHello, ClientHello, PROTOCOL_VERSION};
pub use os::OsFamily;
pub use provider::PackageProvider;
pub use request::Request;
pub use response::{ExecOutcome, FileOwner, Payload, RemoteFailure, RemoteFailureKind, Response};
pub use telemetry::{CpuFacts, FsMount, NetInterface, OsInfo, TelemetrySnapshot};
pub use transfer::{TransferFrame, TransferReceipt};
