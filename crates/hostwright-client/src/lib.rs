//! hostwright-client: Session layer for driving a hostwright agent
//!
//! Owns the two channels to one managed host: the control channel that
//! carries request/response pairs, and the transfer channel that
//! carries file chunks. Primitive executors live in
//! `hostwright-primitives` and borrow a [`Host`] per invocation.
//!
//! # Examples
//!
//! ```no_run
//! use hostwright_client::{Host, HostAddress};
//! use hostwright_proto::{Payload, Request};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let addr = HostAddress::from_file("nodes/web1.toml")?;
//! let mut host = Host::connect(addr).await?;
//!
//! match host.send(Request::FileExists { path: "/etc/motd".into() }).await? {
//!     Payload::Bool(exists) => println!("motd present: {exists}"),
//!     other => println!("unexpected payload: {other:?}"),
//! }
//!
//! host.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! Sessions are independent: a `web` host and a `db` host may be driven
//! concurrently without coordination. Within one session, operations
//! are issued one at a time; `&mut Host` enforces that at compile
//! time.

pub mod address;
pub mod error;
pub mod session;
pub mod transfer;

pub use address::HostAddress;
pub use error::{ClientError, Result};
pub use session::Host;
pub use transfer::DEFAULT_CHUNK_SIZE;
