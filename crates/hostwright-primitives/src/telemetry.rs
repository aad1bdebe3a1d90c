//! One-shot telemetry collection

use tracing::instrument;

use hostwright_client::Host;
use hostwright_proto::{Payload, Request, TelemetrySnapshot};

use crate::error::{PrimitiveError, Result};

/// Fetch a point-in-time snapshot of host facts.
///
/// The snapshot is immutable once returned; call again for fresh data.
///
/// # Errors
/// Propagates session errors.
#[instrument(skip(host), fields(host = %host.address().hostname))]
pub async fn load(host: &mut Host) -> Result<TelemetrySnapshot> {
    match host.send(Request::TelemetryLoad).await? {
        Payload::Snapshot(snapshot) => Ok(snapshot),
        other => Err(PrimitiveError::unexpected("snapshot", &other)),
    }
}
