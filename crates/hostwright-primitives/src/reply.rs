//! Payload narrowing shared by the executors
//!
//! Each executor knows which payload variant its request is answered
//! with; anything else is a protocol violation.

use hostwright_proto::{ExecOutcome, FileOwner, Payload};

use crate::error::{PrimitiveError, Result};

pub(crate) fn unit(payload: Payload) -> Result<()> {
    match payload {
        Payload::Unit => Ok(()),
        other => Err(PrimitiveError::unexpected("unit", &other)),
    }
}

pub(crate) fn boolean(payload: Payload) -> Result<bool> {
    match payload {
        Payload::Bool(value) => Ok(value),
        other => Err(PrimitiveError::unexpected("bool", &other)),
    }
}

pub(crate) fn exec(payload: Payload) -> Result<ExecOutcome> {
    match payload {
        Payload::Exec(outcome) => Ok(outcome),
        other => Err(PrimitiveError::unexpected("exec", &other)),
    }
}

pub(crate) fn mode(payload: Payload) -> Result<u16> {
    match payload {
        Payload::Mode(bits) => Ok(bits),
        other => Err(PrimitiveError::unexpected("mode", &other)),
    }
}

pub(crate) fn owner(payload: Payload) -> Result<FileOwner> {
    match payload {
        Payload::Owner(owner) => Ok(owner),
        other => Err(PrimitiveError::unexpected("owner", &other)),
    }
}
