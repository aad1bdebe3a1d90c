//! The host session: two channels to one managed host

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info, instrument};

use hostwright_proto::{
    AgentHello, ClientHello, FrameError, OsFamily, PROTOCOL_VERSION, Payload, Request, Response,
    read_frame, write_frame,
};

use crate::address::HostAddress;
use crate::error::{ClientError, Result};

/// One session with one managed host.
///
/// Connecting opens the control channel eagerly and performs the
/// version/OS handshake; the transfer channel is opened lazily on the
/// first file upload. All operations take `&mut self`: a session serves
/// one logical caller at a time, and separate hosts are fully
/// independent.
///
/// A failed request leaves the session usable. The session does not
/// retry anything on its own.
#[derive(Debug)]
pub struct Host {
    addr: HostAddress,
    os: OsFamily,
    agent_version: u32,
    control: Option<TcpStream>,
    transfer: Option<TcpStream>,
}

impl Host {
    /// Connect to a managed host.
    ///
    /// Fails fast if the control channel cannot be opened or the agent
    /// speaks an incompatible protocol revision. There is no retry.
    ///
    /// # Errors
    /// `ClientError::Connection` if the channel cannot be opened,
    /// `ClientError::ProtocolMismatch` on a version disagreement.
    #[instrument(skip(addr), fields(host = %addr.hostname, port = addr.api_port))]
    pub async fn connect(addr: HostAddress) -> Result<Host> {
        let control_addr = format!("{}:{}", addr.hostname, addr.api_port);
        let mut control =
            TcpStream::connect(&control_addr)
                .await
                .map_err(|source| ClientError::Connection {
                    addr: control_addr.clone(),
                    source,
                })?;

        let hello = ClientHello {
            version: PROTOCOL_VERSION,
            auth_relay: addr.auth_relay.clone(),
        };
        write_frame(&mut control, &hello)
            .await
            .map_err(|e| handshake_error(&control_addr, e))?;

        let agent: AgentHello = read_frame(&mut control)
            .await
            .map_err(|e| handshake_error(&control_addr, e))?;

        if agent.version != PROTOCOL_VERSION {
            return Err(ClientError::ProtocolMismatch {
                agent: agent.version,
                client: PROTOCOL_VERSION,
            });
        }

        info!(os = %agent.os, "connected");

        Ok(Host {
            addr,
            os: agent.os,
            agent_version: agent.version,
            control: Some(control),
            transfer: None,
        })
    }

    /// OS family the agent reported at connect time.
    #[must_use]
    pub fn os(&self) -> OsFamily {
        self.os
    }

    /// Protocol revision the agent announced.
    #[must_use]
    pub fn agent_version(&self) -> u32 {
        self.agent_version
    }

    /// Address this session was opened against.
    #[must_use]
    pub fn address(&self) -> &HostAddress {
        &self.addr
    }

    /// Check whether the control channel is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.control.is_some()
    }

    /// Send one request and wait for its response.
    ///
    /// # Errors
    /// `ClientError::Remote` when the agent reports a structured
    /// failure, `ClientError::Transport` on a channel failure,
    /// `ClientError::Closed` after [`close`](Self::close).
    pub async fn send(&mut self, request: Request) -> Result<Payload> {
        let control = self.control.as_mut().ok_or(ClientError::Closed)?;

        debug!(host = %self.addr.hostname, request = ?request, "send");

        write_frame(control, &request).await?;
        match read_frame::<_, Response>(control).await? {
            Response::Ok { payload } => Ok(payload),
            Response::Error { detail } => Err(ClientError::Remote(detail)),
        }
    }

    /// The transfer channel, opened on first use.
    ///
    /// # Errors
    /// `ClientError::Closed` if the session is closed,
    /// `ClientError::Connection` if the channel cannot be opened.
    pub async fn transfer_channel(&mut self) -> Result<&mut TcpStream> {
        if self.control.is_none() {
            return Err(ClientError::Closed);
        }

        if self.transfer.is_none() {
            let transfer_addr = format!("{}:{}", self.addr.hostname, self.addr.transfer_port);
            let stream =
                TcpStream::connect(&transfer_addr)
                    .await
                    .map_err(|source| ClientError::Connection {
                        addr: transfer_addr.clone(),
                        source,
                    })?;
            info!(addr = %transfer_addr, "transfer channel open");
            self.transfer = Some(stream);
        }

        self.transfer.as_mut().ok_or(ClientError::Closed)
    }

    /// Close both channels. Safe to call more than once.
    #[instrument(skip(self), fields(host = %self.addr.hostname))]
    pub async fn close(&mut self) {
        if let Some(mut control) = self.control.take() {
            let _ = control.shutdown().await;
        }
        if let Some(mut transfer) = self.transfer.take() {
            let _ = transfer.shutdown().await;
        }
    }
}

fn handshake_error(addr: &str, err: FrameError) -> ClientError {
    // A channel that dies during the hello never came up from the
    // caller's point of view.
    match err {
        FrameError::Io(source) => ClientError::Connection {
            addr: addr.to_string(),
            source,
        },
        other => other.into(),
    }
}
