//! Scripted in-process agent for session tests

use hostwright_client::HostAddress;
use hostwright_proto::{
    AgentHello, ClientHello, OsFamily, Request, Response, read_frame, write_frame,
};
use tokio::net::TcpListener;

/// Spawn an agent that answers the handshake with `version`/`os` and
/// then plays back `responses`, one per incoming request.
pub async fn scripted_agent(version: u32, os: OsFamily, responses: Vec<Response>) -> HostAddress {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();

        let _hello: ClientHello = read_frame(&mut sock).await.unwrap();
        write_frame(&mut sock, &AgentHello { version, os })
            .await
            .unwrap();

        for response in responses {
            if read_frame::<_, Request>(&mut sock).await.is_err() {
                return;
            }
            write_frame(&mut sock, &response).await.unwrap();
        }

        // Keep the channel open until the client hangs up.
        let _ = read_frame::<_, Request>(&mut sock).await;
    });

    HostAddress::new("127.0.0.1", port, 1)
}
