//! The server role: listens for the friend's connection and prints what
//! they say.

use std::io;
use std::net::Ipv4Addr;

use futures::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{error, info, warn};

use crate::session::Session;

/// Run the server role until the session ends.
///
/// Binds the local port, accepts one friend at a time and prints every line
/// they send. Logs the server shutdown notice exactly once, whichever way
/// the role ends.
pub async fn run(port: u16, session: &Session) {
    if let Err(error) = listen(port, session).await {
        if session.is_running() {
            error!("Server error: {error}");
        }
    }
    info!("Server shutting down");
}

/// Accept loop: at most one friend is served at a time; when they
/// disconnect the listener waits for the next one.
async fn listen(port: u16, session: &Session) -> io::Result<()> {
    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
    info!("Server listening on port {port}");
    while session.is_running() {
        let accepted = tokio::select! {
            () = session.cancelled() => break,
            accepted = listener.accept() => accepted,
        };
        let (stream, address) = accepted?;
        info!("Friend connected from {address}");
        serve(stream, session).await;
    }
    Ok(())
}

/// Print the friend's lines until they disconnect or the session ends.
async fn serve(stream: TcpStream, session: &Session) {
    let mut lines = FramedRead::new(stream, LinesCodec::new());
    loop {
        let line = tokio::select! {
            () = session.cancelled() => return,
            line = lines.next() => line,
        };
        match line {
            Some(Ok(line)) => println!("Friend: {line}"),
            Some(Err(error)) => {
                if session.is_running() {
                    warn!("Lost connection to friend: {error}");
                }
                return;
            }
            None => {
                info!("Friend disconnected");
                return;
            }
        }
    }
}
