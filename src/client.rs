//! The client role: dials the friend's listener and delivers local input.

use std::fmt::Display;
use std::io;
use std::time::Duration;

use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpStream;
use tokio::time::sleep;
use tokio_util::codec::{FramedWrite, LinesCodec};
use tracing::{error, info};

use crate::session::Session;

/// Typing this line (any case) ends the session instead of being sent.
pub const SENTINEL: &str = "exit";

/// Delay between outbound connection attempts.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// Run the client role: connect to the friend, retrying until the session
/// ends, then pump `input` lines into the connection.
///
/// Logs the client shutdown notice exactly once, whichever way the role
/// ends.
pub async fn run<In>(host: &str, port: u16, session: &Session, input: In)
where
    In: Stream<Item = io::Result<String>> + Unpin,
{
    if let Some(stream) = connect(host, port, session).await {
        info!("Connected to friend at {host}:{port}");
        println!("Start typing messages (type '{SENTINEL}' to quit):");
        let output = FramedWrite::new(stream, LinesCodec::new());
        forward_lines(input, output, session).await;
    }
    info!("Client shutting down");
}

/// Dial `host:port` until a connection is made, waiting [`RETRY_INTERVAL`]
/// between attempts. Returns `None` if the session ends first.
async fn connect(host: &str, port: u16, session: &Session) -> Option<TcpStream> {
    while session.is_running() {
        match TcpStream::connect((host, port)).await {
            Ok(stream) => return Some(stream),
            Err(error) => {
                info!(
                    "Failed to connect to {host}:{port} ({error}), retrying in {} seconds",
                    RETRY_INTERVAL.as_secs()
                );
                tokio::select! {
                    () = session.cancelled() => return None,
                    () = sleep(RETRY_INTERVAL) => {}
                }
            }
        }
    }
    None
}

/// Forward lines from `input` into `output` until the input runs dry, a
/// write fails, the session ends, or the [`SENTINEL`] line is read.
///
/// The sentinel ends the whole session and is never transmitted. The sink
/// is closed before returning.
pub async fn forward_lines<In, Out>(mut input: In, mut output: Out, session: &Session)
where
    In: Stream<Item = io::Result<String>> + Unpin,
    Out: Sink<String> + Unpin,
    Out::Error: Display,
{
    loop {
        let line = tokio::select! {
            () = session.cancelled() => break,
            line = input.next() => line,
        };
        match line {
            Some(Ok(line)) => {
                if line.eq_ignore_ascii_case(SENTINEL) {
                    session.shutdown();
                    break;
                }
                if let Err(error) = output.send(line).await {
                    if session.is_running() {
                        error!("Failed to send message: {error}");
                    }
                    break;
                }
            }
            Some(Err(error)) => {
                error!("Failed to read input: {error}");
                break;
            }
            None => break,
        }
    }
    let _ = output.close().await;
}
