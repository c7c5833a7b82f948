//! Peer-to-peer chat between two sockets.
//!
//! One process carries both halves of a conversation: a server listening on
//! a local port for the friend's messages, and a client connecting out to
//! the friend's listener to deliver lines typed locally. The two halves
//! share a [`Session`]; typing `exit` ends it, which unblocks both halves
//! and lets the process finish cleanly.
//!
//! ## Example
//!
//! ```text
//! parley 5000 localhost 5001
//! ```
//!
//! with a friend running the mirror image:
//!
//! ```text
//! parley 5001 localhost 5000
//! ```

pub mod client;
pub mod config;
pub mod server;
pub mod session;

use std::io;

use anyhow::Result;
use futures::Stream;
use tokio::signal::ctrl_c;
use tokio::spawn;
use tracing::{info, warn};

pub use config::Config;
pub use session::Session;

/// Run a whole chat session: both roles, plus the shutdown handshake
/// between them.
///
/// Completion of the client role (sentinel typed, input exhausted or
/// connection lost) ends the session; the server role is then cancelled and
/// awaited so it can finish its own teardown. Ctrl-C while waiting degrades
/// to an immediate shutdown without waiting for the server.
pub async fn run<In>(config: Config, input: In) -> Result<()>
where
    In: Stream<Item = io::Result<String>> + Send + Unpin + 'static,
{
    let Config {
        local_port,
        remote_host,
        remote_port,
    } = config;

    let session = Session::new();

    let server = spawn({
        let session = session.clone();
        async move { server::run(local_port, &session).await }
    });
    let mut client = spawn({
        let session = session.clone();
        async move { client::run(&remote_host, remote_port, &session, input).await }
    });

    tokio::select! {
        finished = &mut client => {
            finished?;
            session.shutdown();
            server.await?;
            info!("Application terminated");
        }
        interrupted = ctrl_c() => {
            interrupted?;
            session.shutdown();
            warn!("Interrupted, exiting without waiting for shutdown");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::channel::mpsc;
    use tokio::time::timeout;

    use super::{run, Config};

    fn config(local_port: u16, remote_port: u16) -> Config {
        Config {
            local_port,
            remote_host: "127.0.0.1".to_string(),
            remote_port,
        }
    }

    #[tokio::test]
    async fn two_instances_chat_and_leave_in_turn() {
        let (input_a, lines_a) = mpsc::unbounded();
        let (input_b, lines_b) = mpsc::unbounded();

        let a = tokio::spawn(run(config(9721, 9722), lines_a));
        let b = tokio::spawn(run(config(9722, 9721), lines_b));

        // Give both dialers time to connect.
        tokio::time::sleep(Duration::from_millis(300)).await;
        input_a.unbounded_send(Ok("hello".to_string())).unwrap();

        // B leaves; A stays in the chat until its own exit.
        input_b.unbounded_send(Ok("exit".to_string())).unwrap();
        timeout(Duration::from_secs(5), b)
            .await
            .unwrap()
            .unwrap()
            .unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!a.is_finished());

        input_a.unbounded_send(Ok("exit".to_string())).unwrap();
        timeout(Duration::from_secs(5), a)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn input_exhaustion_ends_the_whole_session() {
        let (input, lines) = mpsc::unbounded::<std::io::Result<String>>();

        // A single instance chatting with itself.
        let instance = tokio::spawn(run(config(9723, 9723), lines));
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Closing stdin ends the client role, which ends the session.
        drop(input);
        timeout(Duration::from_secs(5), instance)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }
}
