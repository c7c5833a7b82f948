use clap::Parser;

/// Peer-to-peer chat between two sockets.
///
/// Listens on the local port for the friend's messages while forwarding
/// standard input, line by line, to the friend's listener. Type `exit` to
/// quit.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Port to listen on for the friend's messages.
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub local_port: u16,

    /// Host the friend is listening on.
    pub remote_host: String,

    /// Port the friend is listening on.
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub remote_port: u16,
}
