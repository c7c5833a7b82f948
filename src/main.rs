use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use parley::Config;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(error) => {
            let _ = error.print();
            match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                // Usage problems exit with status 1.
                _ => process::exit(1),
            }
        }
    };

    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let input = LinesStream::new(BufReader::new(stdin()).lines());
    parley::run(config, input).await
}
