//! rewind-dump
//!
//! Listens like a viewer would, accepts a single client and logs every
//! decoded frame. Useful for checking what a strategy actually sends.

use std::io::BufReader;
use std::net::TcpListener;

use clap::Parser;
use rewind_client::protocol::{decode_payload, read_envelope_raw};
use rewind_client::RewindError;
use tracing_subscriber::{fmt, EnvFilter};

/// Protocol dump listener
#[derive(Parser, Debug)]
#[command(name = "rewind-dump")]
#[command(about = "Accept one viewer-protocol client and log its frames")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:7000")]
    listen: String,

    /// Log every record, not just per-frame summaries
    #[arg(short, long)]
    verbose: bool,

    /// Stop after this many frames (0 = until the client disconnects)
    #[arg(short = 'n', long, default_value = "0")]
    frames: u64,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rewind_client=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("rewind-dump v{}", rewind_client::VERSION);

    let listener = match TcpListener::bind(&args.listen) {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Waiting for a client on {}", args.listen);

    let (stream, peer) = match listener.accept() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Accept failed: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Client connected from {}", peer);

    let mut reader = BufReader::new(stream);
    let mut frame_no: u64 = 0;

    loop {
        let payload = match read_envelope_raw(&mut reader) {
            Ok(p) => p,
            Err(RewindError::Io(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                tracing::info!("Client {} disconnected after {} frames", peer, frame_no);
                break;
            }
            Err(e) => {
                tracing::error!("Stream error: {}", e);
                std::process::exit(1);
            }
        };

        frame_no += 1;

        match decode_payload(&payload) {
            Ok(commands) => {
                tracing::info!(
                    "Frame {}: {} records, {} bytes",
                    frame_no,
                    commands.len(),
                    payload.len()
                );
                if args.verbose {
                    for command in &commands {
                        tracing::info!("  {:?}", command);
                    }
                }
            }
            Err(e) => tracing::warn!("Frame {}: undecodable payload: {}", frame_no, e),
        }

        if args.frames > 0 && frame_no >= args.frames {
            break;
        }
    }
}
