//! Network Module
//!
//! Transport to the viewer process.
//!
//! ## Model
//! - One blocking TCP connection, opened once at startup
//! - Raw byte writes, one write per envelope
//! - No reconnect, no retry, no buffering beyond the OS socket buffer

mod connection;

pub use connection::{Connection, Transport};
