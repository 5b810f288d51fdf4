//! # rewind-client
//!
//! A debug-visualization client that streams drawing primitives to an
//! external viewer process:
//! - Compact little-endian binary command records
//! - One length-prefixed envelope per simulated frame
//! - Fire-and-forget TCP transport (no retries, no reconnects)
//! - A `Canvas` capability with active and no-op implementations
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Strategy / Simulation Code                   │
//! │               (holds a Box<dyn Canvas>)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ circle / rect / line / unit / message / area
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    RewindClient                              │
//! │         (or NullCanvas when disabled / unreachable)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │FrameEncoder │  finish  │  Transport  │
//!   │ (BytesMut)  │ ───────► │ (TcpStream) │ ──► viewer
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod frame;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RewindError, Result};
pub use config::Config;
pub use client::{canvas_from_config, Canvas, NullCanvas, RewindClient, SharedCanvas};
pub use frame::FrameEncoder;
pub use protocol::{AreaType, Color, Command, Side, UnitSpec, UnitType};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rewind-client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
