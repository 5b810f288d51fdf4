//! Protocol Module
//!
//! Defines the wire protocol spoken to the viewer (client → viewer only).
//!
//! ## Protocol Format
//!
//! ### Envelope Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ 'b' (1)  │ Len (4)  │     Payload (records)       │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Record Tags
//! - 'c': circle
//! - 'r': rectangle
//! - 'l': line
//! - 'u': living unit
//! - 'm': message
//! - 'a': area
//! - 'e': optional end-of-frame marker
//!
//! There is no handshake and no response traffic.

mod command;
mod types;
mod codec;

pub use command::{Command, CommandType};
pub use types::{AreaType, Color, Side, UnitSpec, UnitType};
pub use codec::{
    decode_command, decode_envelope, decode_payload, encode_command, encode_envelope,
    read_envelope, read_envelope_raw, split_envelope, write_envelope, ENVELOPE_HEADER_SIZE,
    MAX_FRAME_LEN, MAX_MESSAGE_LEN, MAX_READ_PAYLOAD,
};
