//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Envelope Format (one per frame)
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ 'b' (1)  │ Len (4)  │     Payload (records)       │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//! `Len` is a little-endian `i32` equal to the payload byte count.
//!
//! ### Records by Tag (all fields little-endian)
//! - 'c' circle:  x, y, r (f32) + color (i32)
//! - 'r' rect:    x1, y1, x2, y2 (f32) + color (i32)
//! - 'l' line:    x1, y1, x2, y2 (f32) + color (i32)
//! - 'u' unit:    x, y, r (f32) + hp, max_hp (i32) + unit_type, side (i16) + course (f32)
//! - 'm' message: len (i32) + len bytes of UTF-8
//! - 'a' area:    x, y (i32) + area_type (i16)
//! - 'e' end:     empty

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Color, Command, CommandType};
use crate::error::{RewindError, Result};

/// Envelope header size: 1 byte marker + 4 bytes length
pub const ENVELOPE_HEADER_SIZE: usize = 5;

/// Largest message text representable by the `i32` length field
pub const MAX_MESSAGE_LEN: usize = i32::MAX as usize;

/// Largest payload representable by the envelope's `i32` length field
pub const MAX_FRAME_LEN: usize = i32::MAX as usize;

/// Largest envelope payload accepted when decoding (16 MB)
pub const MAX_READ_PAYLOAD: usize = 16 * 1024 * 1024;

// =============================================================================
// Record Encoding
// =============================================================================

/// Append one record (tag + payload) to `buf`.
///
/// On error nothing is appended.
pub fn encode_command(command: &Command, buf: &mut BytesMut) -> Result<()> {
    if let Command::Message { text } = command {
        if text.len() > MAX_MESSAGE_LEN {
            return Err(RewindError::MessageTooLong {
                len: text.len(),
                max: MAX_MESSAGE_LEN,
            });
        }
    }

    buf.reserve(command.encoded_len());
    buf.put_u8(command.command_type().tag());

    match command {
        Command::Begin | Command::End => {}
        Command::Circle { x, y, r, color } => {
            buf.put_f32_le(*x);
            buf.put_f32_le(*y);
            buf.put_f32_le(*r);
            buf.put_i32_le(color.raw());
        }
        Command::Rect { x1, y1, x2, y2, color } | Command::Line { x1, y1, x2, y2, color } => {
            buf.put_f32_le(*x1);
            buf.put_f32_le(*y1);
            buf.put_f32_le(*x2);
            buf.put_f32_le(*y2);
            buf.put_i32_le(color.raw());
        }
        Command::Unit {
            x,
            y,
            r,
            hp,
            max_hp,
            unit_type,
            side,
            course,
        } => {
            buf.put_f32_le(*x);
            buf.put_f32_le(*y);
            buf.put_f32_le(*r);
            buf.put_i32_le(*hp);
            buf.put_i32_le(*max_hp);
            buf.put_i16_le(*unit_type);
            buf.put_i16_le(*side);
            buf.put_f32_le(*course);
        }
        Command::Message { text } => {
            buf.put_i32_le(text.len() as i32);
            buf.put_slice(text.as_bytes());
        }
        Command::Area { x, y, area_type } => {
            buf.put_i32_le(*x);
            buf.put_i32_le(*y);
            buf.put_i16_le(*area_type);
        }
    }

    Ok(())
}

// =============================================================================
// Envelope Encoding
// =============================================================================

/// Wrap a frame payload in its envelope
///
/// Format: 'b' (1) + payload_len (4, LE) + payload
pub fn encode_envelope(payload: &[u8]) -> Result<Bytes> {
    if payload.len() > MAX_FRAME_LEN {
        return Err(RewindError::FrameTooLarge {
            len: payload.len(),
            max: MAX_FRAME_LEN,
        });
    }

    let mut envelope = BytesMut::with_capacity(ENVELOPE_HEADER_SIZE + payload.len());
    envelope.put_u8(CommandType::Begin.tag());
    envelope.put_i32_le(payload.len() as i32);
    envelope.put_slice(payload);

    Ok(envelope.freeze())
}

// =============================================================================
// Decoding
// =============================================================================

fn ensure(buf: &[u8], needed: usize, what: &str) -> Result<()> {
    if buf.len() < needed {
        return Err(RewindError::Protocol(format!(
            "{}: expected {} bytes, got {}",
            what,
            needed,
            buf.len()
        )));
    }
    Ok(())
}

/// Decode one record from the front of `bytes`
///
/// Returns the command and number of bytes consumed
pub fn decode_command(bytes: &[u8]) -> Result<(Command, usize)> {
    ensure(bytes, 1, "Missing record tag")?;

    let tag = bytes[0];
    let command_type = CommandType::from_tag(tag).ok_or_else(|| {
        RewindError::Protocol(format!("Unknown record tag: 0x{:02x}", tag))
    })?;

    let mut cur = &bytes[1..];

    if let Some(size) = command_type.payload_size() {
        ensure(cur, size, &format!("Truncated {:?} record", command_type))?;
    }

    let command = match command_type {
        CommandType::Begin => Command::Begin,
        CommandType::End => Command::End,
        CommandType::Circle => Command::Circle {
            x: cur.get_f32_le(),
            y: cur.get_f32_le(),
            r: cur.get_f32_le(),
            color: Color(cur.get_i32_le()),
        },
        CommandType::Rect => Command::Rect {
            x1: cur.get_f32_le(),
            y1: cur.get_f32_le(),
            x2: cur.get_f32_le(),
            y2: cur.get_f32_le(),
            color: Color(cur.get_i32_le()),
        },
        CommandType::Line => Command::Line {
            x1: cur.get_f32_le(),
            y1: cur.get_f32_le(),
            x2: cur.get_f32_le(),
            y2: cur.get_f32_le(),
            color: Color(cur.get_i32_le()),
        },
        CommandType::Unit => Command::Unit {
            x: cur.get_f32_le(),
            y: cur.get_f32_le(),
            r: cur.get_f32_le(),
            hp: cur.get_i32_le(),
            max_hp: cur.get_i32_le(),
            unit_type: cur.get_i16_le(),
            side: cur.get_i16_le(),
            course: cur.get_f32_le(),
        },
        CommandType::Area => Command::Area {
            x: cur.get_i32_le(),
            y: cur.get_i32_le(),
            area_type: cur.get_i16_le(),
        },
        CommandType::Message => {
            ensure(cur, 4, "Message record: missing length")?;
            let len = cur.get_i32_le();
            if len < 0 {
                return Err(RewindError::Protocol(format!(
                    "Message record: negative length {}",
                    len
                )));
            }
            let len = len as usize;
            ensure(cur, len, "Message record: incomplete text")?;
            let text = std::str::from_utf8(&cur[..len])
                .map_err(|e| RewindError::Protocol(format!("Message record: {}", e)))?
                .to_string();
            cur.advance(len);
            Command::Message { text }
        }
    };

    let consumed = bytes.len() - cur.len();
    Ok((command, consumed))
}

/// Decode a whole frame payload into its records, in emission order
pub fn decode_payload(mut bytes: &[u8]) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    while !bytes.is_empty() {
        let (command, consumed) = decode_command(bytes)?;
        commands.push(command);
        bytes = &bytes[consumed..];
    }
    Ok(commands)
}

/// Split an envelope off the front of `bytes`
///
/// Returns the payload slice and number of bytes consumed
pub fn split_envelope(bytes: &[u8]) -> Result<(&[u8], usize)> {
    ensure(bytes, ENVELOPE_HEADER_SIZE, "Incomplete envelope header")?;

    let payload_len = parse_header(&bytes[..ENVELOPE_HEADER_SIZE])?;
    let total_len = ENVELOPE_HEADER_SIZE + payload_len;
    ensure(bytes, total_len, "Incomplete envelope payload")?;

    Ok((&bytes[ENVELOPE_HEADER_SIZE..total_len], total_len))
}

/// Decode the first envelope in `bytes` into its records
pub fn decode_envelope(bytes: &[u8]) -> Result<Vec<Command>> {
    let (payload, _) = split_envelope(bytes)?;
    decode_payload(payload)
}

fn parse_header(header: &[u8]) -> Result<usize> {
    if header[0] != CommandType::Begin.tag() {
        return Err(RewindError::Protocol(format!(
            "Bad envelope marker: 0x{:02x}",
            header[0]
        )));
    }

    let payload_len = i32::from_le_bytes([header[1], header[2], header[3], header[4]]);
    if payload_len < 0 {
        return Err(RewindError::Protocol(format!(
            "Negative envelope length: {}",
            payload_len
        )));
    }

    // Validate payload length before anything is allocated for it
    let payload_len = payload_len as usize;
    if payload_len > MAX_READ_PAYLOAD {
        return Err(RewindError::Protocol(format!(
            "Envelope payload too large: {} bytes (max {})",
            payload_len, MAX_READ_PAYLOAD
        )));
    }

    Ok(payload_len)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one envelope from a stream and return its raw payload
///
/// Blocks until a complete envelope is received or an error occurs
pub fn read_envelope_raw<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut header = [0u8; ENVELOPE_HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let payload_len = parse_header(&header)?;

    let mut payload = vec![0u8; payload_len];
    if payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    Ok(payload)
}

/// Read one envelope from a stream and decode its records
pub fn read_envelope<R: Read>(reader: &mut R) -> Result<Vec<Command>> {
    let payload = read_envelope_raw(reader)?;
    decode_payload(&payload)
}

/// Wrap a payload in an envelope and write it to a stream in one call
pub fn write_envelope<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let envelope = encode_envelope(payload)?;
    writer.write_all(&envelope)?;
    writer.flush()?;
    Ok(())
}
