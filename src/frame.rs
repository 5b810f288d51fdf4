//! Frame Encoder
//!
//! Accumulates drawing records for the current frame and turns them into
//! exactly one envelope when the frame ends.
//!
//! ## Invariants
//! - The pending buffer always holds zero or more complete records
//! - A record never spans two frames
//! - `finish` leaves the buffer empty, whether or not it succeeded

use bytes::{Bytes, BytesMut};

use crate::error::Result;
use crate::protocol::{encode_command, encode_envelope, Color, Command, UnitSpec};

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;

/// Builds frame payloads out of drawing records
#[derive(Debug)]
pub struct FrameEncoder {
    /// Records issued since the last `finish`
    buf: BytesMut,

    /// Number of records in `buf`
    commands: usize,

    /// Append an `e` record before sealing each frame
    end_marker: bool,
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameEncoder {
    /// Create an encoder that emits plain envelopes
    pub fn new() -> Self {
        Self::with_end_marker(false)
    }

    /// Create an encoder, optionally terminating each payload with an `e` record
    pub fn with_end_marker(end_marker: bool) -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            commands: 0,
            end_marker,
        }
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Filled circle centred at `(x, y)`
    pub fn circle(&mut self, x: f64, y: f64, r: f64, color: impl Into<Color>) {
        self.push_infallible(Command::Circle {
            x: x as f32,
            y: y as f32,
            r: r as f32,
            color: color.into(),
        });
    }

    /// Rectangle with opposite corners `(x1, y1)` and `(x2, y2)`
    pub fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: impl Into<Color>) {
        self.push_infallible(Command::Rect {
            x1: x1 as f32,
            y1: y1 as f32,
            x2: x2 as f32,
            y2: y2 as f32,
            color: color.into(),
        });
    }

    /// Line segment from `(x1, y1)` to `(x2, y2)`
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: impl Into<Color>) {
        self.push_infallible(Command::Line {
            x1: x1 as f32,
            y1: y1 as f32,
            x2: x2 as f32,
            y2: y2 as f32,
            color: color.into(),
        });
    }

    /// Living unit: circle with an HP bar
    pub fn living_unit(&mut self, unit: &UnitSpec) {
        self.push_infallible(Command::Unit {
            x: unit.x as f32,
            y: unit.y as f32,
            r: unit.r as f32,
            hp: unit.hp,
            max_hp: unit.max_hp,
            unit_type: unit.unit_type,
            side: unit.side,
            course: unit.course as f32,
        });
    }

    /// Text for the message panel.
    ///
    /// Fails with `MessageTooLong` (and appends nothing) when the text does
    /// not fit the record's `i32` length field.
    pub fn message(&mut self, text: &str) -> Result<()> {
        self.push(&Command::Message {
            text: text.to_string(),
        })
    }

    /// Area cell at grid position `(x, y)`
    pub fn area(&mut self, x: i32, y: i32, area_type: impl Into<i16>) {
        self.push_infallible(Command::Area {
            x,
            y,
            area_type: area_type.into(),
        });
    }

    /// Append an already-built record
    pub fn push(&mut self, command: &Command) -> Result<()> {
        encode_command(command, &mut self.buf)?;
        self.commands += 1;
        Ok(())
    }

    fn push_infallible(&mut self, command: Command) {
        // Only message records can fail to encode.
        if self.push(&command).is_err() {
            tracing::warn!("Dropped unencodable {:?} record", command.command_type());
        }
    }

    // =========================================================================
    // Frame Boundary
    // =========================================================================

    /// Seal the current frame into one envelope and start a new frame.
    ///
    /// The pending buffer is cleared even when the envelope cannot be built.
    pub fn finish(&mut self) -> Result<Bytes> {
        if self.end_marker {
            self.push_infallible(Command::End);
        }

        let envelope = encode_envelope(&self.buf);
        self.clear();
        envelope
    }

    /// Drop every record of the current frame
    pub fn clear(&mut self) {
        self.buf.clear();
        self.commands = 0;
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Bytes pending for the current frame
    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }

    /// Records pending for the current frame
    pub fn command_count(&self) -> usize {
        self.commands
    }

    /// Raw pending payload
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
