//! Command definitions
//!
//! Represents the drawing records carried inside a frame envelope.

use super::Color;

/// Command tags (one ASCII byte on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    Begin = b'b',
    End = b'e',
    Circle = b'c',
    Rect = b'r',
    Line = b'l',
    Unit = b'u',
    Message = b'm',
    Area = b'a',
}

impl CommandType {
    /// The wire tag byte
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Look up a command type by its wire tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'b' => Some(CommandType::Begin),
            b'e' => Some(CommandType::End),
            b'c' => Some(CommandType::Circle),
            b'r' => Some(CommandType::Rect),
            b'l' => Some(CommandType::Line),
            b'u' => Some(CommandType::Unit),
            b'm' => Some(CommandType::Message),
            b'a' => Some(CommandType::Area),
            _ => None,
        }
    }

    /// Fixed payload size following the tag, `None` for variable-length records
    pub fn payload_size(self) -> Option<usize> {
        match self {
            CommandType::Begin | CommandType::End => Some(0),
            CommandType::Circle => Some(16),
            CommandType::Rect | CommandType::Line => Some(20),
            CommandType::Unit => Some(28),
            CommandType::Area => Some(10),
            CommandType::Message => None,
        }
    }
}

/// A single drawing record
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Envelope marker; only legal as a record when decoding foreign streams
    Begin,

    /// Optional end-of-frame marker
    End,

    /// Filled circle
    Circle { x: f32, y: f32, r: f32, color: Color },

    /// Axis-aligned rectangle given by two opposite corners
    Rect { x1: f32, y1: f32, x2: f32, y2: f32, color: Color },

    /// Line segment
    Line { x1: f32, y1: f32, x2: f32, y2: f32, color: Color },

    /// Living unit: a circle with an HP bar and an optional texture.
    /// `unit_type` and `side` are pass-through integers.
    Unit {
        x: f32,
        y: f32,
        r: f32,
        hp: i32,
        max_hp: i32,
        unit_type: i16,
        side: i16,
        course: f32,
    },

    /// Free-form text for the viewer's message panel
    Message { text: String },

    /// Terrain/weather cell description
    Area { x: i32, y: i32, area_type: i16 },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Begin => CommandType::Begin,
            Command::End => CommandType::End,
            Command::Circle { .. } => CommandType::Circle,
            Command::Rect { .. } => CommandType::Rect,
            Command::Line { .. } => CommandType::Line,
            Command::Unit { .. } => CommandType::Unit,
            Command::Message { .. } => CommandType::Message,
            Command::Area { .. } => CommandType::Area,
        }
    }

    /// Total encoded size of this record, tag byte included
    pub fn encoded_len(&self) -> usize {
        let payload = match self {
            Command::Message { text } => 4 + text.len(),
            other => other.command_type().payload_size().unwrap_or(0),
        };
        1 + payload
    }
}
