//! Value types carried by drawing records
//!
//! Conventional values only; the protocol itself treats every field here
//! as a plain integer and never validates it.

/// Packed 24-bit RGB color (`0xRRGGBB` in the low bits of an `i32`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub i32);

impl Color {
    pub const RED: Color = Color(0xFF0000);
    pub const GREEN: Color = Color(0x00FF00);
    pub const BLUE: Color = Color(0x0000FF);
    pub const GRAY: Color = Color(0x273142);

    /// Pack 8-bit channels into a color
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as i32) << 16) | ((g as i32) << 8) | b as i32)
    }

    /// The raw wire integer
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// The low 24 bits, which are all a viewer inspects
    pub const fn rgb(self) -> u32 {
        (self.0 as u32) & 0x00FF_FFFF
    }

    pub const fn red(self) -> u8 {
        (self.rgb() >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.rgb() >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.rgb() as u8
    }
}

impl From<i32> for Color {
    fn from(raw: i32) -> Self {
        Color(raw)
    }
}

impl From<u32> for Color {
    fn from(raw: u32) -> Self {
        Color(raw as i32)
    }
}

/// Allegiance of a living unit (the `enemyState` wire field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum Side {
    Friend = -1,
    Neutral = 0,
    Enemy = 1,
}

impl From<Side> for i16 {
    fn from(side: Side) -> Self {
        side as i16
    }
}

/// Texture selector for a living unit.
///
/// `0` asks for an untextured circle. The reference viewer's texture table
/// also starts at `0` (ARRV), so there the two are the same value. Values
/// past `TANK` fall back to no texture on the viewer side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UnitType(pub i16);

impl UnitType {
    pub const UNTEXTURED: UnitType = UnitType(0);
    pub const ARRV: UnitType = UnitType(0);
    pub const FIGHTER: UnitType = UnitType(1);
    pub const HELICOPTER: UnitType = UnitType(2);
    pub const IFV: UnitType = UnitType(3);
    pub const TANK: UnitType = UnitType(4);
}

impl From<UnitType> for i16 {
    fn from(unit_type: UnitType) -> Self {
        unit_type.0
    }
}

/// Kind of an area cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum AreaType {
    Forest = 0,
    Swamp = 1,
    Rain = 2,
    Cloud = 3,
}

impl From<AreaType> for i16 {
    fn from(area_type: AreaType) -> Self {
        area_type as i16
    }
}

/// Arguments of a living unit record.
///
/// `course` and `unit_type` default to zero, matching an untextured unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnitSpec {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub side: i16,
    pub course: f64,
    pub unit_type: i16,
}

impl UnitSpec {
    /// A unit at `(x, y)` with radius `r` and the given health
    pub fn new(x: f64, y: f64, r: f64, hp: i32, max_hp: i32, side: impl Into<i16>) -> Self {
        Self {
            x,
            y,
            r,
            hp,
            max_hp,
            side: side.into(),
            ..Self::default()
        }
    }

    /// Set the rotation angle (radians) used by textured units
    pub fn course(mut self, course: f64) -> Self {
        self.course = course;
        self
    }

    /// Set the texture selector
    pub fn unit_type(mut self, unit_type: impl Into<i16>) -> Self {
        self.unit_type = unit_type.into();
        self
    }
}
