//! Client Module
//!
//! The drawing capability handed to simulation code.
//!
//! ## Variants
//! - `RewindClient`: encodes records and streams one envelope per frame
//! - `NullCanvas`: accepts every call and does nothing
//!
//! `canvas_from_config` picks one of the two once at startup. Drawing calls
//! never return errors: a missing viewer or a broken socket only means
//! nothing shows up in the viewer.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{RewindError, Result};
use crate::frame::FrameEncoder;
use crate::network::{Connection, Transport};
use crate::protocol::{Color, UnitSpec};

// =============================================================================
// Capability
// =============================================================================

/// Debug drawing operations available to simulation code
pub trait Canvas {
    fn circle(&mut self, x: f64, y: f64, r: f64, color: Color);

    fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color);

    /// Circle with an HP bar
    fn living_unit(&mut self, unit: &UnitSpec);

    fn message(&mut self, text: &str);

    fn area(&mut self, x: i32, y: i32, area_type: i16);

    /// Flush everything drawn since the previous call as one frame
    fn end_frame(&mut self);

    /// Whether calls can reach a viewer
    fn is_active(&self) -> bool {
        true
    }
}

impl<C: Canvas + ?Sized> Canvas for Box<C> {
    fn circle(&mut self, x: f64, y: f64, r: f64, color: Color) {
        (**self).circle(x, y, r, color)
    }

    fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        (**self).rect(x1, y1, x2, y2, color)
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        (**self).line(x1, y1, x2, y2, color)
    }

    fn living_unit(&mut self, unit: &UnitSpec) {
        (**self).living_unit(unit)
    }

    fn message(&mut self, text: &str) {
        (**self).message(text)
    }

    fn area(&mut self, x: i32, y: i32, area_type: i16) {
        (**self).area(x, y, area_type)
    }

    fn end_frame(&mut self) {
        (**self).end_frame()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// Select the canvas implementation for this process.
///
/// Returns a `NullCanvas` when the client is disabled or the viewer cannot
/// be reached; the connect failure is logged, never propagated.
pub fn canvas_from_config(config: &Config) -> Box<dyn Canvas + Send> {
    if !config.enabled {
        tracing::info!("Viewer client disabled; drawing calls are no-ops");
        return Box::new(NullCanvas);
    }

    match RewindClient::connect(config) {
        Ok(client) => Box::new(client),
        Err(e) => {
            tracing::warn!("{}; drawing calls are no-ops", e);
            Box::new(NullCanvas)
        }
    }
}

// =============================================================================
// Active Client
// =============================================================================

/// Streams drawing records to the viewer, one envelope per frame
pub struct RewindClient<T: Transport = Connection> {
    /// Records of the frame in progress
    encoder: FrameEncoder,

    /// Byte sink for finished envelopes
    transport: T,

    /// Set after the first write failure; the client is inert from then on
    failed: bool,

    /// Envelopes successfully handed to the transport
    frames_sent: u64,
}

impl RewindClient<Connection> {
    /// Connect to the viewer described by `config`
    ///
    /// No client exists unless the connection succeeded.
    pub fn connect(config: &Config) -> Result<Self> {
        let connection = Connection::connect(config)?;
        Ok(Self::with_encoder(
            connection,
            FrameEncoder::with_end_marker(config.end_marker),
        ))
    }
}

impl<T: Transport> RewindClient<T> {
    /// Create a client over an arbitrary transport
    pub fn new(transport: T) -> Self {
        Self::with_encoder(transport, FrameEncoder::new())
    }

    /// Create a client with an explicitly configured encoder
    pub fn with_encoder(transport: T, encoder: FrameEncoder) -> Self {
        Self {
            encoder,
            transport,
            failed: false,
            frames_sent: 0,
        }
    }

    /// Append a message record, reporting oversize text
    pub fn try_message(&mut self, text: &str) -> Result<()> {
        if self.failed {
            return Err(RewindError::Disconnected);
        }
        self.encoder.message(text)
    }

    /// Seal the frame in progress and send it as one envelope.
    ///
    /// A write failure moves the client into the failed state permanently.
    pub fn try_end_frame(&mut self) -> Result<()> {
        if self.failed {
            self.encoder.clear();
            return Err(RewindError::Disconnected);
        }

        let commands = self.encoder.command_count();
        let envelope = self.encoder.finish()?;

        if let Err(e) = self.transport.send_raw(&envelope) {
            tracing::error!("{}; disabling viewer output", e);
            self.failed = true;
            return Err(e);
        }

        self.frames_sent += 1;
        tracing::trace!(
            "Frame {} sent: {} records, {} bytes",
            self.frames_sent,
            commands,
            envelope.len()
        );
        Ok(())
    }

    /// Whether a write has failed
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Number of envelopes sent so far
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// The frame in progress
    pub fn encoder(&self) -> &FrameEncoder {
        &self.encoder
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: Transport> Canvas for RewindClient<T> {
    fn circle(&mut self, x: f64, y: f64, r: f64, color: Color) {
        if !self.failed {
            self.encoder.circle(x, y, r, color);
        }
    }

    fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        if !self.failed {
            self.encoder.rect(x1, y1, x2, y2, color);
        }
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        if !self.failed {
            self.encoder.line(x1, y1, x2, y2, color);
        }
    }

    fn living_unit(&mut self, unit: &UnitSpec) {
        if !self.failed {
            self.encoder.living_unit(unit);
        }
    }

    fn message(&mut self, text: &str) {
        if self.failed {
            return;
        }
        if let Err(e) = self.encoder.message(text) {
            tracing::warn!("Dropped message record: {}", e);
        }
    }

    fn area(&mut self, x: i32, y: i32, area_type: i16) {
        if !self.failed {
            self.encoder.area(x, y, area_type);
        }
    }

    fn end_frame(&mut self) {
        if self.failed {
            return;
        }
        if let Err(e) = self.try_end_frame() {
            tracing::debug!("Frame dropped: {}", e);
        }
    }

    fn is_active(&self) -> bool {
        !self.failed
    }
}

// =============================================================================
// No-op Client
// =============================================================================

/// Canvas used when no viewer is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn circle(&mut self, _x: f64, _y: f64, _r: f64, _color: Color) {}

    fn rect(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, _color: Color) {}

    fn line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, _color: Color) {}

    fn living_unit(&mut self, _unit: &UnitSpec) {}

    fn message(&mut self, _text: &str) {}

    fn area(&mut self, _x: i32, _y: i32, _area_type: i16) {}

    fn end_frame(&mut self) {}

    fn is_active(&self) -> bool {
        false
    }
}

// =============================================================================
// Shared Client
// =============================================================================

/// Cloneable handle serializing access to one canvas across threads.
///
/// Each call takes the lock separately; use `with` to keep a group of
/// records together.
#[derive(Clone)]
pub struct SharedCanvas {
    inner: Arc<Mutex<Box<dyn Canvas + Send>>>,
}

impl SharedCanvas {
    pub fn new(canvas: impl Canvas + Send + 'static) -> Self {
        Self::from_boxed(Box::new(canvas))
    }

    pub fn from_boxed(canvas: Box<dyn Canvas + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(canvas)),
        }
    }

    /// Run `f` with exclusive access to the canvas
    pub fn with<R>(&self, f: impl FnOnce(&mut (dyn Canvas + Send)) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut **guard)
    }
}

impl Canvas for SharedCanvas {
    fn circle(&mut self, x: f64, y: f64, r: f64, color: Color) {
        self.inner.lock().circle(x, y, r, color)
    }

    fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.inner.lock().rect(x1, y1, x2, y2, color)
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.inner.lock().line(x1, y1, x2, y2, color)
    }

    fn living_unit(&mut self, unit: &UnitSpec) {
        self.inner.lock().living_unit(unit)
    }

    fn message(&mut self, text: &str) {
        self.inner.lock().message(text)
    }

    fn area(&mut self, x: i32, y: i32, area_type: i16) {
        self.inner.lock().area(x, y, area_type)
    }

    fn end_frame(&mut self) {
        self.inner.lock().end_frame()
    }

    fn is_active(&self) -> bool {
        self.inner.lock().is_active()
    }
}
