//! Tests for RewindClient and the Canvas variants
//!
//! These tests verify:
//! - One envelope per end_frame through any transport
//! - Write failures disable the client without panicking
//! - NullCanvas and SharedCanvas behaviour
//! - Startup selection via canvas_from_config

use std::io;
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use rewind_client::network::Transport;
use rewind_client::protocol::{decode_envelope, Command};
use rewind_client::{
    canvas_from_config, Canvas, Color, Config, FrameEncoder, NullCanvas, RewindClient,
    RewindError, Result, SharedCanvas, Side, UnitSpec,
};

// =============================================================================
// Helper Transports
// =============================================================================

/// Records every envelope it is given
#[derive(Default, Clone)]
struct Recorder {
    envelopes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Recorder {
    fn envelopes(&self) -> Vec<Vec<u8>> {
        self.envelopes.lock().clone()
    }
}

impl Transport for Recorder {
    fn send_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.envelopes.lock().push(bytes.to_vec());
        Ok(())
    }
}

/// Fails every write after the first `ok_writes`
struct Flaky {
    ok_writes: usize,
    attempts: usize,
}

impl Transport for Flaky {
    fn send_raw(&mut self, _bytes: &[u8]) -> Result<()> {
        self.attempts += 1;
        if self.attempts > self.ok_writes {
            return Err(RewindError::Write(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "viewer went away",
            )));
        }
        Ok(())
    }
}

fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

// =============================================================================
// Active Client Tests
// =============================================================================

#[test]
fn test_one_envelope_per_end_frame() {
    let recorder = Recorder::default();
    let mut client = RewindClient::new(recorder.clone());

    client.circle(1.0, 2.0, 3.0, Color::RED);
    client.end_frame();
    client.circle(4.0, 5.0, 6.0, Color::BLUE);
    client.end_frame();

    let envelopes = recorder.envelopes();
    assert_eq!(envelopes.len(), 2);
    assert_eq!(
        decode_envelope(&envelopes[0]).unwrap(),
        vec![Command::Circle { x: 1.0, y: 2.0, r: 3.0, color: Color::RED }]
    );
    assert_eq!(
        decode_envelope(&envelopes[1]).unwrap(),
        vec![Command::Circle { x: 4.0, y: 5.0, r: 6.0, color: Color::BLUE }]
    );
    assert_eq!(client.frames_sent(), 2);
}

#[test]
fn test_end_frame_without_draws_sends_empty_envelope() {
    let recorder = Recorder::default();
    let mut client = RewindClient::new(recorder.clone());

    client.end_frame();

    assert_eq!(recorder.envelopes(), vec![vec![b'b', 0, 0, 0, 0]]);
}

#[test]
fn test_all_primitives_through_client() {
    let recorder = Recorder::default();
    let mut client = RewindClient::new(recorder.clone());

    client.rect(0.0, 1.0, 2.0, 3.0, Color::GRAY);
    client.line(0.0, 0.0, 1.0, 1.0, Color::GREEN);
    client.living_unit(&UnitSpec::new(1.0, 1.0, 0.5, 3, 4, Side::Enemy).course(0.25));
    client.message("hello");
    client.area(9, 8, 2);
    client.try_end_frame().unwrap();

    let decoded = decode_envelope(&recorder.envelopes()[0]).unwrap();
    let tags: Vec<u8> = decoded.iter().map(|c| c.command_type().tag()).collect();
    assert_eq!(tags, b"rluma".to_vec());
}

#[test]
fn test_client_with_end_marker_encoder() {
    let recorder = Recorder::default();
    let mut client = RewindClient::with_encoder(recorder.clone(), FrameEncoder::with_end_marker(true));

    client.message("x");
    client.end_frame();

    let decoded = decode_envelope(&recorder.envelopes()[0]).unwrap();
    assert_eq!(decoded.last(), Some(&Command::End));
}

#[test]
fn test_write_failure_disables_client() {
    let mut client = RewindClient::new(Flaky { ok_writes: 1, attempts: 0 });

    client.circle(1.0, 1.0, 1.0, Color::RED);
    client.end_frame();
    assert!(client.is_active());
    assert_eq!(client.frames_sent(), 1);

    client.circle(1.0, 1.0, 1.0, Color::RED);
    let err = client.try_end_frame().unwrap_err();
    assert!(matches!(err, RewindError::Write(_)));
    assert!(client.is_failed());
    assert!(!client.is_active());

    // Later calls are silent no-ops and never reach the transport again
    client.circle(1.0, 1.0, 1.0, Color::RED);
    client.message("ignored");
    client.end_frame();
    assert!(client.encoder().is_empty());
    assert!(matches!(client.try_end_frame(), Err(RewindError::Disconnected)));
    assert!(matches!(client.try_message("x"), Err(RewindError::Disconnected)));
    assert_eq!(client.transport().attempts, 2);
    assert_eq!(client.frames_sent(), 1);
}

#[test]
fn test_failed_frame_buffer_is_cleared() {
    let mut client = RewindClient::new(Flaky { ok_writes: 0, attempts: 0 });

    client.area(1, 2, 3);
    assert!(client.try_end_frame().is_err());
    assert!(client.encoder().is_empty());
}

#[test]
fn test_into_transport() {
    let mut client = RewindClient::new(Recorder::default());
    client.end_frame();
    let recorder = client.into_transport();
    assert_eq!(recorder.envelopes().len(), 1);
}

// =============================================================================
// NullCanvas Tests
// =============================================================================

#[test]
fn test_null_canvas_accepts_everything() {
    let mut canvas = NullCanvas;
    canvas.circle(0.0, 0.0, 1.0, Color::RED);
    canvas.rect(0.0, 0.0, 1.0, 1.0, Color::RED);
    canvas.line(0.0, 0.0, 1.0, 1.0, Color::RED);
    canvas.living_unit(&UnitSpec::default());
    canvas.message("nothing");
    canvas.area(0, 0, 0);
    canvas.end_frame();
    assert!(!canvas.is_active());
}

// =============================================================================
// SharedCanvas Tests
// =============================================================================

#[test]
fn test_shared_canvas_across_threads() {
    let recorder = Recorder::default();
    let shared = SharedCanvas::new(RewindClient::new(recorder.clone()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut canvas = shared.clone();
            thread::spawn(move || {
                for j in 0..25 {
                    canvas.circle(f64::from(i), f64::from(j), 1.0, Color::RED);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut canvas = shared.clone();
    canvas.end_frame();

    let envelopes = recorder.envelopes();
    assert_eq!(envelopes.len(), 1);
    assert_eq!(decode_envelope(&envelopes[0]).unwrap().len(), 100);
}

#[test]
fn test_shared_canvas_with_groups_records() {
    let recorder = Recorder::default();
    let shared = SharedCanvas::new(RewindClient::new(recorder.clone()));

    shared.with(|canvas| {
        canvas.message("a");
        canvas.message("b");
        canvas.end_frame();
    });

    assert_eq!(decode_envelope(&recorder.envelopes()[0]).unwrap().len(), 2);
    assert!(shared.is_active());
}

// =============================================================================
// Startup Selection Tests
// =============================================================================

#[test]
fn test_disabled_config_selects_null_canvas() {
    let config = Config::builder().enabled(false).build();
    let canvas = canvas_from_config(&config);
    assert!(!canvas.is_active());
}

#[test]
fn test_unreachable_viewer_selects_null_canvas() {
    let config = Config::builder()
        .port(unused_port())
        .connect_timeout_ms(500)
        .build();

    let mut canvas = canvas_from_config(&config);
    assert!(!canvas.is_active());

    // Drawing on the fallback never fails
    canvas.circle(1.0, 1.0, 1.0, Color::RED);
    canvas.end_frame();
}

#[test]
fn test_connect_failure_is_reported() {
    let config = Config::builder().port(unused_port()).build();
    let result = RewindClient::connect(&config);
    assert!(matches!(result, Err(RewindError::Connect { .. })));
}

#[test]
fn test_invalid_config_rejected_before_connect() {
    let config = Config::builder().host("").build();
    assert!(matches!(RewindClient::connect(&config), Err(RewindError::Config(_))));
}
