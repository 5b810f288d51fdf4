//! rewind-demo
//!
//! Streams a few animated frames to a running viewer.

use std::time::Duration;

use clap::Parser;
use rewind_client::{canvas_from_config, AreaType, Canvas, Color, Config, Side, UnitSpec, UnitType};
use tracing_subscriber::{fmt, EnvFilter};

/// Demo client
#[derive(Parser, Debug)]
#[command(name = "rewind-demo")]
#[command(about = "Draw demo frames in a rewind viewer")]
#[command(version)]
struct Args {
    /// Viewer host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Viewer port
    #[arg(short, long, default_value = "7000")]
    port: u16,

    /// Number of frames to send
    #[arg(short = 'n', long, default_value = "100")]
    frames: u32,

    /// Delay between frames in milliseconds
    #[arg(short, long, default_value = "50")]
    tick_ms: u64,

    /// Terminate every frame payload with an `e` record
    #[arg(long)]
    end_marker: bool,

    /// Run without a viewer (all drawing is a no-op)
    #[arg(long)]
    disabled: bool,
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

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .end_marker(args.end_marker)
        .enabled(!args.disabled)
        .build();

    tracing::info!("rewind-demo v{} -> {}", rewind_client::VERSION, config.addr());

    let mut canvas = canvas_from_config(&config);

    for tick in 0..args.frames {
        let t = f64::from(tick) * 0.1;

        canvas.area(3, 4, AreaType::Forest.into());
        canvas.rect(100.0, 100.0, 300.0, 200.0, Color::GRAY);
        canvas.line(0.0, 0.0, 400.0 * t.cos().abs(), 400.0 * t.sin().abs(), Color::GREEN);
        canvas.circle(200.0 + 50.0 * t.cos(), 150.0 + 50.0 * t.sin(), 10.0, Color::RED);
        canvas.living_unit(
            &UnitSpec::new(120.0, 300.0, 8.0, 100 - (tick % 100) as i32, 100, Side::Friend)
                .course(t)
                .unit_type(UnitType::TANK),
        );
        canvas.living_unit(&UnitSpec::new(180.0, 300.0, 8.0, 40, 100, Side::Enemy));
        canvas.message(&format!("tick {}\n", tick));
        canvas.end_frame();

        std::thread::sleep(Duration::from_millis(args.tick_ms));
    }

    tracing::info!("Sent {} frames (viewer active: {})", args.frames, canvas.is_active());
}
