//! Headless walkthrough of the timeline picker: builds a timeline, replays a
//! drag, a fling and a tap, and prints what a renderer would draw.

use std::time::{Duration, Instant};

use clap::Parser;
use tessera_timeline::{
    TimelineArgs, TimelineController, Timestamp, dp::set_scale_factor, format_time,
    px::{Px, PxSize},
    ring::NodeKind,
};
use tracing::info;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(name = "example", about = "Drive the timeline picker without a window")]
struct Cli {
    /// Widget width in physical pixels.
    #[arg(long, default_value_t = 1100)]
    width: i32,
    /// Widget height in physical pixels.
    #[arg(long, default_value_t = 120)]
    height: i32,
    /// Horizontal drag distance replayed before the tap.
    #[arg(long, default_value_t = -250.0, allow_hyphen_values = true)]
    drag: f32,
    /// Bind this exact instant (ms since epoch) instead of today's default.
    #[arg(long)]
    bind: Option<i64>,
    /// Physical pixels per dp, applied to radii and the touch slop.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    set_scale_factor(cli.scale);

    let mut timeline = TimelineController::new(&TimelineArgs::default());
    timeline.on_selection_changed(|selected: Timestamp| {
        info!(selected = %format_time(selected), "selection changed");
    });
    match cli.bind {
        Some(millis) => timeline.bind_time(Timestamp::from_millis(millis)),
        None => timeline.set_date(Timestamp::now()),
    }
    timeline.resize(PxSize::new(Px(cli.width), Px(cli.height)));
    print_frame("initial", &timeline);

    let start = Instant::now();
    let from = cli.width as f32 * 0.75;
    let steps = 10u32;
    timeline.pointer_down(from, start);
    for step in 1..=steps {
        let x = from + cli.drag * step as f32 / steps as f32;
        timeline.pointer_move(x, start + FRAME * step);
    }
    let released_at = start + FRAME * steps;
    timeline.pointer_up(from + cli.drag, released_at);

    let mut now = released_at;
    let mut frames = 0;
    while timeline.is_animating() {
        now += FRAME;
        timeline.frame(now);
        frames += 1;
    }
    info!(frames, "fling settled");
    print_frame("after fling", &timeline);

    let center = cli.width as f32 / 2.0;
    now += FRAME;
    timeline.pointer_down(center, now);
    timeline.pointer_up(center, now);
    print_frame("after tap", &timeline);

    if let Some(selected) = timeline.selected_time() {
        println!("selected time: {}", format_time(selected));
    }
}

fn print_frame(title: &str, timeline: &TimelineController) {
    println!("-- {title}");
    for node in timeline.draw_nodes() {
        let marker = match node.kind {
            NodeKind::Hour => "o",
            NodeKind::HalfHour => ".",
            NodeKind::Selected => "@",
        };
        let label = if node.show_label { node.label.as_str() } else { "" };
        println!(
            "{marker} x={:>8.1} r={:>4.1} {label}",
            node.position.x,
            node.radius.to_pixels_f32()
        );
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,tessera_timeline=info,example=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
