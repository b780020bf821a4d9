//! Nibline debug drawing — drives a pen through a small figure and
//! prints the resulting outline walks.
//!
//! Usage:
//! ```text
//! cargo run --example debug            # thick zig-zag with an arc
//! RUST_LOG=debug cargo run --example debug
//! ```

use nibline::{Angle, Heading, OutlineSink, Paint, Pen, Point};

/// Prints every boundary operation as it arrives.
struct StdoutSink;

impl OutlineSink for StdoutSink {
    fn move_to(&mut self, p: Point) {
        println!("move    ({:.4}, {:.4})", p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        println!("line    ({:.4}, {:.4})", p.x, p.y);
    }

    fn arc_to(&mut self, p: Point, center: Point, arc_angle: Angle) {
        println!(
            "arc     ({:.4}, {:.4}) around ({:.4}, {:.4}), {:.1} deg",
            p.x,
            p.y,
            center.x,
            center.y,
            arc_angle.degrees()
        );
    }

    fn close_path(&mut self) {
        println!("close");
    }
}

fn main() {
    // Default: WARN for everything, INFO for nibline.
    // Override with RUST_LOG env var (e.g. RUST_LOG=nibline=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("debug=info".parse().unwrap_or_default())
        .add_directive("nibline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut pen = Pen::new();
    pen.set_width(1.0);
    pen.set_paint(Paint(1));

    // A zig, a zag, and an arc back.
    pen.move_to(Point::new(0.0, 0.0));
    pen.turn_to(Heading::new(0.0));
    pen.line_forward(6.0);
    pen.turn_right(Angle::new(60.0));
    pen.line_forward(6.0);
    pen.turn_left(Angle::new(90.0));
    pen.arc_left(Angle::new(120.0), 4.0);

    // A second fragment drawn backwards, stitched on afterwards.
    pen.break_stroke();
    pen.move_to(Point::new(-4.0, 0.0));
    pen.turn_toward(Point::new(0.0, 0.0));
    pen.line_to(Point::new(0.0, 0.0));

    pen.paper_mut().join_paths();
    pen.paper_mut().fuse_paths();

    let config = *pen.paper().config();
    for (index, path) in pen.paper().paths().enumerate() {
        println!(
            "path {index}: {} segments{}",
            path.segments().len(),
            if path.is_closed() { ", closed" } else { "" }
        );
        let mut sink = StdoutSink;
        match path.draw_outline(&mut sink, &config) {
            Ok(()) => {}
            Err(err) => println!("  ! {err}"),
        }
        for (si, segment) in path.segments().iter().enumerate() {
            if segment.start_joint_illegal() || segment.end_joint_illegal() {
                println!("  segment {si} has an unsolved joint");
            }
        }
    }
}
