pub mod error;
pub mod geometry;
pub mod math;
pub mod paper;
pub mod pen;

pub use error::{NiblineError, Result};
pub use geometry::path::Path;
pub use geometry::segment::{ArcSegment, LineSegment, Paint, Segment};
pub use geometry::sink::OutlineSink;
pub use math::angle::{Angle, Heading};
pub use math::{GeometryConfig, Point, Vector};
pub use paper::{Paper, PathKey};
pub use pen::{Pen, PenCommand};
