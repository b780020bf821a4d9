use thiserror::Error;

/// Top-level error type for the nibline stroke engine.
///
/// These cover invalid construction inputs and misuse of the render
/// boundary. Unsolvable joint geometry arising from arbitrary drawings
/// is deliberately *not* an error; it is recorded on the affected
/// segments as `start_joint_illegal` / `end_joint_illegal` flags.
#[derive(Debug, Error)]
pub enum NiblineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length segment: both endpoints are ({x}, {y})")]
    ZeroLengthSegment { x: f64, y: f64 },

    #[error("arc radius must be non-zero")]
    ZeroRadius,

    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("target {axis} = {target} is unreachable from heading {heading}")]
    UnreachableTarget {
        axis: &'static str,
        target: f64,
        heading: f64,
    },
}

/// Errors related to driving an outline sink.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot draw a stroke outline for a segment with no width")]
    MissingWidth,
}

/// Convenience type alias for results using [`NiblineError`].
pub type Result<T> = std::result::Result<T, NiblineError>;
