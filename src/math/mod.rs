pub mod angle;
pub mod intersect;
pub mod points;

/// 2D point type.
pub type Point = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector = nalgebra::Vector2<f64>;

/// Default tolerance for floating-point comparisons.
///
/// Absorbs the noise accumulated by repeated trigonometric
/// construction; two coordinates closer than this count as equal.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Default sharpness threshold for joints, in degrees.
///
/// Two consecutive segments whose tangents differ by more than this
/// turn too sharply for an outer miter corner to be meaningful.
pub const DEFAULT_MAX_TURN_ANGLE: f64 = 170.0;

/// Tunable constants threaded through the engine.
///
/// Owned by [`crate::paper::Paper`] and passed by reference into
/// segment construction, joins, fusing and stitching, so that multiple
/// engines with different tolerances can coexist.
#[derive(Debug, Clone, Copy)]
pub struct GeometryConfig {
    /// Coordinate-wise tolerance for approximate point equality.
    pub epsilon: f64,
    /// Maximum absolute turn angle, in degrees, for which a joint
    /// between consecutive segments is still resolved on both sides.
    pub max_turn_angle: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_turn_angle: DEFAULT_MAX_TURN_ANGLE,
        }
    }
}
