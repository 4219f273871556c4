//! Geometry aliases and the polar convention used by the placement engine.
//!
//! Angles are degrees measured from the positive y axis ("north", the reference
//! midline of a fresh placement), increasing counterclockwise.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Rotation = euclid::Rotation2D<f64, Unit, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// North-referenced polar to cartesian: `polar_point(r, 0.0)` is `(0, r)`.
pub fn polar_point(radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg + 90.0).to_radians();
    point(radius * rad.cos(), radius * rad.sin())
}

/// The north-referenced angle of `p`, normalized to `(-180, 180]`.
pub fn point_angle(p: Point) -> f64 {
    normalize_angle(p.y.atan2(p.x).to_degrees() - 90.0)
}

pub fn normalize_angle(mut deg: f64) -> f64 {
    while deg <= -180.0 {
        deg += 360.0;
    }
    while deg > 180.0 {
        deg -= 360.0;
    }
    deg
}

/// Rotates `p` about the origin by `angle_deg` (counterclockwise positive).
/// Radius-preserving by construction.
pub fn rotate_about_origin(p: Point, angle_deg: f64) -> Point {
    Rotation::new(euclid::Angle::radians(angle_deg.to_radians())).transform_point(p)
}
