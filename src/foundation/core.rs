pub use kurbo::{Point, Vec2};

/// 3D point or vector on a spatial path.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Convert an easing-curve point into the vector form used by fitting code.
#[inline]
pub fn vec_of(p: Point) -> Vec2 {
    p.to_vec2()
}

/// Convert a fitted vector back into an easing-curve point.
#[inline]
pub fn point_of(v: Vec2) -> Point {
    v.to_point()
}

/// Read a 3D point from a flat `[x, y, z, ...]` slice at element offset `at`.
#[inline]
pub(crate) fn vec3_at(flat: &[f64], at: usize) -> Vec3 {
    Vec3::new(flat[at], flat[at + 1], flat[at + 2])
}
