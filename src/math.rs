use nalgebra::{Rotation3, UnitQuaternion, Vector3};

/// Tolerance for position matching. Lattice coordinates are snapped at the
/// end of every turn, so accumulated error never approaches this bound.
pub(crate) const EPSILON: f64 = 1e-5;

pub(crate) fn float_equals(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub(crate) fn vector_equals(v: &Vector3<f64>, w: &Vector3<f64>) -> bool {
    float_equals(v.x, w.x) && float_equals(v.y, w.y) && float_equals(v.z, w.z)
}

/// Snaps an orientation to the nearest exact cube rotation.
///
/// A cubie that has only ever undergone quarter turns has a rotation matrix
/// whose entries are all in {-1, 0, 1}, so rounding the entries recovers the
/// exact group element and discards floating-point drift.
pub(crate) fn snap_orientation(orientation: &UnitQuaternion<f64>) -> UnitQuaternion<f64> {
    let rounded = orientation.to_rotation_matrix().into_inner().map(f64::round);
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rounded))
}
