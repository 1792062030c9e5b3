//! Move definitions for the 3x3x3 cube.
//!
//! Each named move is an axis, a set of slice coordinates along that axis,
//! and a direction sign. The full move sweeps `direction * PI / 2` radians;
//! during animation the sweep is applied as many small deltas. The sign
//! table reproduces the standard right-hand-rule convention and is verified
//! by the inverse-law tests rather than re-derived from intuition.

use nalgebra::{Unit, Vector3};

/// One of the three coordinate axes of the cube lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub(crate) fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub(crate) fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }

    pub(crate) fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// An immutable description of one named turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MoveDefinition {
    pub(crate) axis: Axis,
    pub(crate) slices: &'static [f64],
    pub(crate) direction: f64,
}

impl MoveDefinition {
    /// Same axis and slices, opposite sweep.
    pub(crate) fn inverse(self) -> Self {
        Self {
            direction: -self.direction,
            ..self
        }
    }
}

const OUTER: &[f64] = &[1.0];
const INNER: &[f64] = &[-1.0];
const MIDDLE: &[f64] = &[0.0];
const ALL: &[f64] = &[-1.0, 0.0, 1.0];

const fn md(axis: Axis, slices: &'static [f64], direction: f64) -> MoveDefinition {
    MoveDefinition {
        axis,
        slices,
        direction,
    }
}

/// Looks up a move by name.
///
/// Base names are the six face turns (U, D, L, R, F, B), the three middle
/// slices (M, E, S) and the three whole-cube reorientations (x, y, z). Any
/// base name with an `i` suffix resolves to the derived inverse. Unknown
/// names yield `None`; callers treat that as a no-op.
pub(crate) fn move_definition(name: &str) -> Option<MoveDefinition> {
    if let Some(base) = name.strip_suffix('i') {
        return base_definition(base).map(MoveDefinition::inverse);
    }
    base_definition(name)
}

fn base_definition(name: &str) -> Option<MoveDefinition> {
    Some(match name {
        "R" => md(Axis::X, OUTER, -1.0),
        "U" => md(Axis::Y, OUTER, -1.0),
        "F" => md(Axis::Z, OUTER, -1.0),
        "L" => md(Axis::X, INNER, 1.0),
        "D" => md(Axis::Y, INNER, 1.0),
        "B" => md(Axis::Z, INNER, 1.0),
        "M" => md(Axis::X, MIDDLE, 1.0),
        "E" => md(Axis::Y, MIDDLE, 1.0),
        "S" => md(Axis::Z, MIDDLE, -1.0),
        "x" => md(Axis::X, ALL, -1.0),
        "y" => md(Axis::Y, ALL, -1.0),
        "z" => md(Axis::Z, ALL, -1.0),
        _ => return None,
    })
}
