//! Cube state: 27 cubies with attached stickers.
//!
//! Each cubie is a rigid body created once at construction and mutated only
//! in position, orientation, and sticker colors. Cubies live in an arena and
//! are addressed by [`CubieId`]; geometric lookups match current world
//! positions within a small tolerance, and [`Cube::finalize_turn`] snaps the
//! lattice back to exact values after every completed turn so floating-point
//! drift never accumulates.

use std::collections::HashMap;

use log::debug;
use nalgebra::{UnitQuaternion, Vector3};
use thiserror::Error;

use crate::camera::ViewAngle;
use crate::location::{self, LocationError};
use crate::math::{float_equals, vector_equals};
use crate::moves::Axis;

/// Sticker and background colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    White,
    Yellow,
    Green,
    Blue,
    Red,
    Orange,
    /// Fallback for faces the scheme does not specify.
    Gray,
    /// Blocked color shown on disconnected shared stickers.
    Black,
}

impl Color {
    pub(crate) fn rgba(self) -> [f32; 4] {
        match self {
            Color::White => [1.0, 1.0, 1.0, 1.0],
            Color::Yellow => [1.0, 1.0, 0.0, 1.0],
            Color::Green => [0.0, 1.0, 0.0, 1.0],
            Color::Blue => [0.1, 0.1, 1.0, 1.0],
            Color::Red => [1.0, 0.0, 0.0, 1.0],
            Color::Orange => [1.0, 0.5, 0.0, 1.0],
            Color::Gray => [0.5, 0.5, 0.5, 1.0],
            Color::Black => [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Face-to-color mapping keyed by `"{axis}={1|-1}"`, e.g. `"x=1"`.
#[derive(Clone, Debug, Default)]
pub(crate) struct StickerScheme {
    colors: HashMap<String, Color>,
}

impl StickerScheme {
    pub(crate) fn from_entries(entries: &[(&str, Color)]) -> Self {
        Self {
            colors: entries
                .iter()
                .map(|&(key, color)| (key.to_owned(), color))
                .collect(),
        }
    }

    fn color_for(&self, axis: Axis, sign: f64) -> Color {
        let key = format!("{}={}", axis.letter(), sign as i64);
        self.colors.get(&key).copied().unwrap_or(Color::Gray)
    }
}

/// Persistent handle of a cubie within its cube's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CubieId(usize);

/// A colored facelet. The offset from the cubie's center is fixed in the
/// cubie's local frame; only the color ever changes.
#[derive(Clone, Debug)]
pub(crate) struct Sticker {
    pub(crate) axis: Axis,
    pub(crate) sign: f64,
    pub(crate) color: Color,
}

impl Sticker {
    /// Local offset: half a unit along the face normal.
    pub(crate) fn offset(&self) -> Vector3<f64> {
        self.axis.unit().into_inner() * (self.sign * 0.5)
    }
}

/// One of the 27 rigid sub-cubes.
#[derive(Clone, Debug)]
pub(crate) struct Cubie {
    pub(crate) position: Vector3<f64>,
    pub(crate) orientation: UnitQuaternion<f64>,
    pub(crate) stickers: Vec<Sticker>,
}

impl Cubie {
    /// Current world position of one of this cubie's stickers.
    pub(crate) fn sticker_world_position(&self, sticker: &Sticker) -> Vector3<f64> {
        self.position + self.orientation * sticker.offset()
    }
}

/// Raised when a location name resolves to no cubie or sticker. Apart from
/// the wrapped name errors this signals a violated engine invariant, not bad
/// input: rotation math has left the lattice in an inconsistent state.
#[derive(Clone, Debug, Error, PartialEq)]
pub(crate) enum StickerLookupError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("no cubie at the position of `{0}`")]
    CubieNotFound(String),
    #[error("no sticker at the position of `{0}`")]
    StickerNotFound(String),
}

/// A full 3x3x3 cube with its own color scheme and viewing angle.
#[derive(Clone, Debug)]
pub(crate) struct Cube {
    cubies: Vec<Cubie>,
    pub(crate) view_angle: ViewAngle,
}

impl Cube {
    /// Builds the solved lattice: one cubie per coordinate triple in
    /// {-1, 0, 1}^3, with a sticker on every face where |coordinate| = 1.
    pub(crate) fn new(scheme: &StickerScheme, view_angle: ViewAngle) -> Self {
        let mut cubies = Vec::with_capacity(27);
        for x in [-1.0f64, 0.0, 1.0] {
            for y in [-1.0, 0.0, 1.0] {
                for z in [-1.0, 0.0, 1.0] {
                    let position = Vector3::new(x, y, z);
                    let stickers = [Axis::X, Axis::Y, Axis::Z]
                        .into_iter()
                        .filter(|axis| position[axis.index()].abs() == 1.0)
                        .map(|axis| {
                            let sign = position[axis.index()];
                            Sticker {
                                axis,
                                sign,
                                color: scheme.color_for(axis, sign),
                            }
                        })
                        .collect();
                    cubies.push(Cubie {
                        position,
                        orientation: UnitQuaternion::identity(),
                        stickers,
                    });
                }
            }
        }
        Self { cubies, view_angle }
    }

    pub(crate) fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    /// Rotates one slice by an incremental angle.
    ///
    /// Selects every cubie whose coordinate along `axis` matches `slice`
    /// within tolerance, then rotates its position about the world axis and
    /// composes the same rotation into its orientation. The selected
    /// coordinate is invariant under the rotation, so membership is stable
    /// across the many small deltas of one animated turn.
    pub(crate) fn rotate_slice(&mut self, axis: Axis, slice: f64, angle: f64) {
        let rotation = UnitQuaternion::from_axis_angle(&axis.unit(), angle);
        for cubie in &mut self.cubies {
            if !float_equals(cubie.position[axis.index()], slice) {
                continue;
            }
            cubie.position = rotation * cubie.position;
            cubie.orientation = rotation * cubie.orientation;
        }
    }

    /// Snaps every cubie back to exact lattice positions and orientations.
    /// Called once per turn by the animation's single finalization path.
    pub(crate) fn finalize_turn(&mut self) {
        for cubie in &mut self.cubies {
            let rounded = cubie.position.map(f64::round);
            debug_assert!(
                vector_equals(&rounded, &cubie.position),
                "cubie drifted off the lattice: {:?}",
                cubie.position
            );
            cubie.position = rounded;
            cubie.orientation = crate::math::snap_orientation(&cubie.orientation);
        }
        debug!("turn finalized, lattice snapped");
    }

    fn cubie_at(&self, position: &Vector3<f64>) -> Option<CubieId> {
        self.cubies
            .iter()
            .position(|cubie| vector_equals(&cubie.position, position))
            .map(CubieId)
    }

    fn sticker_index(&self, name: &str) -> Result<(CubieId, usize), StickerLookupError> {
        let cubie_position = location::cubie_position(name)?;
        let sticker_position = location::sticker_position(name)?;
        let id = self
            .cubie_at(&cubie_position)
            .ok_or_else(|| StickerLookupError::CubieNotFound(name.to_owned()))?;
        let cubie = &self.cubies[id.0];
        let index = cubie
            .stickers
            .iter()
            .position(|sticker| {
                vector_equals(&cubie.sticker_world_position(sticker), &sticker_position)
            })
            .ok_or_else(|| StickerLookupError::StickerNotFound(name.to_owned()))?;
        Ok((id, index))
    }

    pub(crate) fn sticker_color(&self, name: &str) -> Result<Color, StickerLookupError> {
        let (id, index) = self.sticker_index(name)?;
        Ok(self.cubies[id.0].stickers[index].color)
    }

    pub(crate) fn set_sticker_color(
        &mut self,
        name: &str,
        color: Color,
    ) -> Result<(), StickerLookupError> {
        let (id, index) = self.sticker_index(name)?;
        self.cubies[id.0].stickers[index].color = color;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn test_scheme() -> StickerScheme {
        StickerScheme::from_entries(&[
            ("x=1", Color::Green),
            ("x=-1", Color::Blue),
            ("y=1", Color::White),
            ("y=-1", Color::Yellow),
            ("z=1", Color::Orange),
            ("z=-1", Color::Red),
        ])
    }

    fn positions(cube: &Cube) -> Vec<Vector3<f64>> {
        cube.cubies().iter().map(|cubie| cubie.position).collect()
    }

    #[test]
    fn lattice_has_expected_sticker_counts() {
        let cube = Cube::new(&test_scheme(), ViewAngle::Top);
        assert_eq!(cube.cubies().len(), 27);
        let mut by_count = [0usize; 4];
        for cubie in cube.cubies() {
            by_count[cubie.stickers.len()] += 1;
        }
        // 1 core, 6 centers, 12 edges, 8 corners.
        assert_eq!(by_count, [1, 6, 12, 8]);
    }

    #[test]
    fn scheme_colors_and_gray_fallback() {
        let partial = StickerScheme::from_entries(&[("y=1", Color::White)]);
        let cube = Cube::new(&partial, ViewAngle::Top);
        assert_eq!(cube.sticker_color("U").unwrap(), Color::White);
        assert_eq!(cube.sticker_color("R").unwrap(), Color::Gray);
        assert_eq!(cube.sticker_color("DF").unwrap(), Color::Gray);
    }

    #[test]
    fn set_sticker_color_round_trips() {
        let mut cube = Cube::new(&test_scheme(), ViewAngle::Top);
        assert_eq!(cube.sticker_color("RUF").unwrap(), Color::Green);
        cube.set_sticker_color("RUF", Color::Black).unwrap();
        assert_eq!(cube.sticker_color("RUF").unwrap(), Color::Black);
        // The sibling stickers of the same corner cubie are untouched.
        assert_eq!(cube.sticker_color("URF").unwrap(), Color::White);
        assert_eq!(cube.sticker_color("FUR").unwrap(), Color::Orange);
    }

    #[test]
    fn invalid_names_are_rejected_before_lookup() {
        let cube = Cube::new(&test_scheme(), ViewAngle::Top);
        assert!(matches!(
            cube.sticker_color("RL"),
            Err(StickerLookupError::Location(_))
        ));
    }

    #[test]
    fn incremental_steps_compose_to_a_quarter_turn() {
        let scheme = test_scheme();
        let mut stepped = Cube::new(&scheme, ViewAngle::Top);
        let mut discrete = Cube::new(&scheme, ViewAngle::Top);

        for _ in 0..360 {
            stepped.rotate_slice(Axis::X, 1.0, -FRAC_PI_2 / 360.0);
        }
        discrete.rotate_slice(Axis::X, 1.0, -FRAC_PI_2);

        for (a, b) in positions(&stepped).iter().zip(positions(&discrete).iter()) {
            assert!(vector_equals(a, b), "{a:?} != {b:?}");
        }
    }

    #[test]
    fn quarter_turn_permutes_stickers() {
        let mut cube = Cube::new(&test_scheme(), ViewAngle::Top);
        // R sweeps -PI/2 about x; the front-right edge moves to the top.
        cube.rotate_slice(Axis::X, 1.0, -FRAC_PI_2);
        cube.finalize_turn();
        assert_eq!(cube.sticker_color("UR").unwrap(), Color::Orange);
        assert_eq!(cube.sticker_color("R").unwrap(), Color::Green);
    }

    #[test]
    fn finalize_snaps_positions_exactly() {
        let mut cube = Cube::new(&test_scheme(), ViewAngle::Top);
        for _ in 0..360 {
            cube.rotate_slice(Axis::Y, 1.0, -FRAC_PI_2 / 360.0);
        }
        cube.finalize_turn();
        for cubie in cube.cubies() {
            for component in cubie.position.iter() {
                assert_eq!(component.fract(), 0.0);
            }
        }
    }

    #[test]
    fn middle_slice_leaves_outer_layers_alone() {
        let mut cube = Cube::new(&test_scheme(), ViewAngle::Top);
        let before = positions(&cube);
        cube.rotate_slice(Axis::X, 0.0, FRAC_PI_2);
        let after = positions(&cube);
        let moved = before
            .iter()
            .zip(after.iter())
            .filter(|(a, b)| !vector_equals(a, b))
            .count();
        // 8 of the 9 selected cubies move; the core sits on the axis.
        assert_eq!(moved, 8);
        for (a, b) in before.iter().zip(after.iter()) {
            if !float_equals(a[0], 0.0) {
                assert!(vector_equals(a, b));
            }
        }
    }
}
