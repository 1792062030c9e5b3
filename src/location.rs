//! Sticker addressing by location name.
//!
//! A location name is one to three face letters from {U, D, L, R, F, B},
//! each on a distinct axis. The sum of the letters' unit vectors is the
//! owning cubie's lattice position; the first letter is the primary face,
//! so "RU" and "UR" address different stickers on the same edge cubie.

use nalgebra::Vector3;
use thiserror::Error;

use crate::moves::Axis;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum LocationError {
    #[error("empty location name")]
    Empty,
    #[error("location name `{0}` has more than three faces")]
    TooLong(String),
    #[error("unknown face letter `{0}`")]
    UnknownFace(char),
    #[error("location name `{name}` repeats the {axis} axis")]
    RepeatedAxis { name: String, axis: char },
}

fn face(letter: char) -> Option<(Axis, f64)> {
    Some(match letter {
        'U' => (Axis::Y, 1.0),
        'D' => (Axis::Y, -1.0),
        'F' => (Axis::Z, 1.0),
        'B' => (Axis::Z, -1.0),
        'R' => (Axis::X, 1.0),
        'L' => (Axis::X, -1.0),
        _ => return None,
    })
}

fn parse(name: &str) -> Result<Vec<(Axis, f64)>, LocationError> {
    if name.is_empty() {
        return Err(LocationError::Empty);
    }
    if name.chars().count() > 3 {
        return Err(LocationError::TooLong(name.to_owned()));
    }
    let mut faces = Vec::with_capacity(3);
    for letter in name.chars() {
        let (axis, sign) = face(letter).ok_or(LocationError::UnknownFace(letter))?;
        if faces.iter().any(|&(seen, _)| seen == axis) {
            return Err(LocationError::RepeatedAxis {
                name: name.to_owned(),
                axis: axis.letter(),
            });
        }
        faces.push((axis, sign));
    }
    Ok(faces)
}

/// World position of the cubie a location name refers to.
pub(crate) fn cubie_position(name: &str) -> Result<Vector3<f64>, LocationError> {
    let mut position = Vector3::zeros();
    for (axis, sign) in parse(name)? {
        position[axis.index()] += sign;
    }
    Ok(position)
}

/// World position of the named sticker: its cubie's center plus half a unit
/// along the primary face's normal.
pub(crate) fn sticker_position(name: &str) -> Result<Vector3<f64>, LocationError> {
    let faces = parse(name)?;
    let mut position = Vector3::zeros();
    for &(axis, sign) in &faces {
        position[axis.index()] += sign;
    }
    let (primary_axis, primary_sign) = faces[0];
    position[primary_axis.index()] += primary_sign * 0.5;
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_edge_and_center_positions() {
        assert_eq!(cubie_position("RUF").unwrap(), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(cubie_position("RU").unwrap(), Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(cubie_position("R").unwrap(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(cubie_position("D").unwrap(), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(cubie_position("BL").unwrap(), Vector3::new(-1.0, 0.0, -1.0));
    }

    #[test]
    fn components_stay_on_the_lattice() {
        for name in ["U", "RU", "UR", "RUF", "FDL", "BD"] {
            let position = cubie_position(name).unwrap();
            let mut nonzero = 0;
            for component in position.iter() {
                assert!([-1.0, 0.0, 1.0].contains(component));
                if *component != 0.0 {
                    nonzero += 1;
                }
            }
            assert_eq!(nonzero, name.len());
        }
    }

    #[test]
    fn primary_face_offsets_the_sticker() {
        assert_eq!(
            sticker_position("RU").unwrap(),
            Vector3::new(1.5, 1.0, 0.0)
        );
        // Same cubie, different primary face, different sticker.
        assert_eq!(
            sticker_position("UR").unwrap(),
            Vector3::new(1.0, 1.5, 0.0)
        );
    }

    #[test]
    fn repeated_axis_is_rejected() {
        assert_eq!(
            cubie_position("RL"),
            Err(LocationError::RepeatedAxis {
                name: "RL".to_owned(),
                axis: 'x',
            })
        );
        assert!(sticker_position("UD").is_err());
        assert!(cubie_position("RUR").is_err());
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert_eq!(cubie_position(""), Err(LocationError::Empty));
        assert_eq!(cubie_position("Q"), Err(LocationError::UnknownFace('Q')));
        assert_eq!(cubie_position("u"), Err(LocationError::UnknownFace('u')));
    }
}
