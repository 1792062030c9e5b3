//! Owner of the two cubes and their turn state.
//!
//! The UI resolves every interaction into a cube id, a base move letter and
//! a click button, and forwards animation frames. Everything else (move
//! lookup, preemption, blanking, synchronization) happens here, on the
//! single update thread.

use std::mem;
use std::time::Instant;

use log::{debug, error, warn};

use crate::camera::ViewAngle;
use crate::cube::{Color, Cube, StickerLookupError, StickerScheme};
use crate::moves::move_definition;
use crate::sync;
use crate::turn::{TickResult, TurnAnimation, TurnState};

/// Identifies one of the two cube slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CubeId {
    Primary,
    Secondary,
}

impl CubeId {
    pub(crate) const BOTH: [CubeId; 2] = [CubeId::Primary, CubeId::Secondary];

    fn index(self) -> usize {
        match self {
            CubeId::Primary => 0,
            CubeId::Secondary => 1,
        }
    }
}

/// Which mouse button was used on a move key. The secondary button selects
/// the inverse move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveButton {
    Primary,
    Secondary,
}

fn primary_scheme() -> StickerScheme {
    StickerScheme::from_entries(&[
        ("x=1", Color::Green),
        ("x=-1", Color::Blue),
        ("y=1", Color::White),
        ("y=-1", Color::Yellow),
        ("z=1", Color::Orange),
        ("z=-1", Color::Red),
    ])
}

fn secondary_scheme() -> StickerScheme {
    StickerScheme::from_entries(&[
        ("x=1", Color::Red),
        ("x=-1", Color::Orange),
        ("y=1", Color::White),
        ("y=-1", Color::Yellow),
        ("z=1", Color::Green),
        ("z=-1", Color::Blue),
    ])
}

/// Both cube instances plus per-cube animation state. There is no global
/// registry; whoever needs the cubes holds this owner.
#[derive(Debug)]
pub(crate) struct CubePair {
    cubes: [Cube; 2],
    turns: [TurnState; 2],
}

impl CubePair {
    pub(crate) fn new() -> Self {
        let mut pair = Self {
            cubes: [
                Cube::new(&primary_scheme(), ViewAngle::Top),
                Cube::new(&secondary_scheme(), ViewAngle::Bottom),
            ],
            turns: [TurnState::Idle, TurnState::Idle],
        };
        // Start with the joined faces agreeing on their shared colors.
        pair.sync_from(CubeId::Primary);
        pair
    }

    pub(crate) fn cube(&self, id: CubeId) -> &Cube {
        &self.cubes[id.index()]
    }

    /// Entry point for the input collaborator: a base move letter and the
    /// click button that selects between the move and its inverse.
    pub(crate) fn on_user_move(
        &mut self,
        id: CubeId,
        letter: char,
        button: MoveButton,
        now: Instant,
    ) {
        let name = match button {
            MoveButton::Primary => letter.to_string(),
            MoveButton::Secondary => format!("{letter}i"),
        };
        let Some(definition) = move_definition(&name) else {
            warn!("move not found: {name}");
            return;
        };

        // Any turn still in flight, on either cube, jumps to its end state
        // before the new one begins: the shared-sticker writes below resolve
        // names by position and need both lattices exact.
        for each in CubeId::BOTH {
            self.force_finish(each);
        }

        if let Err(err) = self.blank_shared(id) {
            error!("aborting move {name}: {err}");
            return;
        }
        debug!("starting move {name} on {id:?} cube");
        self.turns[id.index()] = TurnState::Running(TurnAnimation::new(definition, now));
    }

    /// Advances both cubes' animations by one frame.
    pub(crate) fn tick(&mut self, now: Instant) {
        for id in CubeId::BOTH {
            let index = id.index();
            let finished = match &mut self.turns[index] {
                TurnState::Idle => false,
                TurnState::Running(animation) => {
                    animation.tick(&mut self.cubes[index], now) == TickResult::Finished
                }
            };
            if finished {
                self.turns[index] = TurnState::Idle;
                self.sync_from(id);
            }
        }
    }

    /// Forces any in-flight turn on `id` to completion, including its
    /// synchronization step. No-op when the cube is idle.
    fn force_finish(&mut self, id: CubeId) {
        let index = id.index();
        if let TurnState::Running(mut animation) =
            mem::replace(&mut self.turns[index], TurnState::Idle)
        {
            animation.force_finish(&mut self.cubes[index]);
            self.sync_from(id);
        }
    }

    fn sync_from(&mut self, source: CubeId) {
        let [primary, secondary] = &mut self.cubes;
        let result = match source {
            CubeId::Primary => sync::copy_shared(primary, secondary, source),
            CubeId::Secondary => sync::copy_shared(secondary, primary, source),
        };
        if let Err(err) = result {
            error!("shared sticker sync from {source:?} failed: {err}");
        }
    }

    fn blank_shared(&mut self, source: CubeId) -> Result<(), StickerLookupError> {
        let [primary, secondary] = &mut self.cubes;
        match source {
            CubeId::Primary => sync::blank_shared(secondary, source),
            CubeId::Secondary => sync::blank_shared(primary, source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector_equals;
    use crate::turn::TURN_DURATION;
    use nalgebra::Vector3;

    fn positions(cube: &Cube) -> Vec<Vector3<f64>> {
        cube.cubies().iter().map(|cubie| cubie.position).collect()
    }

    fn colors(cube: &Cube) -> Vec<Color> {
        cube.cubies()
            .iter()
            .flat_map(|cubie| cubie.stickers.iter().map(|sticker| sticker.color))
            .collect()
    }

    #[test]
    fn construction_pre_syncs_shared_stickers() {
        let pair = CubePair::new();
        for (primary_name, secondary_name) in sync::shared_pairs(CubeId::Primary) {
            assert_eq!(
                pair.cube(CubeId::Secondary)
                    .sticker_color(secondary_name)
                    .unwrap(),
                pair.cube(CubeId::Primary)
                    .sticker_color(primary_name)
                    .unwrap()
            );
        }
    }

    #[test]
    fn unknown_move_is_a_no_op() {
        let mut pair = CubePair::new();
        let now = Instant::now();
        let before_positions = positions(pair.cube(CubeId::Primary));
        let before_colors = colors(pair.cube(CubeId::Primary));

        pair.on_user_move(CubeId::Primary, 'Q', MoveButton::Primary, now);
        pair.tick(now + TURN_DURATION);

        assert_eq!(positions(pair.cube(CubeId::Primary)), before_positions);
        assert_eq!(colors(pair.cube(CubeId::Primary)), before_colors);
        assert!(matches!(pair.turns[0], TurnState::Idle));
    }

    #[test]
    fn secondary_button_selects_the_inverse() {
        let mut pair = CubePair::new();
        let now = Instant::now();
        let before = positions(pair.cube(CubeId::Primary));

        pair.on_user_move(CubeId::Primary, 'R', MoveButton::Primary, now);
        pair.tick(now + TURN_DURATION);
        pair.on_user_move(CubeId::Primary, 'R', MoveButton::Secondary, now + TURN_DURATION);
        pair.tick(now + TURN_DURATION * 2);

        for (a, b) in before.iter().zip(positions(pair.cube(CubeId::Primary)).iter()) {
            assert!(vector_equals(a, b));
        }
    }

    #[test]
    fn turn_start_blanks_the_partner_stickers() {
        let mut pair = CubePair::new();
        let now = Instant::now();
        pair.on_user_move(CubeId::Primary, 'R', MoveButton::Primary, now);
        for (_, secondary_name) in sync::shared_pairs(CubeId::Primary) {
            assert_eq!(
                pair.cube(CubeId::Secondary)
                    .sticker_color(secondary_name)
                    .unwrap(),
                Color::Black
            );
        }
    }

    #[test]
    fn completed_turn_syncs_shared_stickers() {
        let mut pair = CubePair::new();
        let now = Instant::now();
        pair.on_user_move(CubeId::Primary, 'R', MoveButton::Primary, now);
        pair.tick(now + TURN_DURATION);

        assert!(matches!(pair.turns[0], TurnState::Idle));
        for (primary_name, secondary_name) in sync::shared_pairs(CubeId::Primary) {
            assert_eq!(
                pair.cube(CubeId::Secondary)
                    .sticker_color(secondary_name)
                    .unwrap(),
                pair.cube(CubeId::Primary)
                    .sticker_color(primary_name)
                    .unwrap()
            );
        }
    }

    #[test]
    fn secondary_cube_turn_syncs_back_to_primary() {
        let mut pair = CubePair::new();
        let now = Instant::now();
        pair.on_user_move(CubeId::Secondary, 'F', MoveButton::Primary, now);
        pair.tick(now + TURN_DURATION);

        for (secondary_name, primary_name) in sync::shared_pairs(CubeId::Secondary) {
            assert_eq!(
                pair.cube(CubeId::Primary)
                    .sticker_color(primary_name)
                    .unwrap(),
                pair.cube(CubeId::Secondary)
                    .sticker_color(secondary_name)
                    .unwrap()
            );
        }
    }

    #[test]
    fn new_move_preempts_the_running_turn() {
        let mut pair = CubePair::new();
        let now = Instant::now();

        // Reference: a full U turn on its own.
        let mut reference = CubePair::new();
        reference.on_user_move(CubeId::Primary, 'U', MoveButton::Primary, now);
        reference.tick(now + TURN_DURATION);
        let after_u = positions(reference.cube(CubeId::Primary));

        // Start U, advance partway, then preempt with F before it finishes.
        pair.on_user_move(CubeId::Primary, 'U', MoveButton::Primary, now);
        pair.tick(now + TURN_DURATION / 4);
        pair.on_user_move(CubeId::Primary, 'F', MoveButton::Primary, now + TURN_DURATION / 4);

        // Before any F delta has been applied, the U layer must sit exactly
        // at its post-quarter-turn lattice positions.
        for (a, b) in after_u.iter().zip(positions(pair.cube(CubeId::Primary)).iter()) {
            assert!(vector_equals(a, b), "{a:?} != {b:?}");
        }
        assert!(matches!(pair.turns[0], TurnState::Running(_)));
    }

    #[test]
    fn move_on_one_cube_preempts_the_other() {
        let mut pair = CubePair::new();
        let now = Instant::now();

        // Reference: a full R turn on its own.
        let mut reference = CubePair::new();
        reference.on_user_move(CubeId::Primary, 'R', MoveButton::Primary, now);
        reference.tick(now + TURN_DURATION);
        let after_r = positions(reference.cube(CubeId::Primary));

        // Start R on the primary cube, advance partway, then start a move on
        // the secondary cube. The primary's turn jumps to completion so both
        // lattices are exact for the shared-sticker writes.
        pair.on_user_move(CubeId::Primary, 'R', MoveButton::Primary, now);
        pair.tick(now + TURN_DURATION / 4);
        pair.on_user_move(
            CubeId::Secondary,
            'U',
            MoveButton::Primary,
            now + TURN_DURATION / 4,
        );

        for (a, b) in after_r.iter().zip(positions(pair.cube(CubeId::Primary)).iter()) {
            assert!(vector_equals(a, b), "{a:?} != {b:?}");
        }
        assert!(matches!(pair.turns[0], TurnState::Idle));
        assert!(matches!(pair.turns[1], TurnState::Running(_)));
    }
}
