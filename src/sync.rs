//! Cross-cube sticker synchronization.
//!
//! The two cubes model a physically joined pair sharing one column of
//! stickers: the primary cube's R face is glued to the secondary cube's F
//! face. The bijection below is hand-authored from that adjacency. After a
//! turn finalizes on either cube, the shared colors are copied from the
//! moved cube into the other; at the start of a turn the other cube's shared
//! stickers are blanked so a stale color is never shown mid-turn.

use crate::cube::{Color, Cube, StickerLookupError};
use crate::pair::CubeId;

/// Shared sticker pairs as (name on the primary cube, name on the secondary
/// cube).
pub(crate) const SHARED_STICKERS: [(&str, &str); 9] = [
    ("RUF", "FUL"),
    ("RU", "FU"),
    ("RUB", "FUR"),
    ("RF", "FL"),
    ("R", "F"),
    ("RB", "FR"),
    ("RDF", "FDL"),
    ("RD", "FD"),
    ("RDB", "FDR"),
];

/// The pairs oriented as (name on `source`, name on the other cube).
pub(crate) fn shared_pairs(
    source: CubeId,
) -> impl Iterator<Item = (&'static str, &'static str)> {
    SHARED_STICKERS.iter().map(move |&(primary, secondary)| match source {
        CubeId::Primary => (primary, secondary),
        CubeId::Secondary => (secondary, primary),
    })
}

/// Copies every shared sticker color from the cube that just finished a turn
/// onto its partner. Reads only finalized state.
pub(crate) fn copy_shared(
    source: &Cube,
    destination: &mut Cube,
    source_id: CubeId,
) -> Result<(), StickerLookupError> {
    for (source_name, destination_name) in shared_pairs(source_id) {
        let color = source.sticker_color(source_name)?;
        destination.set_sticker_color(destination_name, color)?;
    }
    Ok(())
}

/// Blanks the partner's shared stickers to the blocked color. Called before
/// the first rotation delta of a turn on `source_id`.
pub(crate) fn blank_shared(
    destination: &mut Cube,
    source_id: CubeId,
) -> Result<(), StickerLookupError> {
    for (_, destination_name) in shared_pairs(source_id) {
        destination.set_sticker_color(destination_name, Color::Black)?;
    }
    Ok(())
}
