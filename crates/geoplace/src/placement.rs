//! Repositioning and reorienting root transforms.
//!
//! [`reposition`] moves a transform so its origin lands on a geodetic
//! position; [`reorient`] replaces its rotation with a heading/pitch/roll
//! measured in the east-north-up frame at its current origin. Run them in that
//! order (or call [`place`]) so the orientation is anchored at the new
//! location.

use glam::DMat4;

use crate::transform::{decompose, origin_of};
use crate::{Ellipsoid, GeodeticPosition, HeadingPitchRoll, compose, east_north_up};

/// Translate `current` so that its origin lands on `target`.
///
/// The translation is applied in world space, so rotation and scale are
/// left untouched. If the origin already coincides with `target`, the
/// result equals `current`.
#[must_use]
pub fn reposition(current: &DMat4, target: GeodeticPosition, ellipsoid: &Ellipsoid) -> DMat4 {
    let old_origin = origin_of(current);
    let new_origin = ellipsoid.geodetic_to_cartesian(target);
    DMat4::from_translation(new_origin - old_origin) * *current
}

/// Replace the rotation of `current` with `target` relative to the local
/// east-north-up frame at the current origin.
///
/// The previous rotation is discarded rather than composed with; translation
/// and scale are preserved. Applying the same orientation twice gives the
/// same result, since the anchor point does not move.
#[must_use]
pub fn reorient(current: &DMat4, target: HeadingPitchRoll, ellipsoid: &Ellipsoid) -> DMat4 {
    let parts = decompose(current);
    let frame = east_north_up(origin_of(current), ellipsoid);
    let rotation = (frame.rotation() * target.to_quat()).normalize();
    compose(parts.translation, rotation, parts.scale)
}

/// Reposition `current` to `position`, then reorient it to `orientation`.
#[must_use]
pub fn place(
    current: &DMat4,
    position: GeodeticPosition,
    orientation: HeadingPitchRoll,
    ellipsoid: &Ellipsoid,
) -> DMat4 {
    let moved = reposition(current, position, ellipsoid);
    reorient(&moved, orientation, ellipsoid)
}
