//! Heading, pitch and roll relative to a local east-north-up frame.

use glam::DQuat;

/// An orientation expressed as heading, pitch and roll in degrees.
///
/// The angles are applied in the local east-north-up frame with the model's
/// x axis as forward, y as lateral and z as up:
///
/// - heading rotates about z, positive clockwise when viewed from above;
/// - pitch rotates about y, positive raising the nose;
/// - roll rotates about x, the forward axis.
///
/// The combined rotation applies roll first, then pitch, then heading, which
/// is the usual aerospace yaw-pitch-roll sequence read from the outside in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadingPitchRoll {
    /// Heading in degrees.
    pub heading: f64,
    /// Pitch in degrees.
    pub pitch: f64,
    /// Roll in degrees.
    pub roll: f64,
}

impl HeadingPitchRoll {
    /// Create an orientation from angles in degrees.
    #[must_use]
    pub const fn from_degrees(heading: f64, pitch: f64, roll: f64) -> Self {
        Self {
            heading,
            pitch,
            roll,
        }
    }

    /// Create an orientation from angles in radians.
    #[must_use]
    pub fn from_radians(heading: f64, pitch: f64, roll: f64) -> Self {
        Self {
            heading: heading.to_degrees(),
            pitch: pitch.to_degrees(),
            roll: roll.to_degrees(),
        }
    }

    /// Convert to a rotation in the local frame.
    ///
    /// Heading and pitch are negated because the frame's z and y rotations are
    /// counter-clockwise, while heading is clockwise and pitch is nose-up.
    #[must_use]
    pub fn to_quat(&self) -> DQuat {
        let heading = DQuat::from_rotation_z(-self.heading.to_radians());
        let pitch = DQuat::from_rotation_y(-self.pitch.to_radians());
        let roll = DQuat::from_rotation_x(self.roll.to_radians());
        heading * pitch * roll
    }
}
