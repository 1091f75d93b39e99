//! The placement pipeline: reposition, reorient, assign back, fly the camera.

use std::time::Duration;

use geoplace::{Ellipsoid, reorient, reposition};
use glam::DMat4;

use crate::config::PlacementConfig;
use crate::error::{Error, Result};
use crate::ready::ReadyListener;
use crate::scene::{CameraFlight, SceneObject};

/// Default duration of the camera flight to a freshly placed object.
pub const DEFAULT_FLIGHT_DURATION: Duration = Duration::from_secs(2);

/// A scene object after placement, with the transform that was assigned.
#[derive(Debug)]
pub struct Placed<O> {
    /// The placed object.
    pub object: O,
    /// The root transform assigned to it.
    pub transform: DMat4,
}

/// Place `object` according to `config` and frame it with `camera`.
///
/// The object's position is updated before its orientation, so heading,
/// pitch and roll are measured in the local frame at the new location. The
/// camera is only asked to move once the new transform has been assigned.
pub fn place_object<O, C>(
    object: &mut O,
    camera: &mut C,
    config: &PlacementConfig,
    ellipsoid: &Ellipsoid,
    flight_duration: Duration,
) -> Result<DMat4>
where
    O: SceneObject + ?Sized,
    C: CameraFlight + ?Sized,
{
    let current = object.root_transform();
    let moved = reposition(&current, config.position(), ellipsoid);
    let placed = reorient(&moved, config.orientation(), ellipsoid);

    if !placed.is_finite() {
        return Err(Error::NonFiniteTransform);
    }

    object.set_root_transform(placed);
    tracing::info!(
        source = config.source_url(),
        longitude = config.position().longitude,
        latitude = config.position().latitude,
        height = config.position().height,
        heading = config.orientation().heading,
        pitch = config.orientation().pitch,
        roll = config.orientation().roll,
        "placed scene object"
    );

    camera.fly_to(&object.bounding_volume(), flight_duration);
    Ok(placed)
}

/// Wait for the object behind `listener` to become ready, then place it.
pub fn place_when_ready<O, C>(
    listener: ReadyListener<O>,
    camera: &mut C,
    config: &PlacementConfig,
    ellipsoid: &Ellipsoid,
    flight_duration: Duration,
) -> Result<Placed<O>>
where
    O: SceneObject,
    C: CameraFlight + ?Sized,
{
    let mut object = listener.wait()?;
    tracing::debug!(source = config.source_url(), "scene object ready");
    let transform = place_object(&mut object, camera, config, ellipsoid, flight_duration)?;
    Ok(Placed { object, transform })
}
