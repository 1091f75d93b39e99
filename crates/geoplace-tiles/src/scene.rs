//! Interfaces to the rendering and camera collaborators.
//!
//! The renderer owns the scene object and its root transform; placement reads
//! the transform, computes a new one and assigns it back explicitly. The
//! camera only receives a volume to frame.

use std::time::Duration;

use glam::DMat4;

use crate::bounds::BoundingSphere;

/// A renderable object with a root transform, such as a loaded tileset.
pub trait SceneObject {
    /// Current transform from the object's local frame to world space.
    fn root_transform(&self) -> DMat4;

    /// Replace the root transform.
    fn set_root_transform(&mut self, transform: DMat4);

    /// World-space bounding volume under the current root transform.
    fn bounding_volume(&self) -> BoundingSphere;
}

/// A camera that can animate towards a bounding volume.
pub trait CameraFlight {
    /// Start a flight that frames `target` over `duration`.
    ///
    /// Fire-and-forget: the flight runs on the camera's own schedule.
    fn fly_to(&mut self, target: &BoundingSphere, duration: Duration);
}

/// A requested camera flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    /// The volume to frame.
    pub target: BoundingSphere,
    /// Animation duration.
    pub duration: Duration,
}

/// A headless camera that logs and records flight requests.
#[derive(Debug, Default)]
pub struct LoggingCamera {
    flights: Vec<FlyTo>,
}

impl LoggingCamera {
    /// Create a camera with no recorded flights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flights requested so far, oldest first.
    #[must_use]
    pub fn flights(&self) -> &[FlyTo] {
        &self.flights
    }

    /// The most recent flight, if any.
    #[must_use]
    pub fn last_flight(&self) -> Option<&FlyTo> {
        self.flights.last()
    }
}

impl CameraFlight for LoggingCamera {
    fn fly_to(&mut self, target: &BoundingSphere, duration: Duration) {
        tracing::info!(
            center = ?target.center,
            radius = target.radius,
            duration_secs = duration.as_secs_f64(),
            "camera flight requested"
        );
        self.flights.push(FlyTo {
            target: *target,
            duration,
        });
    }
}
