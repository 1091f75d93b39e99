//! Placing 3D Tiles tilesets on the globe.
//!
//! This crate wires the pure geometry in [`geoplace`] to a scene: a validated
//! [`PlacementConfig`], a [`Tileset`] whose root transform can be rewritten, a
//! one-shot readiness signal from the loader, and a camera that frames the
//! result once it has moved.
//!
//! # Design principles
//!
//! - **Explicit ownership**: the scene object owns its transform; placement
//!   reads it, computes a new one and assigns it back
//! - **Collaborators behind traits**: [`SceneObject`] and [`CameraFlight`]
//!   keep rendering out of this crate
//! - **Validate at the edge**: configuration is checked once on load, the
//!   geometry underneath does no range checks
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use geoplace::Ellipsoid;
//! use geoplace_tiles::{
//!     DEFAULT_FLIGHT_DURATION, LoggingCamera, PlacementConfig, Tileset, place_when_ready,
//!     ready_signal,
//! };
//!
//! let config = PlacementConfig::default();
//! let (signal, listener) = ready_signal();
//! std::thread::spawn(move || {
//!     if let Ok(tileset) = Tileset::load(Path::new("tiles/tileset.json")) {
//!         signal.notify(tileset);
//!     }
//! });
//!
//! let mut camera = LoggingCamera::new();
//! let placed = place_when_ready(
//!     listener,
//!     &mut camera,
//!     &config,
//!     &Ellipsoid::WGS84,
//!     DEFAULT_FLIGHT_DURATION,
//! )?;
//! placed.object.save(Path::new("tiles/tileset.placed.json"))?;
//! # Ok::<(), geoplace_tiles::Error>(())
//! ```

pub mod bounds;
pub mod config;
mod error;
pub mod pipeline;
mod ready;
pub mod scene;
mod tileset;

pub use bounds::{BoundingSphere, RootVolume};
pub use config::{PlacementConfig, RawPlacementConfig};
pub use error::{Error, Result};
pub use pipeline::{DEFAULT_FLIGHT_DURATION, Placed, place_object, place_when_ready};
pub use ready::{ReadyListener, ReadySignal, ready_signal};
pub use scene::{CameraFlight, FlyTo, LoggingCamera, SceneObject};
pub use tileset::Tileset;
