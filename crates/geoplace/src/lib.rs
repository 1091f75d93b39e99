//! Geodetic placement of 3D models on an ellipsoid.
//!
//! This crate converts a geodetic position (longitude, latitude, height) and a
//! local heading/pitch/roll into a 4x4 affine transform for a model's root
//! node, preserving whatever scale the model already carries.
//!
//! # Design principles
//!
//! - **Pure**: every operation takes its inputs by value or reference and
//!   returns a new value; nothing is cached or shared between calls
//! - **f64 throughout**: globe coordinates are millions of meters, so all math
//!   uses `glam`'s double precision types
//! - **No validation**: NaN and infinite inputs propagate into the output; range
//!   checks belong to the caller
//!
//! # Example
//!
//! ```
//! use geoplace::{Ellipsoid, GeodeticPosition, HeadingPitchRoll, place};
//! use glam::DMat4;
//!
//! let target = GeodeticPosition::from_degrees(9.2343, 49.2005, -260.0);
//! let orientation = HeadingPitchRoll::from_degrees(45.0, 0.0, 0.0);
//! let root = place(&DMat4::IDENTITY, target, orientation, &Ellipsoid::WGS84);
//! assert!(root.is_finite());
//! ```

pub mod ellipsoid;
pub mod frame;
mod geodetic;
mod orientation;
pub mod placement;
pub mod transform;

pub use ellipsoid::{Ellipsoid, geodetic_to_cartesian};
pub use frame::{LocalFrame, east_north_up, east_north_up_to_fixed_frame};
pub use geodetic::GeodeticPosition;
pub use orientation::HeadingPitchRoll;
pub use placement::{place, reorient, reposition};
pub use transform::{Decomposition, compose, decompose};
