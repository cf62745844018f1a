//! Pure math for gesture geometry.
//!
//! Coordinates are logical pixels unless a caller documents otherwise. All
//! types here are plain values with no identity.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Point3D, Size};
}
