//! Wardnet Positioning Geometry
//!
//! Reconstructs 2-D device coordinates purely from pairwise distance
//! readings. The pieces, leaf to root:
//!
//! - [`reconcile_radii`] / [`intersect_two_circles`]: closed-form
//!   two-circle intersection with observational-error correction
//! - [`DistanceTable`]: raw directed readings reconciled into one value
//!   per unordered pair, keyed by origin point
//! - [`resolve_all`]: the incremental resolution loop that bootstraps two
//!   points on a baseline, then places every further point by circle
//!   intersections against already-resolved anchors
//!
//! # Resolution frame
//!
//! Distances are the only observable, so coordinates are meaningful up to
//! a global rotation, reflection and translation. The engine fixes the
//! frame by convention: the first point lands at the origin and its first
//! listed neighbor on the negative x-axis. Downstream consumers must treat
//! the frame as a convention, not a derived fact.
//!
//! # Noisy readings
//!
//! Real distance measurements need not satisfy the triangle inequality.
//! Rather than rejecting such readings outright, the solver nudges the
//! two radii into a consistent configuration within a bounded step budget
//! and only fails once the budget is exhausted.

mod circle;
mod distance;
mod error;
mod point;
mod trilateration;

pub use circle::{intersect_two_circles, reconcile_radii, RADIUS_ADJUST_BUDGET};
pub use distance::{DistanceObservation, DistanceTable, PointId};
pub use error::{Error, Result};
pub use point::{centroid, Point};
pub use trilateration::resolve_all;
