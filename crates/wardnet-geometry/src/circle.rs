//! Two-circle intersection with observational-error correction.
//!
//! A point with known distances to two already-resolved devices lies on
//! the intersection of two circles. Measured distances are noisy, so the
//! circles may fail to touch at all; [`reconcile_radii`] nudges such
//! readings into a consistent configuration before the closed-form
//! intersection runs.

use crate::error::{Error, Result};
use crate::point::Point;

/// Step budget for one phase of radius adjustment.
pub const RADIUS_ADJUST_BUDGET: u32 = 5000;

/// Nudge two radii until they satisfy the triangle inequality with `d`.
///
/// `rn` and `rm` are measured distances from two known devices to the
/// device being located; `d` is the distance between the known devices.
///
/// - Separate circles (`d > rn + rm`): both radii grow by 1 per step.
/// - One circle inside the other (`d < |rn − rm|`): the larger radius
///   shrinks while the smaller grows, 1 unit each per step, with three
///   times the budget of the first phase.
///
/// On success the returned pair satisfies `|rn − rm| ≤ d ≤ rn + rm`.
/// Coincident circles (`d == 0` with equal radii) have infinitely many
/// intersections and always fail.
pub fn reconcile_radii(d: f64, mut rn: f64, mut rm: f64) -> Result<(f64, f64)> {
    let mut steps = 0u32;

    // Circles are separate: grow both until they touch.
    while d > rn + rm {
        if steps >= RADIUS_ADJUST_BUDGET {
            return Err(Error::DisjointCircles);
        }
        rn += 1.0;
        rm += 1.0;
        steps += 1;
    }

    // One circle inside the other: move the radii toward each other.
    while d < (rn - rm).abs() {
        if steps >= 3 * RADIUS_ADJUST_BUDGET {
            return Err(Error::ContainedCircles);
        }
        if rn > rm {
            rn -= 1.0;
            rm += 1.0;
        } else {
            rn += 1.0;
            rm -= 1.0;
        }
        steps += 1;
    }

    if d == 0.0 && rn == rm {
        return Err(Error::CoincidentCircles);
    }

    Ok((rn, rm))
}

/// Intersect the circles around two resolved devices.
///
/// `r1` and `r2` are the measured distances from `c1` and `c2` to the
/// device being located. Radii pass through [`reconcile_radii`] first.
///
/// The circles meet in up to two points. The candidate below the x-axis
/// is treated as a mirror image and discarded; when the first-computed
/// candidate sits on or above the axis it wins even if the mirror does
/// too. The tie-break is arbitrary but must stay consistent, since every
/// later placement builds on earlier ones.
pub fn intersect_two_circles(c1: Point, r1: f64, c2: Point, r2: f64) -> Result<Point> {
    let d = c1.distance_to(&c2);
    let (r1, r2) = reconcile_radii(d, r1, r2)?;

    // Chord construction: `a` is the distance from c1 to the chord's
    // midpoint along the center line, `h` the half-chord length.
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();

    let mx = c1.x + a * (c2.x - c1.x) / d;
    let my = c1.y + a * (c2.y - c1.y) / d;

    let first = Point::new(
        mx + h * (c2.y - c1.y) / d,
        my - h * (c2.x - c1.x) / d,
    );
    if first.y < 0.0 {
        return Ok(Point::new(
            mx - h * (c2.y - c1.y) / d,
            my + h * (c2.x - c1.x) / d,
        ));
    }
    Ok(first)
}
