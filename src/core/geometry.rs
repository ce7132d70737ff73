//! Pure path constructors for the circular chart shapes.
//!
//! All paths are centered at the origin. Angle 0 points at the top of the
//! circle and positive angles run clockwise in screen coordinates.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::render::Path;

const START_ANGLE: f64 = -FRAC_PI_2;

const FULL_TURN_TOLERANCE: f64 = 1e-9;

fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.cos(), radius * angle.sin())
}

/// Closed circular path of the given radius.
#[must_use]
pub fn circle_path(radius: f64) -> Path {
    let mut path = Path::new();
    path.add_circle(0.0, 0.0, radius);
    path
}

/// Closed polygon whose corners trace the circle of the given radius.
///
/// Corner counts below 3 are clamped to 3. The first corner sits at the
/// top of the circle; the rest follow clockwise at equal angular steps.
#[must_use]
pub fn polygon_path(radius: f64, corners: i32) -> Path {
    let corners = corners.max(3);

    let mut path = Path::new();
    let (x, y) = polar(radius, START_ANGLE);
    path.move_to(x, y);
    for i in 1..corners {
        let angle = START_ANGLE + TAU * f64::from(i) / f64::from(corners);
        let (x, y) = polar(radius, angle);
        path.line_to(x, y);
    }
    path.close();
    path
}

/// Closed pie wedge between two angles (radians).
///
/// A span of a full turn short-circuits to [`circle_path`]: an endpoint
/// arc cannot represent a full turn. The wedge is two radii plus an arc;
/// the large-arc flag is chosen from whether the span exceeds half a turn
/// so the arc bulges the correct way for any span size.
#[must_use]
pub fn pie_path(radius: f64, from_angle: f64, to_angle: f64) -> Path {
    let span = to_angle - from_angle;
    if (span - TAU).abs() <= FULL_TURN_TOLERANCE {
        return circle_path(radius);
    }

    let large_arc = span > PI;

    let mut path = Path::new();
    path.move_to(0.0, 0.0);
    let (start_x, start_y) = polar(radius, START_ANGLE + from_angle);
    path.line_to(start_x, start_y);
    let (end_x, end_y) = polar(radius, START_ANGLE + to_angle);
    path.arc_to(radius, large_arc, true, end_x, end_y);
    path.close();
    path
}
