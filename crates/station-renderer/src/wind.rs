//! Wind and hemisphere geometry.
//!
//! The wind representation anchors to the canvas center and extends beyond
//! the central cell, so every primitive here is a canvas-level overlay with
//! its own transform origin rather than slot-local content.

use station_common::{DecodedObservation, Hemisphere};

use crate::codes::wind_symbol_index;
use crate::diagram::{IconPrimitive, Primitive, Transform};
use crate::layout::CANVAS_SIZE;

/// Asset key for the calm-wind marker (symbol index 0 or 1).
pub const CALM_ICON: &str = "wind/calm";
/// Asset key for the missing-speed shaft (terminal X marker).
pub const MISSING_SPEED_ICON: &str = "wind/missing_speed";

fn hemisphere_set(hemisphere: Hemisphere) -> &'static str {
    match hemisphere {
        Hemisphere::Northern => "north",
        Hemisphere::Southern => "south",
    }
}

/// Rotation correcting the icon's built-in default heading.
///
/// Northern icons rotate by direction + 90 degrees, southern by
/// direction - 90; the southern set mirrors the barbs so they trail on the
/// correct side of the shaft.
fn shaft_rotation(direction: f64, hemisphere: Hemisphere) -> f64 {
    match hemisphere {
        Hemisphere::Northern => direction + 90.0,
        Hemisphere::Southern => direction - 90.0,
    }
}

/// Compose the wind overlay primitives for one observation.
///
/// A missing direction renders nothing at all, even when the speed is
/// known. A known direction with a missing speed renders the dedicated
/// missing-speed shaft instead of a barb.
pub fn wind_overlays(obs: &DecodedObservation, hemisphere: Hemisphere) -> Vec<Primitive> {
    let Some(wind) = obs.surface_wind.value() else {
        return Vec::new();
    };
    let Some(direction) = wind.direction.value().and_then(|m| m.value.get()) else {
        return Vec::new();
    };

    let anchor = Transform::at(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0);

    let speed = wind.speed.value().and_then(|s| {
        s.value
            .get()
            .map(|v| (v, s.unit.value().map(String::as_str).unwrap_or("m/s")))
    });

    let icon = match speed {
        Some((speed, unit)) => {
            let index = wind_symbol_index(speed, unit);
            if index <= 1 {
                // Below the smallest real glyph; the calm ring is unrotated.
                IconPrimitive::new(CALM_ICON).at(anchor)
            } else {
                let path = format!("wind/{}_{:02}", hemisphere_set(hemisphere), index);
                IconPrimitive::new(path).at(anchor.rotated(shaft_rotation(direction, hemisphere)))
            }
        }
        None => IconPrimitive::new(MISSING_SPEED_ICON).at(anchor.rotated(direction + 90.0)),
    };

    vec![Primitive::Icon(icon)]
}
