//! Slot grid layout: the fixed 26-cell coordinate system.
//!
//! Slots 0-24 form a 5x5 row-major grid centered on a 100x100 canvas; slot
//! 12 anchors at the exact canvas center and slot 25 sits below the grid.

use tracing::warn;

use station_common::RenderOptions;

use crate::diagram::{Primitive, SlotGroup};

/// Canvas edge length in local units.
pub const CANVAS_SIZE: f64 = 100.0;
/// Top-left corner of the grid.
pub const GRID_ORIGIN: f64 = 16.66;
/// Cell edge length.
pub const CELL_SIZE: f64 = 13.33;
/// The central, non-suppressible anchor slot.
pub const CENTER_SLOT: usize = 12;
/// The exterior slot below the grid (reserved).
pub const EXTERIOR_SLOT: usize = 25;
/// Total slot containers per diagram.
pub const SLOT_COUNT: usize = 26;

/// Canvas position of a slot container.
///
/// Slot 12 anchors at the canvas center rather than its cell corner; every
/// other grid slot sits at its cell's top-left corner.
pub fn slot_position(index: usize) -> (f64, f64) {
    if index == CENTER_SLOT {
        return (CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0);
    }
    if index == EXTERIOR_SLOT {
        return (CANVAS_SIZE / 2.0, GRID_ORIGIN + 5.0 * CELL_SIZE);
    }
    let col = (index % 5) as f64;
    let row = (index / 5) as f64;
    (GRID_ORIGIN + col * CELL_SIZE, GRID_ORIGIN + row * CELL_SIZE)
}

/// Top-left corner of a slot's cell, for debug outlines. Differs from
/// [`slot_position`] only for the center and exterior slots.
fn cell_corner(index: usize) -> (f64, f64) {
    if index == EXTERIOR_SLOT {
        return (GRID_ORIGIN + 2.0 * CELL_SIZE, GRID_ORIGIN + 5.0 * CELL_SIZE);
    }
    let col = (index % 5) as f64;
    let row = (index / 5) as f64;
    (GRID_ORIGIN + col * CELL_SIZE, GRID_ORIGIN + row * CELL_SIZE)
}

/// Build the 26 positioned, empty slot containers.
///
/// Suppressed slots still get containers so indices stay stable; they are
/// only flagged so the rule engine skips them. Omitting slot 12 is refused
/// with a diagnostic. Debug mode adds dashed cell outlines without moving
/// any geometry.
pub fn build_slots(options: &RenderOptions) -> Vec<SlotGroup> {
    if options.elements_to_omit.contains(&CENTER_SLOT) {
        warn!("slot 12 is the spatial anchor and cannot be omitted; rendering it anyway");
    }

    (0..SLOT_COUNT)
        .map(|index| {
            let origin = slot_position(index);
            let mut primitives = Vec::new();
            if options.debug {
                let corner = cell_corner(index);
                primitives.push(Primitive::DebugOutline {
                    x: corner.0 - origin.0,
                    y: corner.1 - origin.1,
                    width: CELL_SIZE,
                    height: CELL_SIZE,
                });
            }
            SlotGroup {
                index,
                origin,
                suppressed: options.omits(index),
                anchor: index == CENTER_SLOT,
                primitives,
            }
        })
        .collect()
}
