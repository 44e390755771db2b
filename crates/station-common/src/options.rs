//! Render options: the sole configuration surface of the compiler.
//!
//! Options arrive from the host as JSON. Missing keys fall back to the
//! documented defaults and unknown keys are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a measured value is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueMode {
    /// Print the decoded value as-is.
    #[default]
    Raw,
    /// Round to the nearest integer before printing.
    Rounded,
}

/// Scale factors for the diagram and its text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scaling {
    #[serde(default = "default_scale")]
    pub station_model: f64,
    #[serde(default = "default_scale")]
    pub font: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl Default for Scaling {
    fn default() -> Self {
        Self {
            station_model: 1.0,
            font: 1.0,
        }
    }
}

/// Caller-supplied rendering options, immutable per compile call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub scaling: Scaling,
    /// Use color as well as shape to convey sign/magnitude.
    #[serde(default = "default_true")]
    pub poly_chromatic: bool,
    /// Recolor high-cloud genus icons in red.
    #[serde(default = "default_true")]
    pub high_clouds_in_red: bool,
    #[serde(default)]
    pub temperature: ValueMode,
    #[serde(default)]
    pub dew_point: ValueMode,
    /// Slot indices to suppress. Slot 12 is the spatial anchor and is
    /// rendered regardless.
    #[serde(default)]
    pub elements_to_omit: HashSet<usize>,
    /// Draw cell outlines and placeholders for layout verification.
    #[serde(default)]
    pub debug: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scaling: Scaling::default(),
            poly_chromatic: true,
            high_clouds_in_red: true,
            temperature: ValueMode::Raw,
            dew_point: ValueMode::Raw,
            elements_to_omit: HashSet::new(),
            debug: false,
        }
    }
}

impl RenderOptions {
    /// True when the slot's rule should be skipped. Slot 12 never is.
    pub fn omits(&self, slot: usize) -> bool {
        slot != 12 && self.elements_to_omit.contains(&slot)
    }
}
