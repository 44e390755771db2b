//! Geodetic position of the observing station.

use serde::{Deserialize, Serialize};

/// Station position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn hemisphere(&self) -> Hemisphere {
        Hemisphere::from_latitude(self.lat)
    }
}

/// Hemisphere of the station, selecting the wind icon set and the
/// mirroring direction of the barbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    /// Latitude sign selects the set; the equator plots as southern.
    pub fn from_latitude(lat: f64) -> Self {
        if lat > 0.0 {
            Hemisphere::Northern
        } else {
            Hemisphere::Southern
        }
    }
}
