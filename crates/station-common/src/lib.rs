//! Common types shared across the station-plot crates.

pub mod error;
pub mod field;
pub mod geo;
pub mod observation;
pub mod options;

pub use error::{StationError, StationResult};
pub use field::Field;
pub use geo::{Hemisphere, LatLon};
pub use observation::{
    CloudTypes, CodeGroup, CodeValue, DecodedObservation, Measurement, Precipitation,
    PrecipitationIndicator, PressureTendency, SurfaceWind, WeatherIndicator, WindSpeed,
};
pub use options::{RenderOptions, Scaling, ValueMode};
