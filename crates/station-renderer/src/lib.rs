//! WMO station plotting-model symbol rendering.
//!
//! Compiles a decoded surface observation into the standardized station
//! model: a fixed 5x5 grid of meteorological glyphs and values around a
//! central cloud-cover circle, with the wind barb overlaid at the center.
//! The output is a vector diagram that serializes to SVG or rasterizes to
//! an RGBA marker bitmap.

pub mod assets;
pub mod codes;
pub mod compiler;
pub mod diagram;
pub mod layout;
pub mod raster;
pub mod rules;
pub mod svg;
pub mod wind;

pub use assets::{resolve_assets, AssetSource, CachingAssets, DirAssets, StaticAssets};
pub use compiler::{render_station, StationFeature, StationMarker, SymbolCompiler};
pub use diagram::{IconPrimitive, Primitive, SlotGroup, SymbolDiagram, TextAnchor, TextPrimitive, Transform};
pub use rules::{disposition, RuleContext, SlotDisposition, SlotOutput};
