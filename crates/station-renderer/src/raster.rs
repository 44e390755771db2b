//! Rasterize a composed diagram into an RGBA marker bitmap.

use station_common::{StationError, StationResult};

use crate::diagram::SymbolDiagram;

/// Render the diagram at its declared pixel size.
///
/// Returns a premultiplied-RGBA pixmap sized `width` x `height`; hosts that
/// want raw bytes take `pixmap.data()`.
pub fn rasterize(diagram: &SymbolDiagram) -> StationResult<tiny_skia::Pixmap> {
    let width = diagram.width.ceil() as u32;
    let height = diagram.height.ceil() as u32;
    if width == 0 || height == 0 {
        return Err(StationError::RenderError(format!(
            "degenerate raster size {}x{}",
            width, height
        )));
    }

    let svg = diagram.to_svg();
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(&svg, &options)
        .map_err(|e| StationError::RenderError(format!("SVG parse failed: {}", e)))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| StationError::RenderError("pixmap allocation failed".to_string()))?;

    // Fit the canvas-unit tree into the pixel-sized pixmap.
    let scale = (width as f32 / tree.size().width()).min(height as f32 / tree.size().height());
    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::render_station;
    use station_common::{Hemisphere, RenderOptions};

    #[test]
    fn test_rasterize_empty_diagram() {
        let diagram = render_station(None, Hemisphere::Northern, &RenderOptions::default());
        let pixmap = rasterize(&diagram).unwrap();
        assert_eq!(pixmap.width(), 100);
        assert_eq!(pixmap.height(), 100);
    }

    #[test]
    fn test_rasterize_honors_station_scale() {
        let mut options = RenderOptions::default();
        options.scaling.station_model = 2.0;
        let diagram = render_station(None, Hemisphere::Northern, &options);
        let pixmap = rasterize(&diagram).unwrap();
        assert_eq!(pixmap.width(), 200);
    }
}
