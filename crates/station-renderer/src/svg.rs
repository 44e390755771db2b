//! SVG document serialization for the composed diagram.

use std::fmt::Write;

use crate::diagram::{Primitive, SymbolDiagram, TextAnchor, Transform};
use crate::layout::CANVAS_SIZE;

const DEFAULT_COLOR: &str = "#000000";

impl SymbolDiagram {
    /// Serialize to a standalone SVG document.
    ///
    /// The viewBox stays in canvas units; the declared width/height carry
    /// the station-model scale, and text sizes carry the font scale.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(4096);
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
            fmt(self.width),
            fmt(self.height),
            fmt(CANVAS_SIZE),
            fmt(CANVAS_SIZE)
        );

        for slot in &self.slots {
            if slot.primitives.is_empty() {
                continue;
            }
            let _ = write!(
                out,
                "  <g data-slot=\"{}\" transform=\"translate({} {})\">\n",
                slot.index,
                fmt(slot.origin.0),
                fmt(slot.origin.1)
            );
            for primitive in &slot.primitives {
                self.write_primitive(&mut out, primitive, "    ");
            }
            out.push_str("  </g>\n");
        }

        for primitive in &self.overlays {
            self.write_primitive(&mut out, primitive, "  ");
        }

        out.push_str("</svg>\n");
        out
    }

    fn write_primitive(&self, out: &mut String, primitive: &Primitive, indent: &str) {
        match primitive {
            Primitive::Text(text) => {
                let _ = write!(
                    out,
                    "{indent}<text{} font-size=\"{}\" font-family=\"sans-serif\" \
                     text-anchor=\"{}\" dominant-baseline=\"middle\" fill=\"{}\">{}</text>\n",
                    transform_attr(&text.transform),
                    fmt(text.size * self.font_scale),
                    anchor_name(text.anchor),
                    text.color.unwrap_or(DEFAULT_COLOR),
                    escape(&text.content)
                );
            }
            Primitive::Icon(icon) => {
                // Unresolved icons were dropped during asset resolution;
                // tolerate stragglers by skipping them.
                let Some(fragment) = &icon.fragment else {
                    return;
                };
                let fill = icon
                    .color
                    .map(|c| format!(" fill=\"{}\"", c))
                    .unwrap_or_default();
                let _ = write!(
                    out,
                    "{indent}<g{}{}>{}</g>\n",
                    transform_attr(&icon.transform),
                    fill,
                    fragment
                );
            }
            Primitive::Path { d, transform, color } => {
                let _ = write!(
                    out,
                    "{indent}<path{} d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"0.8\"/>\n",
                    transform_attr(transform),
                    d,
                    color.unwrap_or(DEFAULT_COLOR)
                );
            }
            Primitive::DebugOutline {
                x,
                y,
                width,
                height,
            } => {
                let _ = write!(
                    out,
                    "{indent}<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                     fill=\"none\" stroke=\"#999999\" stroke-width=\"0.2\" stroke-dasharray=\"1 1\"/>\n",
                    fmt(*x),
                    fmt(*y),
                    fmt(*width),
                    fmt(*height)
                );
            }
        }
    }
}

fn transform_attr(transform: &Transform) -> String {
    if transform.is_identity() {
        return String::new();
    }
    let mut parts = Vec::new();
    if transform.translate != (0.0, 0.0) {
        parts.push(format!(
            "translate({} {})",
            fmt(transform.translate.0),
            fmt(transform.translate.1)
        ));
    }
    if transform.rotate_deg != 0.0 {
        parts.push(format!("rotate({})", fmt(transform.rotate_deg)));
    }
    if transform.scale != 1.0 {
        parts.push(format!("scale({})", fmt(transform.scale)));
    }
    format!(" transform=\"{}\"", parts.join(" "))
}

fn anchor_name(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

/// Trim trailing zeros so coordinates stay compact.
fn fmt(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{IconPrimitive, SlotGroup, TextPrimitive};

    fn diagram_with(slot: SlotGroup) -> SymbolDiagram {
        SymbolDiagram {
            width: 100.0,
            height: 100.0,
            font_scale: 1.0,
            debug: false,
            slots: vec![slot],
            overlays: Vec::new(),
        }
    }

    #[test]
    fn test_empty_slots_omitted_from_document() {
        let svg = diagram_with(SlotGroup {
            index: 4,
            origin: (16.66, 16.66),
            suppressed: false,
            anchor: false,
            primitives: Vec::new(),
        })
        .to_svg();
        assert!(!svg.contains("data-slot"), "empty container emits no group");
        assert!(svg.starts_with("<svg "));
    }

    #[test]
    fn test_text_escaping_and_font_scale() {
        let mut diagram = diagram_with(SlotGroup {
            index: 10,
            origin: (0.0, 0.0),
            suppressed: false,
            anchor: false,
            primitives: vec![Primitive::Text(TextPrimitive::new("<5").sized(5.0))],
        });
        diagram.font_scale = 2.0;
        let svg = diagram.to_svg();
        assert!(svg.contains("&lt;5"));
        assert!(svg.contains("font-size=\"10\""));
    }

    #[test]
    fn test_icon_fragment_wrapped_with_transform_and_fill() {
        let icon = IconPrimitive {
            path: "clouds/ch_2".to_string(),
            transform: Transform::at(6.665, 6.665),
            color: Some("#cc0000"),
            fragment: Some("<path d=\"M0 0\"/>".to_string()),
        };
        let svg = diagram_with(SlotGroup {
            index: 2,
            origin: (43.32, 16.66),
            suppressed: false,
            anchor: false,
            primitives: vec![Primitive::Icon(icon)],
        })
        .to_svg();
        assert!(svg.contains("translate(6.665 6.665)"));
        assert!(svg.contains("fill=\"#cc0000\""));
        assert!(svg.contains("<path d=\"M0 0\"/>"));
    }

    #[test]
    fn test_unresolved_icon_skipped() {
        let svg = diagram_with(SlotGroup {
            index: 2,
            origin: (0.0, 0.0),
            suppressed: false,
            anchor: false,
            primitives: vec![Primitive::Icon(IconPrimitive::new("clouds/ch_2"))],
        })
        .to_svg();
        assert!(!svg.contains("clouds"), "icon without a fragment emits nothing");
    }

    #[test]
    fn test_rotation_attr() {
        let t = Transform::at(50.0, 50.0).rotated(360.0);
        assert_eq!(transform_attr(&t), " transform=\"translate(50 50) rotate(360)\"");
    }
}
