//! The composed symbol diagram and its visual primitives.

/// Colors used when polychromatic rendering conveys sign or category.
pub mod palette {
    /// High-cloud genus icons and falling-pressure values.
    pub const RED: &str = "#cc0000";
    /// Manned past-weather icons in polychromatic mode.
    pub const AMBER: &str = "#b8860b";
}

/// Local placement of one primitive: translate, then rotate about the
/// translated origin, then scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: (f64, f64),
    pub rotate_deg: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: (0.0, 0.0),
            rotate_deg: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            translate: (x, y),
            ..Self::default()
        }
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotate_deg = degrees;
        self
    }

    pub fn scaled(mut self, factor: f64) -> Self {
        self.scale = factor;
        self
    }

    pub fn is_identity(&self) -> bool {
        self.translate == (0.0, 0.0) && self.rotate_deg == 0.0 && self.scale == 1.0
    }
}

/// Horizontal anchoring of a text primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

/// A vector-icon reference. The `fragment` is filled in by the asset
/// resolution pass; icons that stay unresolved are dropped silently.
#[derive(Debug, Clone, PartialEq)]
pub struct IconPrimitive {
    /// Asset path, e.g. `weather/ww_05`.
    pub path: String,
    pub transform: Transform,
    pub color: Option<&'static str>,
    pub fragment: Option<String>,
}

impl IconPrimitive {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            transform: Transform::default(),
            color: None,
            fragment: None,
        }
    }

    pub fn at(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn colored(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }
}

/// A plotted value.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub content: String,
    pub transform: Transform,
    /// Font size in canvas units, before the font scale factor.
    pub size: f64,
    pub anchor: TextAnchor,
    pub color: Option<&'static str>,
}

impl TextPrimitive {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            transform: Transform::default(),
            size: 5.0,
            anchor: TextAnchor::Middle,
            color: None,
        }
    }

    pub fn at(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn sized(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn colored(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }
}

/// One visual element of the diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Icon(IconPrimitive),
    Text(TextPrimitive),
    /// Inline stroked path (automatic-station triangle).
    Path {
        d: String,
        transform: Transform,
        color: Option<&'static str>,
    },
    /// Dashed cell outline, emitted only in debug mode. Never alters
    /// geometry.
    DebugOutline {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Primitive {
    pub fn as_icon(&self) -> Option<&IconPrimitive> {
        match self {
            Primitive::Icon(icon) => Some(icon),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            Primitive::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One positioned slot container. Containers exist for every index, even
/// suppressed ones, so canvas indices stay stable.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGroup {
    pub index: usize,
    /// Canvas position the group translates to.
    pub origin: (f64, f64),
    /// Rule skipped for this slot; container rendered empty.
    pub suppressed: bool,
    /// The non-suppressible spatial anchor (slot 12).
    pub anchor: bool,
    pub primitives: Vec<Primitive>,
}

impl SlotGroup {
    /// Asset paths of all icon primitives, for tests and asset warm-up.
    pub fn icon_paths(&self) -> Vec<&str> {
        self.primitives
            .iter()
            .filter_map(|p| p.as_icon().map(|i| i.path.as_str()))
            .collect()
    }

    /// Contents of all text primitives in order.
    pub fn texts(&self) -> Vec<&str> {
        self.primitives
            .iter()
            .filter_map(|p| p.as_text().map(|t| t.content.as_str()))
            .collect()
    }

    /// True when the slot carries no content (outlines don't count).
    pub fn is_empty(&self) -> bool {
        self.primitives
            .iter()
            .all(|p| matches!(p, Primitive::DebugOutline { .. }))
    }
}

/// The compiled station symbol: 26 slot containers plus canvas-level
/// overlays (wind barb, calm marker, automatic-station triangle).
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolDiagram {
    /// Declared pixel width/height for the host's marker icon.
    pub width: f64,
    pub height: f64,
    /// Font scale factor applied to text at serialization time.
    pub font_scale: f64,
    pub debug: bool,
    pub slots: Vec<SlotGroup>,
    pub overlays: Vec<Primitive>,
}

impl SymbolDiagram {
    pub fn slot(&self, index: usize) -> Option<&SlotGroup> {
        self.slots.iter().find(|s| s.index == index)
    }

    /// Icon paths across slots and overlays that still need resolution.
    pub fn unresolved_icon_paths(&self) -> Vec<&str> {
        self.slots
            .iter()
            .flat_map(|s| s.primitives.iter())
            .chain(self.overlays.iter())
            .filter_map(|p| p.as_icon())
            .filter(|i| i.fragment.is_none())
            .map(|i| i.path.as_str())
            .collect()
    }
}
