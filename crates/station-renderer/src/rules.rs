//! Per-slot field rules.
//!
//! Each populated slot has one rule: a pure function from the decoded
//! observation and render options to the primitives appended to that slot
//! (plus canvas-level overlays for the center slot). Rules tolerate absent
//! and null groups by rendering nothing; a missing icon asset degrades
//! later in the resolution pass. Nothing in here returns an error.

use station_common::{DecodedObservation, Field, Hemisphere, RenderOptions};

use crate::codes;
use crate::diagram::{palette, IconPrimitive, Primitive, TextPrimitive, Transform};
use crate::layout::CELL_SIZE;
use crate::wind;

/// Inputs shared by every rule invocation.
pub struct RuleContext<'a> {
    pub obs: &'a DecodedObservation,
    pub options: &'a RenderOptions,
    pub hemisphere: Hemisphere,
}

/// What one rule adds to the diagram.
#[derive(Debug, Default)]
pub struct SlotOutput {
    /// Slot-local primitives.
    pub primitives: Vec<Primitive>,
    /// Canvas-level primitives (wind, automatic-station marker).
    pub overlays: Vec<Primitive>,
}

impl SlotOutput {
    fn local(primitives: Vec<Primitive>) -> Self {
        Self {
            primitives,
            overlays: Vec::new(),
        }
    }
}

pub type SlotRule = fn(&RuleContext) -> SlotOutput;

/// How a slot index is handled.
pub enum SlotDisposition {
    /// Populated by the given rule.
    Rule(SlotRule),
    /// Empty by definition of the plotting model.
    Empty,
    /// No rule exists; plots a placeholder in debug mode only.
    Unhandled,
    /// Slot 25, the exterior dual-swell extension point. Never populated.
    Reserved,
}

/// The rule table keyed by slot index.
pub fn disposition(index: usize) -> SlotDisposition {
    use SlotDisposition::*;
    match index {
        2 => Rule(high_cloud_type),
        6 => Rule(air_temperature),
        7 => Rule(middle_cloud_type),
        8 => Rule(sea_level_pressure),
        10 => Rule(visibility),
        11 => Rule(present_weather),
        12 => Rule(station_center),
        13 => Rule(pressure_change),
        14 => Rule(pressure_characteristic),
        16 => Rule(dewpoint_temperature),
        17 => Rule(low_cloud),
        18 => Rule(past_weather),
        23 => Rule(precipitation),
        4 | 5 | 9 | 15 | 20 | 24 => Empty,
        25 => Reserved,
        _ => Unhandled,
    }
}

/// The debug marker for slots with no rule.
pub fn placeholder() -> Primitive {
    Primitive::Text(TextPrimitive::new("x").at(cell_center()))
}

fn cell_center() -> Transform {
    Transform::at(CELL_SIZE / 2.0, CELL_SIZE / 2.0)
}

fn upper_left() -> Transform {
    Transform::at(CELL_SIZE / 4.0, CELL_SIZE / 4.0)
}

fn upper_right() -> Transform {
    Transform::at(3.0 * CELL_SIZE / 4.0, CELL_SIZE / 4.0)
}

fn lower_left() -> Transform {
    Transform::at(CELL_SIZE / 4.0, 3.0 * CELL_SIZE / 4.0)
}

fn text(content: impl Into<String>) -> Primitive {
    Primitive::Text(TextPrimitive::new(content).at(cell_center()))
}

// === Slot 2: high cloud genus ===
fn high_cloud_type(ctx: &RuleContext) -> SlotOutput {
    let code = ctx
        .obs
        .cloud_types
        .value()
        .and_then(|c| c.high_cloud_type.value())
        .and_then(|c| c.value.get());
    let Some(code) = code.filter(|c| *c != 0) else {
        return SlotOutput::default();
    };

    let mut icon = IconPrimitive::new(format!("clouds/ch_{}", code)).at(cell_center());
    if ctx.options.high_clouds_in_red {
        icon = icon.colored(palette::RED);
    }
    SlotOutput::local(vec![Primitive::Icon(icon)])
}

// === Slot 6: air temperature ===
fn air_temperature(ctx: &RuleContext) -> SlotOutput {
    match ctx
        .obs
        .air_temperature
        .value()
        .and_then(|m| m.value.get())
    {
        Some(value) => SlotOutput::local(vec![text(codes::temperature_text(
            value,
            ctx.options.temperature,
        ))]),
        None => SlotOutput::default(),
    }
}

// === Slot 7: middle cloud genus ===
fn middle_cloud_type(ctx: &RuleContext) -> SlotOutput {
    let code = ctx
        .obs
        .cloud_types
        .value()
        .and_then(|c| c.middle_cloud_type.value())
        .and_then(|c| c.value.get());
    match code.filter(|c| *c != 0) {
        Some(code) => SlotOutput::local(vec![Primitive::Icon(
            IconPrimitive::new(format!("clouds/cm_{}", code)).at(cell_center()),
        )]),
        None => SlotOutput::default(),
    }
}

// === Slot 8: sea-level pressure plot code ===
fn sea_level_pressure(ctx: &RuleContext) -> SlotOutput {
    match ctx
        .obs
        .sea_level_pressure
        .value()
        .and_then(|m| m.value.get())
    {
        Some(value) => SlotOutput::local(vec![text(codes::pressure_plot_code(value))]),
        None => SlotOutput::default(),
    }
}

// === Slot 10: visibility code, passed through unmodified ===
fn visibility(ctx: &RuleContext) -> SlotOutput {
    match ctx.obs.visibility.value().and_then(|v| v.code.value()) {
        Some(code) => SlotOutput::local(vec![text(code.clone())]),
        None => SlotOutput::default(),
    }
}

// === Slot 11: present weather ===
//
// The icon set follows the station type: wawa for automatic stations, ww
// for manned. The weather indicator decides between a glyph, a deliberate
// blank, and the "not observable" slashes.
fn present_weather(ctx: &RuleContext) -> SlotOutput {
    let indicator = ctx
        .obs
        .weather_indicator
        .value()
        .and_then(|w| w.value.get());
    let automatic = ctx.obs.is_automatic();
    let weather = ctx
        .obs
        .present_weather
        .value()
        .and_then(|c| c.value.get());

    let slashes = || SlotOutput::local(vec![text("//")]);

    if automatic {
        match indicator {
            Some(5) => return SlotOutput::default(),
            Some(6) => return slashes(),
            Some(7) if weather.is_none() => return slashes(),
            _ => {}
        }
    } else {
        match indicator {
            Some(2) | Some(5) => return SlotOutput::default(),
            Some(3) | Some(6) => return slashes(),
            Some(1) | Some(4) if weather.is_none() => return slashes(),
            _ => {}
        }
    }

    match weather {
        Some(code) => {
            let set = if automatic { "wawa" } else { "ww" };
            SlotOutput::local(vec![Primitive::Icon(
                IconPrimitive::new(format!("weather/{}_{:02}", set, code)).at(cell_center()),
            )])
        }
        None => SlotOutput::default(),
    }
}

// === Slot 12: cloud cover, automation marker, wind ===
fn station_center(ctx: &RuleContext) -> SlotOutput {
    let mut primitives = Vec::new();

    // Present-but-null cloud cover means "sky not discernible": a slash
    // glyph, distinct from the absent group which plots nothing.
    match &ctx.obs.cloud_cover {
        Field::Null => {
            primitives.push(Primitive::Icon(IconPrimitive::new("oktas/slash")));
        }
        Field::Value(group) => match &group.code {
            Field::Value(code) => {
                primitives.push(Primitive::Icon(IconPrimitive::new(format!("oktas/{}", code))));
            }
            Field::Null => {
                primitives.push(Primitive::Icon(IconPrimitive::new("oktas/slash")));
            }
            Field::Absent => {}
        },
        Field::Absent => {}
    }

    let mut overlays = wind::wind_overlays(ctx.obs, ctx.hemisphere);

    if ctx.obs.is_automatic() {
        // Triangle outline around the station circle, drawn inline so
        // automation stays visible even with an empty asset source.
        overlays.push(Primitive::Path {
            d: "M 0 -8.2 L 7.1 4.1 L -7.1 4.1 Z".to_string(),
            transform: Transform::at(50.0, 50.0),
            color: None,
        });
    }

    SlotOutput {
        primitives,
        overlays,
    }
}

// === Slot 13: pressure change over 3 hours ===
fn pressure_change(ctx: &RuleContext) -> SlotOutput {
    let change = ctx
        .obs
        .pressure_tendency
        .value()
        .and_then(|t| t.change.value())
        .and_then(|m| m.value.get());
    let Some(change) = change else {
        return SlotOutput::default();
    };

    let (content, color_signed) = codes::tendency_plot(change, ctx.options.poly_chromatic);
    let mut primitive = TextPrimitive::new(content).at(cell_center());
    if color_signed {
        primitive = primitive.colored(palette::RED);
    }
    SlotOutput::local(vec![Primitive::Text(primitive)])
}

// === Slot 14: pressure tendency characteristic ===
fn pressure_characteristic(ctx: &RuleContext) -> SlotOutput {
    let code = ctx
        .obs
        .pressure_tendency
        .value()
        .and_then(|t| t.tendency.value())
        .and_then(|c| c.value.get());
    let Some(code) = code else {
        return SlotOutput::default();
    };

    let mut icon = IconPrimitive::new(format!("pressure_tendency/{}", code)).at(cell_center());
    if ctx.options.poly_chromatic && code >= 5 {
        icon = icon.colored(palette::RED);
    }
    SlotOutput::local(vec![Primitive::Icon(icon)])
}

// === Slot 16: dewpoint ===
fn dewpoint_temperature(ctx: &RuleContext) -> SlotOutput {
    match ctx
        .obs
        .dewpoint_temperature
        .value()
        .and_then(|m| m.value.get())
    {
        Some(value) => SlotOutput::local(vec![text(codes::temperature_text(
            value,
            ctx.options.dew_point,
        ))]),
        None => SlotOutput::default(),
    }
}

// === Slot 17: low cloud genus, amount and base height ===
//
// Five mutually exclusive sub-layouts keyed by which of the three
// sub-fields are present; the amount comes from the low-cloud group,
// falling back to the middle-cloud amount.
fn low_cloud(ctx: &RuleContext) -> SlotOutput {
    let types = ctx.obs.cloud_types.value();
    let type_code = types
        .and_then(|c| c.low_cloud_type.value())
        .and_then(|c| c.value.get())
        .filter(|c| *c != 0);
    let amount = types.and_then(|c| {
        c.low_cloud_amount
            .value()
            .and_then(|a| a.value.get())
            .or_else(|| c.middle_cloud_amount.value().and_then(|a| a.value.get()))
    });
    let base = ctx
        .obs
        .lowest_cloud_base
        .value()
        .and_then(|b| b.code.get());

    let icon = |transform: Transform| {
        type_code.map(|code| {
            Primitive::Icon(IconPrimitive::new(format!("clouds/cl_{}", code)).at(transform))
        })
    };
    let amount_text =
        |transform: Transform| amount.map(|a| Primitive::Text(TextPrimitive::new(a.to_string()).at(transform)));
    let base_text =
        |transform: Transform| base.map(|b| Primitive::Text(TextPrimitive::new(b.to_string()).at(transform)));

    let primitives: Vec<Primitive> = match (type_code.is_some(), amount.is_some(), base.is_some()) {
        (true, true, true) => vec![
            icon(upper_left()),
            amount_text(upper_right()),
            base_text(lower_left()),
        ]
        .into_iter()
        .flatten()
        .collect(),
        (true, true, false) => vec![
            icon(Transform::at(CELL_SIZE / 4.0, CELL_SIZE / 2.0)),
            amount_text(Transform::at(3.0 * CELL_SIZE / 4.0, CELL_SIZE / 2.0)),
        ]
        .into_iter()
        .flatten()
        .collect(),
        (true, false, true) => vec![icon(upper_left()), base_text(lower_left())]
            .into_iter()
            .flatten()
            .collect(),
        (true, false, false) => icon(cell_center()).into_iter().collect(),
        (false, true, _) => vec![amount_text(cell_center()), base_text(lower_left())]
            .into_iter()
            .flatten()
            .collect(),
        (false, false, _) => Vec::new(),
    };

    SlotOutput::local(primitives)
}

// === Slot 18: past weather W1, W2 ===
fn past_weather(ctx: &RuleContext) -> SlotOutput {
    let Some(pair) = ctx.obs.past_weather.value() else {
        return SlotOutput::default();
    };
    let automatic = ctx.obs.is_automatic();

    let eligible: Vec<i64> = pair
        .iter()
        .filter_map(|entry| entry.value())
        .filter_map(|c| c.value.get())
        // Manned codes 0-2 mean no significant weather and plot nothing.
        .filter(|code| automatic || *code > 2)
        .collect();

    let set = if automatic { "wa" } else { "w" };
    let positions: Vec<Transform> = match eligible.len() {
        0 => return SlotOutput::default(),
        1 => vec![cell_center()],
        _ => vec![
            Transform::at(CELL_SIZE / 4.0, CELL_SIZE / 2.0),
            Transform::at(3.0 * CELL_SIZE / 4.0, CELL_SIZE / 2.0),
        ],
    };

    let primitives = eligible
        .into_iter()
        .zip(positions)
        .map(|(code, transform)| {
            let mut icon = IconPrimitive::new(format!("weather/{}_{}", set, code)).at(transform);
            if !automatic && ctx.options.poly_chromatic {
                icon = icon.colored(palette::AMBER);
            }
            Primitive::Icon(icon)
        })
        .collect();

    SlotOutput::local(primitives)
}

// === Slot 23: precipitation ===
fn precipitation(ctx: &RuleContext) -> SlotOutput {
    let indicator = ctx.obs.precipitation_indicator.value();
    match indicator.and_then(|p| p.value.get()) {
        // Indicator 3: amount is zero, deliberately blank.
        Some(3) => return SlotOutput::default(),
        // Indicator 4: not available.
        Some(4) => return SlotOutput::local(vec![text("///")]),
        _ => {}
    }

    let section = indicator.and_then(|p| {
        if p.in_group_1 {
            ctx.obs.precipitation_s1.value()
        } else if p.in_group_3 {
            ctx.obs.precipitation_s3.value()
        } else {
            None
        }
    });
    let Some(section) = section else {
        return SlotOutput::default();
    };

    let mut primitives = Vec::new();
    if let Some(amount) = section.amount.value().and_then(|m| m.value.get()) {
        primitives.push(text(codes::precip_amount_text(amount)));
        if let Some(period) = section
            .time_before_obs
            .value()
            .and_then(|t| t.code.get())
        {
            primitives.push(Primitive::Text(
                TextPrimitive::new(period.to_string())
                    .at(Transform::at(CELL_SIZE, CELL_SIZE / 2.0))
                    .sized(3.5),
            ));
        }
    }
    SlotOutput::local(primitives)
}
