//! The station symbol compiler: decode, compose, resolve.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};
use uuid::Uuid;

use decode_bridge::{DecodeOrchestrator, DEFAULT_TIMEOUT_MS};
use station_common::{DecodedObservation, Hemisphere, LatLon, RenderOptions, StationResult};

use crate::assets::{resolve_assets, AssetSource};
use crate::diagram::SymbolDiagram;
use crate::layout::{self, CANVAS_SIZE};
use crate::rules::{self, RuleContext, SlotDisposition};

/// How many features compile concurrently in a batch. Compilation itself
/// is cheap; this bounds decode backpressure and asset fetches.
const BATCH_CONCURRENCY: usize = 8;

/// Compose a diagram from an already-decoded observation.
///
/// This is the synchronous core: layout, field rules, wind geometry. A
/// `None` observation (undecodable or skipped input) still yields the full
/// 26-container diagram so hosts get a stable structure.
pub fn render_station(
    observation: Option<&DecodedObservation>,
    hemisphere: Hemisphere,
    options: &RenderOptions,
) -> SymbolDiagram {
    let mut slots = layout::build_slots(options);
    let mut overlays = Vec::new();

    if let Some(obs) = observation {
        let ctx = RuleContext {
            obs,
            options,
            hemisphere,
        };
        for slot in &mut slots {
            if slot.suppressed {
                continue;
            }
            match rules::disposition(slot.index) {
                SlotDisposition::Rule(rule) => {
                    let output = rule(&ctx);
                    slot.primitives.extend(output.primitives);
                    overlays.extend(output.overlays);
                }
                SlotDisposition::Empty | SlotDisposition::Reserved => {}
                SlotDisposition::Unhandled => {
                    if options.debug {
                        slot.primitives.push(rules::placeholder());
                    }
                }
            }
        }
    }

    let scale = options.scaling.station_model;
    SymbolDiagram {
        width: CANVAS_SIZE * scale,
        height: CANVAS_SIZE * scale,
        font_scale: options.scaling.font,
        debug: options.debug,
        slots,
        overlays,
    }
}

/// One host map feature to plot.
#[derive(Debug, Clone)]
pub struct StationFeature {
    pub feature_id: String,
    pub raw_text: Option<String>,
    pub position: LatLon,
}

/// A compiled marker for one feature.
#[derive(Debug, Clone)]
pub struct StationMarker {
    pub feature_id: String,
    pub diagram: SymbolDiagram,
}

/// Compiles station symbols, blocking per symbol on the decode bridge.
pub struct SymbolCompiler {
    orchestrator: Arc<DecodeOrchestrator>,
    assets: Arc<dyn AssetSource>,
    timeout: Duration,
}

impl SymbolCompiler {
    pub fn new(orchestrator: Arc<DecodeOrchestrator>, assets: Arc<dyn AssetSource>) -> Self {
        Self {
            orchestrator,
            assets,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Compile one symbol.
    ///
    /// Empty input short-circuits to the null-result diagram without
    /// engaging the decoder. Awaiting the decode result is the only
    /// suspension point before asset resolution; a timeout fails this call
    /// only.
    pub async fn compile(
        &self,
        raw_text: &str,
        position: LatLon,
        options: &RenderOptions,
    ) -> StationResult<SymbolDiagram> {
        let observation = if raw_text.trim().is_empty() {
            debug!("observation text empty, skipping decode");
            None
        } else {
            let ticket = self.orchestrator.submit(raw_text, Uuid::new_v4());
            self.orchestrator.await_result(ticket, self.timeout).await?
        };

        let mut diagram = render_station(observation.as_ref(), position.hemisphere(), options);
        resolve_assets(&mut diagram, self.assets.as_ref()).await;
        Ok(diagram)
    }

    /// Compile a batch of host features into markers.
    ///
    /// Features without observation text are skipped before the decoder is
    /// involved, and a failed feature (decode timeout) is dropped with a
    /// diagnostic rather than failing the batch. Markers come back in
    /// completion order.
    pub async fn compile_features(
        &self,
        features: Vec<StationFeature>,
        options: &RenderOptions,
    ) -> Vec<StationMarker> {
        stream::iter(features)
            .map(|feature| async move {
                let raw_text = feature.raw_text.as_deref().unwrap_or("");
                if raw_text.trim().is_empty() {
                    debug!(feature_id = %feature.feature_id, "feature has no observation text, skipping");
                    return None;
                }
                match self.compile(raw_text, feature.position, options).await {
                    Ok(diagram) => Some(StationMarker {
                        feature_id: feature.feature_id,
                        diagram,
                    }),
                    Err(err) => {
                        warn!(feature_id = %feature.feature_id, error = %err, "feature compile failed");
                        None
                    }
                }
            })
            .buffer_unordered(BATCH_CONCURRENCY)
            .filter_map(|marker| async move { marker })
            .collect()
            .await
    }
}
