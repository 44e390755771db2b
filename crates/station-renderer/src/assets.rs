//! Vector-icon asset retrieval.
//!
//! Assets are SVG fragments (element markup, not full documents) looked up
//! by path, e.g. `weather/ww_05`. A missing asset is `None`, never an
//! error: the icon primitive referencing it is simply dropped. Fragments
//! that should respond to recoloring inherit `fill` from their wrapper.

use std::collections::HashMap;
use std::path::{Component, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::diagram::{Primitive, SymbolDiagram};

/// Lookup-by-path source of SVG fragments.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// The fragment for `path`, or `None` when the asset is missing.
    async fn fetch(&self, path: &str) -> Option<String>;
}

/// In-memory asset table, used by tests and embedded icon sets.
pub struct StaticAssets {
    table: HashMap<String, String>,
}

impl StaticAssets {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// A source with no assets at all; every icon degrades away.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

#[async_trait]
impl AssetSource for StaticAssets {
    async fn fetch(&self, path: &str) -> Option<String> {
        self.table.get(path).cloned()
    }
}

/// Loads `<root>/<path>.svg` fragments from disk.
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetSource for DirAssets {
    async fn fetch(&self, path: &str) -> Option<String> {
        let relative = PathBuf::from(path);
        // Asset paths never leave the root.
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        let file = self.root.join(relative).with_extension("svg");
        tokio::fs::read_to_string(file).await.ok()
    }
}

/// Memoizes another source, caching hits and misses alike so repeated
/// compiles of the same icons hit the backing source once.
pub struct CachingAssets<S> {
    inner: S,
    cache: RwLock<HashMap<String, Option<String>>>,
}

impl<S: AssetSource> CachingAssets<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<S: AssetSource> AssetSource for CachingAssets<S> {
    async fn fetch(&self, path: &str) -> Option<String> {
        if let Some(cached) = self.cache.read().await.get(path) {
            return cached.clone();
        }
        let fetched = self.inner.fetch(path).await;
        self.cache
            .write()
            .await
            .insert(path.to_string(), fetched.clone());
        fetched
    }
}

/// Fill in icon fragments across the diagram, dropping icons whose asset
/// is missing.
pub async fn resolve_assets(diagram: &mut SymbolDiagram, source: &dyn AssetSource) {
    for slot in &mut diagram.slots {
        resolve_list(&mut slot.primitives, source).await;
    }
    resolve_list(&mut diagram.overlays, source).await;
}

async fn resolve_list(primitives: &mut Vec<Primitive>, source: &dyn AssetSource) {
    for primitive in primitives.iter_mut() {
        if let Primitive::Icon(icon) = primitive {
            if icon.fragment.is_none() {
                icon.fragment = source.fetch(&icon.path).await;
                if icon.fragment.is_none() {
                    debug!(path = %icon.path, "icon asset missing, dropping primitive");
                }
            }
        }
    }
    primitives.retain(|p| match p {
        Primitive::Icon(icon) => icon.fragment.is_some(),
        _ => true,
    });
}
