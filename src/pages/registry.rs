//! Chart Registry Module
//! Insertion-ordered key to chart mapping plus the selection resolver.
//!
//! A registry is built once at startup and never mutated afterwards, so it
//! is safe for any number of concurrent readers. Resolution is a pure map
//! lookup; an unknown key yields `Resolution::NotFound`, never a failure.

use indexmap::IndexMap;
use serde::Serialize;

use crate::charts::Chart;

/// Placeholder message a caller renders for an unknown selection.
pub const NOT_FOUND_PLACEHOLDER: &str = "Chart not found";

/// A chart paired with the caption rendered above it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionedChart {
    pub chart: Chart,
    pub caption: String,
}

/// What a registry key maps to: a single chart, or an ordered list of
/// captioned charts rendered as titled blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "content", rename_all = "snake_case")]
pub enum RenderPayload {
    Single(Chart),
    CaptionedList(Vec<CaptionedChart>),
}

/// Outcome of resolving a selection key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a RenderPayload),
    NotFound,
}

impl Resolution<'_> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Immutable key to render-payload mapping with insertion-ordered keys.
#[derive(Debug, Clone, Default)]
pub struct ChartRegistry {
    entries: IndexMap<String, RenderPayload>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a payload under `key`. Insertion order is preserved and
    /// determines the default selection.
    pub fn insert(&mut self, key: impl Into<String>, payload: RenderPayload) {
        self.entries.insert(key.into(), payload);
    }

    /// The default selection: the first key ever inserted.
    pub fn default_key(&self) -> Option<&str> {
        self.entries.keys().next().map(String::as_str)
    }

    /// Pure lookup of a selection key. Charts are never rebuilt here; the
    /// stored payload is returned by reference.
    pub fn resolve(&self, key: &str) -> Resolution<'_> {
        match self.entries.get(key) {
            Some(payload) => Resolution::Found(payload),
            None => Resolution::NotFound,
        }
    }

    /// All keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
