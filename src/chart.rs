//! Chart descriptions and the single-slot chart session.
//!
//! Rendering belongs to a [`ChartRenderer`]; this module decides *what* is
//! drawn and guarantees that at most one chart is alive at a time.

use crate::series::{Numeric, SeriesKey, SeriesPoint, extract};
use crate::table::Row;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

/// Fixed look of every allocation chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartStyle {
    pub kind: ChartKind,
    pub border_width: u32,
    pub background_color: &'static str,
    pub y_axis_label: &'static str,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            border_width: 1,
            background_color: "rgba(255,215,0,1)",
            y_axis_label: "Allocations",
        }
    }
}

/// Everything a renderer needs to draw one series as a single dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<Numeric>,
    pub style: ChartStyle,
}

impl ChartSpec {
    pub fn new(key: &SeriesKey, points: Vec<SeriesPoint>) -> Self {
        let (labels, values) = points.into_iter().map(|p| (p.label, p.value)).unzip();
        Self {
            title: key.title(),
            labels,
            values,
            style: ChartStyle::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// External chart backend.
///
/// Implementations must accept an empty spec (no points) and draw an empty chart.
pub trait ChartRenderer {
    type Handle;

    fn create(&mut self, spec: &ChartSpec) -> anyhow::Result<Self::Handle>;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns the one chart on display.
pub struct ChartSession<R: ChartRenderer> {
    renderer: R,
    active: Option<R::Handle>,
}

impl<R: ChartRenderer> ChartSession<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            active: None,
        }
    }

    /// Destroy the current chart (if any), then draw `spec`.
    ///
    /// If drawing fails the session is left empty.
    pub fn replace(&mut self, spec: &ChartSpec) -> anyhow::Result<&R::Handle> {
        self.clear();
        let handle = self.renderer.create(spec)?;
        Ok(self.active.insert(handle))
    }

    /// Recompute the full series for `key` and display it.
    pub fn show_series(&mut self, rows: &[Row], key: &SeriesKey) -> anyhow::Result<&R::Handle> {
        let spec = ChartSpec::new(key, extract(rows, key));
        if spec.is_empty() {
            log::warn!("no rows for {}; showing an empty chart", spec.title);
        }
        self.replace(&spec)
    }

    pub fn clear(&mut self) {
        if let Some(old) = self.active.take() {
            self.renderer.destroy(old);
        }
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<&R::Handle> {
        self.active.as_ref()
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<R: ChartRenderer> Drop for ChartSession<R> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Writes each chart as one JSON document per line.
pub struct JsonRenderer<W: Write> {
    out: W,
    created: usize,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, created: 0 }
    }
}

impl<W: Write> ChartRenderer for JsonRenderer<W> {
    type Handle = usize;

    fn create(&mut self, spec: &ChartSpec) -> anyhow::Result<usize> {
        serde_json::to_writer_pretty(&mut self.out, spec)?;
        writeln!(self.out)?;
        self.created += 1;
        Ok(self.created)
    }

    fn destroy(&mut self, handle: usize) {
        log::debug!("released chart #{}", handle);
    }
}
