// Data structures for the bar chart engine

use eyre::{bail, Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Identifies one bar within a chart instance.
///
/// Identifiers are index-derived: `(group, item)` positions within the input
/// series, not content-derived keys. They are stable across re-renders only
/// while the group and sub-item ordering is unchanged; reordering groups
/// between updates re-binds an id to different data. Callers that reorder
/// must treat any held id as invalidated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarId {
    pub group: usize,
    pub item: usize,
}

impl BarId {
    pub fn new(group: usize, item: usize) -> Self {
        Self { group, item }
    }
}

/// Pixel rectangle for a single bar, origin at the top-left of the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A positioned bar together with the data it was derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub id: BarId,
    pub geometry: BarGeometry,
    pub data_x: String,
    pub data_y: f64,
}

/// Grouped series input: one label per group, and per group a parallel list
/// of sub-item labels and numeric values.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesInput {
    pub groups: Vec<String>,
    pub x_series: Vec<Vec<String>>,
    pub y_series: Vec<Vec<f64>>,
}

impl SeriesInput {
    pub fn new(groups: Vec<String>, x_series: Vec<Vec<String>>, y_series: Vec<Vec<f64>>) -> Self {
        Self {
            groups,
            x_series,
            y_series,
        }
    }

    /// Checks the series-length invariants and value finiteness up front so
    /// malformed input is rejected instead of producing NaN geometry.
    pub fn validate(&self) -> Result<()> {
        if self.groups.len() != self.x_series.len() || self.groups.len() != self.y_series.len() {
            bail!(
                "series length mismatch: {} groups, {} x series, {} y series",
                self.groups.len(),
                self.x_series.len(),
                self.y_series.len()
            );
        }
        for (i, (xs, ys)) in self.x_series.iter().zip(&self.y_series).enumerate() {
            if xs.len() != ys.len() {
                bail!(
                    "group {} has {} x items but {} y items",
                    i,
                    xs.len(),
                    ys.len()
                );
            }
            if let Some(v) = ys.iter().find(|v| !v.is_finite()) {
                bail!("group {} contains a non-finite value {}", i, v);
            }
        }
        Ok(())
    }

    pub fn flat_y(&self) -> impl Iterator<Item = f64> + '_ {
        self.y_series.iter().flatten().copied()
    }

    /// Sum of every value across all groups. Used for tooltip percentages.
    pub fn y_sum(&self) -> f64 {
        self.flat_y().sum()
    }

    /// Mean of every value across all groups, 0 for empty series.
    pub fn y_mean(&self) -> f64 {
        let mut sum = 0.0;
        let mut n = 0usize;
        for v in self.flat_y() {
            sum += v;
            n += 1;
        }
        if n == 0 {
            0.0
        } else {
            sum / n as f64
        }
    }

    /// Resolves an id back to `(group label, sub-item label, value)`.
    pub fn lookup(&self, id: BarId) -> Option<(&str, &str, f64)> {
        let group = self.groups.get(id.group)?;
        let x = self.x_series.get(id.group)?.get(id.item)?;
        let y = *self.y_series.get(id.group)?.get(id.item)?;
        Some((group, x, y))
    }
}

/// Outer padding reserved for the axes, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub left: f32,
    pub bottom: f32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 70.0,
            bottom: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub padding: Padding,
    /// Horizontal padding on each side of a group, inside its band.
    pub group_padding: f32,
    /// Suggested tick count for the Y axis.
    pub y_tick_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            group_padding: 20.0,
            y_tick_count: 7,
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid chart config")
    }
}

/// Content handed to the tooltip collaborator for the active bar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipPayload {
    pub x_value: String,
    pub y_value: f64,
    pub group: String,
    /// Share of this value in the flattened sum of all values.
    pub percentage: f64,
}
