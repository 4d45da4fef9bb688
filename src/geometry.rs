//! Per-bar rectangle computation and its memoization.

use crate::data_types::{Bar, BarGeometry, BarId, SeriesInput};
use crate::layout::GraphArea;
use crate::scales::ChartScales;
use parking_lot::Mutex;
use std::sync::Arc;

/// Builds the rectangles for every bar in the series.
///
/// Each group gets `group_padding` pixels of clearance on both sides of its
/// band, and the remaining width is split evenly between its sub-items. The
/// vertical geometry depends on the value sign so every rectangle touches
/// the zero baseline: positive bars extend upward from it, negative bars
/// downward.
pub fn build_bars(
    series: &SeriesInput,
    scales: &ChartScales,
    area: &GraphArea,
    group_padding: f32,
) -> Vec<Bar> {
    let scaled_zero = scales.y.map(0.0);
    let baseline_row = area.baseline_row(&scales.y);

    let mut bars = Vec::new();
    for group_idx in 0..series.groups.len() {
        let (Some(y_data), Some(x_data)) = (
            series.y_series.get(group_idx),
            series.x_series.get(group_idx),
        ) else {
            continue;
        };
        if y_data.is_empty() {
            // A group with no sub-items simply contributes no bars.
            continue;
        }

        let group_width = scales.x.bandwidth() - 2.0 * group_padding;
        let item_width = group_width / y_data.len() as f32;
        let Some(band_start) = scales.x.map_index(group_idx) else {
            continue;
        };
        let start_x = band_start + group_padding;

        for (item_idx, &value) in y_data.iter().enumerate() {
            let x = start_x + item_idx as f32 * item_width;

            // scale(v) is the distance of v from the bottom of the area, so
            // the bar height is the distance between v and 0 in pixel space.
            let (y, height) = if value < 0.0 {
                (baseline_row, scaled_zero - scales.y.map(value))
            } else {
                let height = scales.y.map(value) - scaled_zero;
                (baseline_row - height, height)
            };

            bars.push(Bar {
                id: BarId::new(group_idx, item_idx),
                geometry: BarGeometry {
                    x,
                    y,
                    width: item_width,
                    height,
                },
                data_x: x_data.get(item_idx).cloned().unwrap_or_default(),
                data_y: value,
            });
        }
    }
    bars
}

/// Everything the bar rectangles are derived from. Two equal keys always
/// produce identical geometry, so equality gates recomputation.
#[derive(Clone, PartialEq)]
struct GeometryKey {
    groups: Vec<String>,
    x_series: Vec<Vec<String>>,
    y_series: Vec<Vec<f64>>,
    width: f32,
    height: f32,
    group_padding: f32,
}

struct CacheEntry {
    key: GeometryKey,
    bars: Arc<Vec<Bar>>,
}

/// Memoizes the built bars behind an explicit dirty check on the input
/// signature. Purely a performance guard: a changed input always rebuilds.
pub struct GeometryCache {
    entry: Mutex<Option<CacheEntry>>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self {
            entry: Mutex::new(None),
        }
    }

    pub fn bars(
        &self,
        series: &SeriesInput,
        scales: &ChartScales,
        area: &GraphArea,
        group_padding: f32,
    ) -> Arc<Vec<Bar>> {
        let key = GeometryKey {
            groups: series.groups.clone(),
            x_series: series.x_series.clone(),
            y_series: series.y_series.clone(),
            width: area.width,
            height: area.height,
            group_padding,
        };

        let mut entry = self.entry.lock();
        if let Some(cached) = entry.as_ref() {
            if cached.key == key {
                return cached.bars.clone();
            }
        }

        let bars = Arc::new(build_bars(series, scales, area, group_padding));
        *entry = Some(CacheEntry {
            key,
            bars: bars.clone(),
        });
        bars
    }
}

impl Default for GeometryCache {
    fn default() -> Self {
        Self::new()
    }
}
