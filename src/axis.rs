//! Axis layout: tick rows and label positions derived from the scales.
//! Output is plain layout data; painting is the embedder's concern.

use crate::data_types::SeriesInput;
use crate::layout::GraphArea;
use crate::scales::{y_domain, BandScale, LinearScale};

/// One tick: a pixel position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub position: f32,
    pub label: String,
}

/// Y axis layout. Rows are measured from the top of the plot area.
#[derive(Clone, Debug, PartialEq)]
pub struct YAxisLayout {
    pub ticks: Vec<Tick>,
    /// Row of the series mean, drawn as a reference line.
    pub mean_row: f32,
}

/// X axis layout. Positions are measured from the left of the plot area.
#[derive(Clone, Debug, PartialEq)]
pub struct XAxisLayout {
    /// One label per group, centered in its band.
    pub labels: Vec<Tick>,
    /// Height of the axis line above the bottom of the plot area. Nonzero
    /// only when the domain extends below zero.
    pub axis_offset: f32,
}

pub struct AxisLayout;

impl AxisLayout {
    pub fn y_axis(
        scale: &LinearScale,
        area: &GraphArea,
        tick_count: usize,
        mean: f64,
    ) -> YAxisLayout {
        let ticks = scale
            .ticks(tick_count)
            .into_iter()
            .map(|value| Tick {
                position: area.height - scale.map(value),
                label: scale.format_tick(value),
            })
            .collect();

        YAxisLayout {
            ticks,
            mean_row: area.height - scale.map(mean),
        }
    }

    pub fn x_axis(band: &BandScale, y_scale: &LinearScale, series: &SeriesInput) -> XAxisLayout {
        let labels = series
            .groups
            .iter()
            .enumerate()
            .filter_map(|(idx, group)| {
                band.map_index(idx).map(|start| Tick {
                    position: start + band.bandwidth() / 2.0,
                    label: group.clone(),
                })
            })
            .collect();

        // When negative values pull the domain below zero, the axis line
        // floats above the bottom edge at the zero row. The check uses the
        // data minimum, not the scale domain: a flat all-zero series widens
        // the scale domain to (-0.5, 0.5) but still pins the axis to the
        // bottom.
        let (data_min, _) = y_domain(series.flat_y());
        let axis_offset = if data_min != 0.0 {
            y_scale.map(0.0)
        } else {
            0.0
        };

        XAxisLayout {
            labels,
            axis_offset,
        }
    }
}
