//! Plot-area arithmetic shared by the scales, geometry and tooltip math.

use crate::data_types::Padding;
use crate::scales::LinearScale;

/// The visible plot area of the chart, excluding the axes and their labels.
/// The Y scale maps values to distances from the bottom edge; rows here are
/// measured from the top edge as screen coordinates are.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphArea {
    pub width: f32,
    pub height: f32,
}

impl GraphArea {
    pub fn new(width: f32, height: f32, padding: &Padding) -> Self {
        Self {
            width: (width - padding.bottom).max(0.0),
            height: (height - padding.bottom).max(0.0),
        }
    }

    /// Pixel row of the zero baseline, measured from the top of the area.
    pub fn baseline_row(&self, y_scale: &LinearScale) -> f32 {
        self.height - y_scale.map(0.0)
    }
}
