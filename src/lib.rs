//! bandchart: layout and interaction engine for grouped bar charts

pub mod axis;
pub mod bar_item;
pub mod chart;
pub mod data_types;
pub mod geometry;
pub mod layout;
pub mod scales;
pub mod selection;

pub use chart::{BarChart, ChartProps};
pub use data_types::{Bar, BarGeometry, BarId, ChartConfig, Padding, SeriesInput, TooltipPayload};
pub use layout::GraphArea;
pub use scales::{BandScale, ChartScales, LinearScale};
pub use selection::{Selection, SelectionController, TooltipSink};
