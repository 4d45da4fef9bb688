use crate::axis::{AxisLayout, XAxisLayout, YAxisLayout};
use crate::bar_item::BarItem;
use crate::data_types::{Bar, BarId, ChartConfig, SeriesInput};
use crate::geometry::GeometryCache;
use crate::layout::GraphArea;
use crate::scales::ChartScales;
use crate::selection::{BarRegistry, Selection, SelectionController, TooltipContext, TooltipSink};
use eyre::{bail, Result};
use glam::Vec2;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the chart is driven by. Mirrors one render's worth of props:
/// a changed value on the next update triggers recomputation, an unchanged
/// set reuses the cached geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartProps {
    pub groups: Vec<String>,
    pub x_series: Vec<Vec<String>>,
    pub y_series: Vec<Vec<f64>>,
    pub width: f32,
    pub height: f32,
    pub config: ChartConfig,
    /// Screen position of the chart container, for tooltip anchoring.
    pub origin: Vec2,
}

/// The chart instance: owns the series, scales, geometry cache, live-bar
/// registry and selection state, and forwards tooltip events to the sink.
pub struct BarChart {
    config: ChartConfig,
    series: SeriesInput,
    width: f32,
    height: f32,
    origin: Vec2,
    area: GraphArea,
    scales: ChartScales,
    cache: GeometryCache,
    bars: Arc<Vec<Bar>>,
    items: Vec<Arc<BarItem>>,
    registry: BarRegistry,
    controller: SelectionController,
    sink: Box<dyn TooltipSink>,
}

impl BarChart {
    pub fn new(props: ChartProps, sink: Box<dyn TooltipSink>) -> Result<Self> {
        validate_dimensions(props.width, props.height)?;
        let series = SeriesInput::new(props.groups, props.x_series, props.y_series);
        series.validate()?;

        let area = GraphArea::new(props.width, props.height, &props.config.padding);
        let scales = ChartScales::compute(&series, &area);
        let cache = GeometryCache::new();
        let bars = cache.bars(&series, &scales, &area, props.config.group_padding);

        let mut chart = Self {
            config: props.config,
            series,
            width: props.width,
            height: props.height,
            origin: props.origin,
            area,
            scales,
            cache,
            bars,
            items: Vec::new(),
            registry: BarRegistry::new(),
            controller: SelectionController::new(),
            sink,
        };
        chart.mount_bars();
        info!(bars = chart.bars.len(), "bar chart created");
        Ok(chart)
    }

    /// Applies a new set of props. Rejected input leaves the previous state
    /// untouched. A held selection survives when its id still resolves in
    /// the new data; otherwise it is dropped and the tooltip hidden.
    pub fn update(&mut self, props: ChartProps) -> Result<()> {
        if let Err(err) = validate_dimensions(props.width, props.height) {
            warn!(%err, "chart update rejected");
            return Err(err);
        }
        let series = SeriesInput::new(props.groups, props.x_series, props.y_series);
        if let Err(err) = series.validate() {
            warn!(%err, "chart update rejected");
            return Err(err);
        }

        self.config = props.config;
        self.series = series;
        self.width = props.width;
        self.height = props.height;
        self.origin = props.origin;

        self.area = GraphArea::new(self.width, self.height, &self.config.padding);
        self.scales = ChartScales::compute(&self.series, &self.area);
        self.bars = self
            .cache
            .bars(&self.series, &self.scales, &self.area, self.config.group_padding);
        self.mount_bars();

        match self.controller.selection() {
            Selection::Active(id) if self.registry.contains(id) => {
                // Re-notify so the freshly mounted items pick the highlight
                // back up, and re-emit the tooltip against the new geometry.
                self.select(id, false);
            }
            Selection::Active(_) => {
                self.controller.deselect(&self.registry, self.sink.as_mut());
            }
            Selection::Idle => {}
        }
        Ok(())
    }

    /// Pointer hover over a bar.
    pub fn hover(&mut self, id: BarId) {
        if !self.registry.contains(id) {
            warn!(group = id.group, item = id.item, "hover on unknown bar");
            return;
        }
        self.select(id, false);
    }

    /// Touch select. Touching the already active bar deselects it.
    pub fn touch(&mut self, id: BarId) {
        if !self.registry.contains(id) {
            warn!(group = id.group, item = id.item, "touch on unknown bar");
            return;
        }
        self.select(id, true);
    }

    pub fn deselect(&mut self) {
        self.controller.deselect(&self.registry, self.sink.as_mut());
    }

    /// Removes an unmounted bar from the notification table. Must be called
    /// synchronously on unmount; afterwards the item receives no further
    /// activation updates.
    pub fn unmount_bar(&mut self, id: BarId) {
        self.registry.remove(id);
        self.items.retain(|item| item.id() != id);
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn items(&self) -> &[Arc<BarItem>] {
        &self.items
    }

    pub fn selection(&self) -> Selection {
        self.controller.selection()
    }

    pub fn area(&self) -> &GraphArea {
        &self.area
    }

    pub fn scales(&self) -> &ChartScales {
        &self.scales
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn y_axis_layout(&self) -> YAxisLayout {
        AxisLayout::y_axis(
            &self.scales.y,
            &self.area,
            self.config.y_tick_count,
            self.series.y_mean(),
        )
    }

    pub fn x_axis_layout(&self) -> XAxisLayout {
        AxisLayout::x_axis(&self.scales.x, &self.scales.y, &self.series)
    }

    fn select(&mut self, id: BarId, touch: bool) {
        let ctx = TooltipContext {
            series: &self.series,
            scales: &self.scales,
            area: &self.area,
            config: &self.config,
            origin: self.origin,
        };
        self.controller
            .select(id, touch, &self.registry, &ctx, self.sink.as_mut());
    }

    /// Replaces the mounted items and the registry with the current bars.
    /// Old entries are dropped first so a stale handle can never be notified
    /// after its bar is gone.
    fn mount_bars(&mut self) {
        self.registry.clear();
        self.items.clear();
        for bar in self.bars.iter() {
            let item = BarItem::new(bar);
            self.registry.insert(item.clone());
            self.items.push(item);
        }
    }
}

fn validate_dimensions(width: f32, height: f32) -> Result<()> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        bail!("invalid chart dimensions {}x{}", width, height);
    }
    Ok(())
}
