//! Selection state machine, the live-bar registry and tooltip emission.
//!
//! Kept free of any rendering infrastructure so the interaction logic is
//! testable on its own; the chart drives it from pointer callbacks.

use crate::bar_item::ActiveTarget;
use crate::data_types::{BarId, ChartConfig, SeriesInput, TooltipPayload};
use crate::layout::GraphArea;
use crate::scales::ChartScales;
use glam::Vec2;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// External collaborator that renders the tooltip. `None` means hide.
pub trait TooltipSink {
    fn show_tooltip(&mut self, payload: Option<TooltipPayload>, position: Vec2);
}

/// At most one bar is active per chart instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Active(BarId),
}

/// Mapping from bar id to the live item that must be told about activation
/// changes. Owned exclusively by the chart; items are inserted on mount and
/// removed synchronously on unmount so a stale handle can never receive a
/// phantom activation.
#[derive(Default)]
pub struct BarRegistry {
    targets: HashMap<BarId, Arc<dyn ActiveTarget>>,
}

impl BarRegistry {
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
        }
    }

    pub fn insert(&mut self, target: Arc<dyn ActiveTarget>) {
        self.targets.insert(target.id(), target);
    }

    pub fn remove(&mut self, id: BarId) {
        self.targets.remove(&id);
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn contains(&self, id: BarId) -> bool {
        self.targets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Pushes the active id to every registered item so exactly one of them
    /// reports itself active afterwards.
    pub fn notify_all(&self, active: Option<BarId>) {
        for target in self.targets.values() {
            target.update_active(active);
        }
    }
}

/// Borrowed chart state the tooltip math reads from.
pub struct TooltipContext<'a> {
    pub series: &'a SeriesInput,
    pub scales: &'a ChartScales,
    pub area: &'a GraphArea,
    pub config: &'a ChartConfig,
    /// Screen position of the chart container.
    pub origin: Vec2,
}

/// Computes the tooltip content and screen anchor for a bar.
///
/// The horizontal anchor sits halfway across the bar, offset by the chart
/// container's screen position and the left axis padding. The vertical
/// anchor starts at the baseline's screen row and moves to the bar's
/// vertical midpoint, up for positive values and down for negative ones.
pub fn prepare_tooltip(id: BarId, ctx: &TooltipContext) -> Option<(TooltipPayload, Vec2)> {
    let (group, x_value, y_value) = ctx.series.lookup(id)?;
    let item_count = ctx.series.y_series[id.group].len();

    let scaled_zero = ctx.scales.y.map(0.0);
    let mut y_pos = ctx.origin.y + ctx.area.baseline_row(&ctx.scales.y);
    if y_value >= 0.0 {
        let bar_height = ctx.scales.y.map(y_value) - scaled_zero;
        y_pos -= bar_height / 2.0;
    } else {
        let bar_height = scaled_zero - ctx.scales.y.map(y_value);
        y_pos += bar_height / 2.0;
    }

    let group_width = ctx.scales.x.bandwidth() - 2.0 * ctx.config.group_padding;
    let item_width = group_width / item_count as f32;
    let bar_anchor = ctx.scales.x.map_index(id.group)?
        + ctx.config.group_padding
        + id.item as f32 * item_width
        + item_width / 2.0;
    let x_pos = ctx.origin.x + bar_anchor + ctx.config.padding.left;

    let total = ctx.series.y_sum();
    let percentage = if total != 0.0 { y_value / total } else { 0.0 };

    let payload = TooltipPayload {
        x_value: x_value.to_string(),
        y_value,
        group: group.to_string(),
        percentage,
    };
    Some((payload, Vec2::new(x_pos, y_pos)))
}

/// Drives the `Idle` / `Active` transitions and their side effects. On every
/// transition the registry fan-out runs before the tooltip emission so the
/// highlight and the tooltip are never observably out of sync.
#[derive(Default)]
pub struct SelectionController {
    selection: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            selection: Selection::Idle,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Activates a bar from a hover or touch event. A touch on the already
    /// active bar acts as a toggle and deselects instead.
    pub fn select(
        &mut self,
        id: BarId,
        touch: bool,
        registry: &BarRegistry,
        ctx: &TooltipContext,
        sink: &mut dyn TooltipSink,
    ) {
        if touch && self.selection == Selection::Active(id) {
            self.deselect(registry, sink);
            return;
        }

        debug!(group = id.group, item = id.item, "bar activated");
        self.selection = Selection::Active(id);
        registry.notify_all(Some(id));

        if let Some((payload, position)) = prepare_tooltip(id, ctx) {
            sink.show_tooltip(Some(payload), position);
        }
    }

    /// Returns to `Idle`, clears every item's highlight and hides the tooltip.
    pub fn deselect(&mut self, registry: &BarRegistry, sink: &mut dyn TooltipSink) {
        debug!("selection cleared");
        self.selection = Selection::Idle;
        registry.notify_all(None);
        sink.show_tooltip(None, Vec2::ZERO);
    }
}
