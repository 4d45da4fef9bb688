use crate::data_types::{Bar, BarGeometry, BarId};
use parking_lot::Mutex;
use std::sync::Arc;

/// A registry entry that can be told which bar is currently active.
pub trait ActiveTarget {
    fn id(&self) -> BarId;
    fn update_active(&self, active: Option<BarId>);
}

/// One interactive bar: its rectangle plus an active flag that only the
/// selection fan-out may set. Embedders read the flag when painting and feed
/// pointer events back to the chart by id.
pub struct BarItem {
    id: BarId,
    geometry: BarGeometry,
    data_x: String,
    data_y: f64,
    active: Mutex<bool>,
}

impl BarItem {
    pub fn new(bar: &Bar) -> Arc<Self> {
        Arc::new(Self {
            id: bar.id,
            geometry: bar.geometry,
            data_x: bar.data_x.clone(),
            data_y: bar.data_y,
            active: Mutex::new(false),
        })
    }

    pub fn id(&self) -> BarId {
        self.id
    }

    pub fn geometry(&self) -> BarGeometry {
        self.geometry
    }

    pub fn data_x(&self) -> &str {
        &self.data_x
    }

    pub fn data_y(&self) -> f64 {
        self.data_y
    }

    pub fn is_active(&self) -> bool {
        *self.active.lock()
    }
}

impl ActiveTarget for BarItem {
    fn id(&self) -> BarId {
        self.id
    }

    fn update_active(&self, active: Option<BarId>) {
        *self.active.lock() = active == Some(self.id);
    }
}
