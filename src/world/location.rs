//! Strategic locations - bridges and passes that can levy transit tax

use serde::{Deserialize, Serialize};

use crate::core::types::LocationId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicLocation {
    pub id: LocationId,
    pub name: String,
    pub is_bridge_crossing: bool,
    /// Per-unit toll; negative values collect nothing
    pub transit_tax: i32,
}

impl StrategicLocation {
    pub fn bridge(id: impl Into<LocationId>, name: impl Into<String>, transit_tax: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_bridge_crossing: true,
            transit_tax,
        }
    }

    /// Toll collected from `unit_count` passing units
    pub fn transit_income(&self, unit_count: i32) -> u64 {
        if !self.is_bridge_crossing {
            return 0;
        }
        unit_count.max(0) as u64 * self.transit_tax.max(0) as u64
    }
}

#[derive(Debug, Default, Clone)]
pub struct LocationRegistry {
    locations: Vec<StrategicLocation>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, location: StrategicLocation) -> bool {
        if self.find(&location.id).is_some() {
            return false;
        }
        self.locations.push(location);
        true
    }

    pub fn find(&self, id: &LocationId) -> Option<&StrategicLocation> {
        self.locations.iter().find(|l| &l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrategicLocation> {
        self.locations.iter()
    }

    pub fn clear(&mut self) {
        self.locations.clear();
    }

    /// Unknown locations and plain roads collect nothing
    pub fn transit_tax_income(&self, id: &LocationId, unit_count: i32) -> u64 {
        self.find(id)
            .map(|l| l.transit_income(unit_count))
            .unwrap_or(0)
    }
}
