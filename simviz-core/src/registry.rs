use crate::error::ValidationError;
use crate::slider::TimeSlider;
use crate::store::TimeSeriesStore;
use layout::{ComponentDefinition, LayoutDefinition};
use log::debug;
use std::collections::HashMap;

/// One store per attached display component, keyed by component uid.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: HashMap<String, TimeSeriesStore>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layout(layout: &LayoutDefinition) -> Result<Self, ValidationError> {
        let mut registry = Self::new();
        for component in &layout.components {
            registry.attach(component)?;
        }
        Ok(registry)
    }

    /// Creates a fresh store for `component`, replacing any store already
    /// attached under the same uid.
    pub fn attach(&mut self, component: &ComponentDefinition) -> Result<(), ValidationError> {
        let store = TimeSeriesStore::from_component(component)?;
        if self.stores.insert(component.uid.clone(), store).is_some() {
            debug!("replaced store for component '{}'", component.uid);
        } else {
            debug!("attached store for component '{}'", component.uid);
        }
        Ok(())
    }

    pub fn detach(&mut self, uid: &str) -> bool {
        let removed = self.stores.remove(uid).is_some();
        if removed {
            debug!("detached store for component '{uid}'");
        }
        removed
    }

    pub fn get(&self, uid: &str) -> Option<&TimeSeriesStore> {
        self.stores.get(uid)
    }

    pub fn get_mut(&mut self, uid: &str) -> Option<&mut TimeSeriesStore> {
        self.stores.get_mut(uid)
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn uids(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Simulation reset: every store forgets its data.
    pub fn reset_all(&mut self) {
        for store in self.stores.values_mut() {
            store.reset();
        }
        debug!("reset {} stores", self.stores.len());
    }

    pub fn trim_all(&mut self, slider: &TimeSlider) {
        let (current_time, keep_duration) = slider.retention();
        for store in self.stores.values_mut() {
            store.trim(current_time, keep_duration);
        }
    }
}
