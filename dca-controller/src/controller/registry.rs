//! Controller Registry - manages available controllers

use crate::config::{DcaControllerConfig, DCA_CONTROLLER_NAME};
use crate::controller::{Controller, DcaController};
use crate::Result;
use anyhow::Context;
use serde_json::Value;
use std::collections::HashMap;

pub type ControllerFactory = Box<dyn Fn(Value) -> Result<Box<dyn Controller>> + Send + Sync>;

/// Controller Registry - maps controller names to their factories
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        // Register built-in controllers
        registry.register_controller(DCA_CONTROLLER_NAME, |value| {
            let config = DcaControllerConfig::from_json_value(value)
                .context("Invalid dca_controller config")?;
            Ok(Box::new(DcaController::new(config)))
        });

        registry
    }

    /// Register a controller factory
    pub fn register_controller<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(Value) -> Result<Box<dyn Controller>> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_lowercase(), Box::new(factory));
    }

    /// Create a controller from its config document.
    ///
    /// `controller_name` selects the factory and defaults to the DCA controller.
    pub fn create_controller(&self, config: Value) -> Result<Box<dyn Controller>> {
        let controller_name = config
            .get("controller_name")
            .and_then(|v| v.as_str())
            .unwrap_or(DCA_CONTROLLER_NAME)
            .to_lowercase();
        let factory = self
            .factories
            .get(&controller_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown controller: {}", controller_name))?;

        factory(config)
    }

    /// Get list of available controller names
    pub fn available_controllers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a controller name is available
    pub fn has_controller(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_lowercase())
    }
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
