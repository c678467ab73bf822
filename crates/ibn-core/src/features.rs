//! Feature area registration
//!
//! A feature area lists the views that belong to it. Registration happens
//! once at start; areas carry no runtime behaviour.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureArea {
    pub name: String,
    /// Every view owned by the area
    pub declarations: Vec<String>,
    /// Views opened as modals rather than embedded
    pub entry_views: Vec<String>,
    /// Views other areas may embed
    pub exports: Vec<String>,
}

impl FeatureArea {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            entry_views: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn declare(mut self, view: impl Into<String>) -> Self {
        self.declarations.push(view.into());
        self
    }

    pub fn entry(mut self, view: impl Into<String>) -> Self {
        self.entry_views.push(view.into());
        self
    }

    pub fn export(mut self, view: impl Into<String>) -> Self {
        self.exports.push(view.into());
        self
    }

    pub fn declares(&self, view: &str) -> bool {
        self.declarations.iter().any(|v| v == view)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Feature("feature area without name".to_string()));
        }

        let mut seen = HashSet::new();
        for view in &self.declarations {
            if !seen.insert(view.as_str()) {
                return Err(CoreError::Feature(format!(
                    "{} declares {} twice",
                    self.name, view
                )));
            }
        }

        for view in self.entry_views.iter().chain(&self.exports) {
            if !self.declares(view) {
                return Err(CoreError::Feature(format!(
                    "{} references undeclared view {}",
                    self.name, view
                )));
            }
        }

        Ok(())
    }

    /// Promotional tiles shown on the live dashboard
    pub fn advertisement() -> Self {
        Self::new("advertisement")
            .declare("advertisement")
            .declare("evcs-upgrade")
            .declare("evcs-upgrade-modal")
            .declare("home-electric")
            .declare("home-electric-modal")
            .declare("miniupgrade")
            .declare("miniupgrade-modal")
            .declare("survey")
            .entry("evcs-upgrade-modal")
            .entry("miniupgrade-modal")
            .entry("home-electric-modal")
            .export("advertisement")
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureRegistry {
    areas: Vec<FeatureArea>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every area shipped by the tool
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(FeatureArea::advertisement())?;
        Ok(registry)
    }

    pub fn register(&mut self, area: FeatureArea) -> Result<()> {
        area.validate()?;

        if self.area(&area.name).is_some() {
            return Err(CoreError::Feature(format!(
                "feature area {} already registered",
                area.name
            )));
        }

        tracing::debug!(
            area = %area.name,
            views = area.declarations.len(),
            "Registered feature area"
        );

        self.areas.push(area);
        Ok(())
    }

    pub fn area(&self, name: &str) -> Option<&FeatureArea> {
        self.areas.iter().find(|a| a.name == name)
    }

    pub fn areas(&self) -> &[FeatureArea] {
        &self.areas
    }

    /// Area owning `view`, if any
    pub fn owner_of(&self, view: &str) -> Option<&FeatureArea> {
        self.areas.iter().find(|a| a.declares(view))
    }
}
