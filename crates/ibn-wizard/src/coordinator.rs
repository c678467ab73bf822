//! Wizard coordinator

use serde::Serialize;
use std::collections::HashSet;

use crate::error::WizardError;
use crate::event::{ViewEvent, WizardState};
use crate::Result;

#[derive(Debug, Clone, Serialize)]
pub struct WizardCoordinator {
    views: Vec<String>,
    position: usize,
    state: WizardState,
}

impl WizardCoordinator {
    /// Views are shown in the given order, starting with the first one
    pub fn new(views: Vec<String>) -> Result<Self> {
        if views.is_empty() {
            return Err(WizardError::NoViews);
        }

        let mut seen = HashSet::new();
        for view in &views {
            if !seen.insert(view.as_str()) {
                return Err(WizardError::DuplicateView(view.clone()));
            }
        }

        Ok(Self {
            views,
            position: 0,
            state: WizardState::InProgress,
        })
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn current_view(&self) -> &str {
        &self.views[self.position]
    }

    pub fn views(&self) -> &[String] {
        &self.views
    }

    pub fn is_last_view(&self) -> bool {
        self.position + 1 == self.views.len()
    }

    /// Apply a navigation intent and return the resulting state
    pub fn handle(&mut self, event: ViewEvent) -> Result<WizardState> {
        if self.state == WizardState::Finished {
            return Err(WizardError::Finished);
        }

        let target = match event {
            ViewEvent::Next if self.is_last_view() => WizardState::Finished,
            ViewEvent::Previous if self.position == 0 => {
                return Err(WizardError::InvalidTransition {
                    view: self.current_view().to_string(),
                    event: event.to_string(),
                });
            }
            _ => WizardState::InProgress,
        };

        if !self.state.can_transition_to(target) {
            return Err(WizardError::InvalidTransition {
                view: self.current_view().to_string(),
                event: event.to_string(),
            });
        }

        let from = self.current_view().to_string();
        match (event, target) {
            (_, WizardState::Finished) => {}
            (ViewEvent::Next, _) => self.position += 1,
            (ViewEvent::Previous, _) => self.position -= 1,
        }
        self.state = target;

        tracing::info!(
            event = %event,
            from = %from,
            to = %self.current_view(),
            state = %self.state,
            "Wizard transition"
        );

        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn views(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_walk_forward_and_back() {
        let mut wizard =
            WizardCoordinator::new(views(&["preinstallation", "configuration", "completion"]))
                .unwrap();
        assert_eq!(wizard.current_view(), "preinstallation");

        assert_eq!(wizard.handle(ViewEvent::Next).unwrap(), WizardState::InProgress);
        assert_eq!(wizard.current_view(), "configuration");

        assert_eq!(wizard.handle(ViewEvent::Previous).unwrap(), WizardState::InProgress);
        assert_eq!(wizard.current_view(), "preinstallation");
    }

    #[test]
    fn test_next_on_last_view_finishes() {
        let mut wizard = WizardCoordinator::new(views(&["configuration", "completion"])).unwrap();
        wizard.handle(ViewEvent::Next).unwrap();
        assert!(wizard.is_last_view());

        assert_eq!(wizard.handle(ViewEvent::Next).unwrap(), WizardState::Finished);
        assert_eq!(wizard.current_view(), "completion");
        assert_eq!(wizard.handle(ViewEvent::Previous), Err(WizardError::Finished));
    }

    #[test]
    fn test_previous_on_first_view() {
        let mut wizard = WizardCoordinator::new(views(&["completion"])).unwrap();
        let err = wizard.handle(ViewEvent::Previous).unwrap_err();

        assert!(matches!(err, WizardError::InvalidTransition { .. }));
        assert_eq!(wizard.current_view(), "completion");
        assert_eq!(wizard.state(), WizardState::InProgress);
    }

    #[test]
    fn test_invalid_view_lists() {
        assert_eq!(WizardCoordinator::new(vec![]).unwrap_err(), WizardError::NoViews);
        assert_eq!(
            WizardCoordinator::new(views(&["a", "b", "a"])).unwrap_err(),
            WizardError::DuplicateView("a".to_string())
        );
    }
}
