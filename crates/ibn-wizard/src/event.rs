//! Navigation intents and wizard state
//!
//! ```text
//! InProgress
//!   ↓ next on the last view
//! Finished
//! ```

use serde::{Deserialize, Serialize};

/// Emitted by a view when the user presses a navigation button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewEvent {
    Previous,
    Next,
}

impl ViewEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewEvent::Previous => "previous",
            ViewEvent::Next => "next",
        }
    }
}

impl std::fmt::Display for ViewEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ViewEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "previous" | "prev" | "back" => Ok(ViewEvent::Previous),
            "next" | "forward" => Ok(ViewEvent::Next),
            _ => Err(format!("Unknown view event: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    /// A view is shown and accepts events
    InProgress,
    /// The last view was confirmed
    Finished,
}

impl WizardState {
    pub fn can_transition_to(&self, target: WizardState) -> bool {
        match (self, target) {
            (WizardState::InProgress, WizardState::Finished) => true,
            (WizardState::InProgress, WizardState::InProgress) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardState::InProgress => "in_progress",
            WizardState::Finished => "finished",
        }
    }
}

impl std::fmt::Display for WizardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WizardState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" => Ok(WizardState::InProgress),
            "finished" => Ok(WizardState::Finished),
            _ => Err(format!("Unknown wizard state: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event() {
        assert_eq!("next".parse::<ViewEvent>().unwrap(), ViewEvent::Next);
        assert_eq!("Back".parse::<ViewEvent>().unwrap(), ViewEvent::Previous);
        assert!("jump".parse::<ViewEvent>().is_err());
    }

    #[test]
    fn test_transitions() {
        assert!(WizardState::InProgress.can_transition_to(WizardState::Finished));
        assert!(!WizardState::Finished.can_transition_to(WizardState::InProgress));
        assert!(!WizardState::Finished.can_transition_to(WizardState::Finished));
    }

    #[test]
    fn test_state_round_trip() {
        for state in [WizardState::InProgress, WizardState::Finished] {
            assert_eq!(state.as_str().parse::<WizardState>().unwrap(), state);
        }
    }
}
