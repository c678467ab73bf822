//! Wizard error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WizardError {
    #[error("Wizard has no views")]
    NoViews,

    #[error("Duplicate view: {0}")]
    DuplicateView(String),

    #[error("Invalid transition: {event} on {view}")]
    InvalidTransition { view: String, event: String },

    #[error("Wizard already finished")]
    Finished,
}
