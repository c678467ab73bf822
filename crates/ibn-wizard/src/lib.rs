//! IBN Commissioning Wizard
//!
//! Views do not navigate on their own. They emit a [`ViewEvent`] and the
//! [`WizardCoordinator`] decides which view comes next.

mod coordinator;
mod error;
mod event;

pub use coordinator::WizardCoordinator;
pub use error::WizardError;
pub use event::{ViewEvent, WizardState};

pub type Result<T> = std::result::Result<T, WizardError>;
