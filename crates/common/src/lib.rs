//! Common types shared across Lifeline crates.
//!
//! This crate provides the entity shapes (incidents, responders) and the
//! error taxonomy that every other component builds on.

pub mod error;
pub mod incident;
pub mod responder;
pub mod time;

pub use error::{LifelineError, Result};
pub use incident::{Incident, IncidentPatch, IncidentStatus, Location, NewIncident, Priority};
pub use responder::{Responder, ResponderPatch, ResponderStatus};
pub use time::now_millis;
