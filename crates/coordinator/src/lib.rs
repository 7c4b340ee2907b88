//! Coordination engine for Lifeline.
//!
//! The [`Dispatcher`] is the façade every transport goes through:
//! 1. Validates caller input
//! 2. Delegates entity reads/writes to the injected [`DispatchStore`]
//! 3. Drives the assignment lifecycle (assign / unassign / resolve)
//!
//! # Architecture
//!
//! ```text
//! External caller (HTTP, CLI, ...)
//!      │
//!      ▼
//! ┌─────────────────┐
//! │   Dispatcher    │  ◄── this crate
//! └────────┬────────┘
//!          │
//!    ┌─────┴──────┐
//!    ▼            ▼
//! [Incidents] [Responders]   (one DispatchStore, one lock)
//! ```
//!
//! Question answering lives in `lifeline-brain` and shares no state with
//! the dispatcher beyond configuration.

pub mod config;
pub mod dispatch;

pub use config::CoordinatorConfig;
pub use dispatch::Dispatcher;

pub use lifeline_store::{DispatchStore, InMemoryStore};
