//! Dispatch state storage for Lifeline.
//!
//! The [`DispatchStore`] trait is the seam between the coordination engine
//! and whatever holds the records. The in-memory implementation here is the
//! only one in tree; a durable backend would implement the same trait.
//!
//! The three compound assignment operations live on the store rather than
//! above it so that the incident/responder pair is mutated under a single
//! writer lock. Readers see either the fully-pre or fully-post state of an
//! assignment, never one side without the other.

pub mod memory;
pub mod store;

pub use memory::InMemoryStore;
pub use store::DispatchStore;
