//! The storage trait for dispatch state.

use async_trait::async_trait;
use lifeline_common::{
    Incident, IncidentPatch, NewIncident, Responder, ResponderPatch, Result,
};

/// Storage for incidents and responders.
///
/// Listing order is creation order. `update_*` apply partial patches verbatim;
/// the compound operations (`assign`, `unassign`, `resolve`) are the only way
/// to mutate both sides of an assignment and must be atomic: no interleaved
/// reader may observe the incident updated but not the responder, or vice
/// versa.
#[async_trait]
pub trait DispatchStore: Send + Sync {
    async fn list_incidents(&self) -> Vec<Incident>;

    async fn get_incident(&self, id: &str) -> Result<Incident>;

    /// Assigns the next sequential `INC-NNN` id. Ids are never reused.
    async fn create_incident(&self, new: NewIncident) -> Result<Incident>;

    /// Merges the patch and refreshes `updated_at`.
    async fn update_incident(&self, id: &str, patch: IncidentPatch) -> Result<Incident>;

    async fn list_responders(&self) -> Vec<Responder>;

    async fn get_responder(&self, id: &str) -> Result<Responder>;

    async fn update_responder(&self, id: &str, patch: ResponderPatch) -> Result<Responder>;

    /// Bind a responder to an incident.
    ///
    /// Fails with `NotFound` if either id is absent and with
    /// `ResponderUnavailable` if the responder is not `Available`; on failure
    /// neither record is modified. Re-assigning an incident releases its
    /// previous responder. Assigning the already-bound responder is a no-op.
    async fn assign(&self, incident_id: &str, responder_id: &str)
        -> Result<(Incident, Responder)>;

    /// Clear both sides of an assignment symmetrically.
    ///
    /// No-op success (responder side `None`) when nothing is assigned.
    async fn unassign(&self, incident_id: &str) -> Result<(Incident, Option<Responder>)>;

    /// Mark an incident resolved, releasing any assigned responder first.
    ///
    /// Idempotent: resolving a resolved incident returns the existing record
    /// with its original `resolved_at` untouched.
    async fn resolve(&self, incident_id: &str, resolved_by: Option<String>) -> Result<Incident>;
}
