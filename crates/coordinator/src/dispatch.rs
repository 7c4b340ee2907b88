//! The dispatcher: the single mutation path for dispatch state.

use std::sync::Arc;

use lifeline_common::{
    Incident, IncidentPatch, LifelineError, NewIncident, Responder, ResponderPatch, Result,
};
use lifeline_store::DispatchStore;
use tracing::info;

/// Coordination API façade over the dispatch store.
///
/// Every external operation flows through here; the store is injected so
/// tests (and eventually a durable backend) can swap it out.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn DispatchStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn DispatchStore>) -> Self {
        Self { store }
    }

    pub async fn list_incidents(&self) -> Vec<Incident> {
        self.store.list_incidents().await
    }

    pub async fn get_incident(&self, id: &str) -> Result<Incident> {
        self.store.get_incident(id).await
    }

    /// Create an incident after validating the required fields.
    pub async fn create_incident(&self, new: NewIncident) -> Result<Incident> {
        if new.kind.trim().is_empty() {
            return Err(LifelineError::InvalidInput("Incident type is required".into()));
        }
        if new.description.trim().is_empty() {
            return Err(LifelineError::InvalidInput(
                "Incident description is required".into(),
            ));
        }

        let incident = self.store.create_incident(new).await?;
        info!(
            incident_id = %incident.id,
            kind = %incident.kind,
            priority = ?incident.priority,
            "Incident created"
        );
        Ok(incident)
    }

    pub async fn update_incident(&self, id: &str, patch: IncidentPatch) -> Result<Incident> {
        self.store.update_incident(id, patch).await
    }

    pub async fn list_responders(&self) -> Vec<Responder> {
        self.store.list_responders().await
    }

    pub async fn get_responder(&self, id: &str) -> Result<Responder> {
        self.store.get_responder(id).await
    }

    pub async fn update_responder(&self, id: &str, patch: ResponderPatch) -> Result<Responder> {
        self.store.update_responder(id, patch).await
    }

    /// Bind an available responder to an incident. Both records change as
    /// one atomic unit inside the store.
    pub async fn assign(
        &self,
        incident_id: &str,
        responder_id: &str,
    ) -> Result<(Incident, Responder)> {
        let pair = self.store.assign(incident_id, responder_id).await?;
        info!(incident_id, responder_id, "Assignment completed");
        Ok(pair)
    }

    pub async fn unassign(&self, incident_id: &str) -> Result<(Incident, Option<Responder>)> {
        self.store.unassign(incident_id).await
    }

    /// Resolve an incident, freeing any assigned responder. Idempotent.
    pub async fn resolve(&self, incident_id: &str, resolved_by: Option<String>) -> Result<Incident> {
        let incident = self.store.resolve(incident_id, resolved_by).await?;
        info!(
            incident_id,
            resolved_by = incident.resolved_by.as_deref().unwrap_or("citizen"),
            "Incident resolved"
        );
        Ok(incident)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeline_common::{IncidentStatus, Location, Priority, ResponderStatus};
    use lifeline_store::InMemoryStore;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(InMemoryStore::seeded()))
    }

    fn new_incident(kind: &str, description: &str) -> NewIncident {
        NewIncident {
            kind: kind.into(),
            priority: Priority::Medium,
            location: Location {
                lat: 34.05,
                lng: -118.24,
                address: None,
            },
            description: description.into(),
        }
    }

    #[tokio::test]
    async fn create_incident_validates_required_fields() {
        let dispatcher = dispatcher();

        let err = dispatcher
            .create_incident(new_incident("", "needs help"))
            .await
            .unwrap_err();
        assert!(matches!(err, LifelineError::InvalidInput(_)));

        let err = dispatcher
            .create_incident(new_incident("welfare_check", "  "))
            .await
            .unwrap_err();
        assert!(matches!(err, LifelineError::InvalidInput(_)));

        // Nothing was created by the rejected calls.
        assert_eq!(dispatcher.list_incidents().await.len(), 1);
    }

    #[tokio::test]
    async fn create_after_seed_gets_next_id() {
        let dispatcher = dispatcher();
        let incident = dispatcher
            .create_incident(new_incident("welfare_check", "Wellness check requested"))
            .await
            .unwrap();

        assert_eq!(incident.id, "INC-002");
        assert_eq!(incident.status, IncidentStatus::Active);
        assert!(incident.assigned_responder.is_none());
    }

    #[tokio::test]
    async fn full_assignment_cycle_through_facade() {
        let dispatcher = dispatcher();

        let (incident, responder) = dispatcher.assign("INC-001", "RSP-001").await.unwrap();
        assert_eq!(incident.status, IncidentStatus::Assigned);
        assert_eq!(responder.current_assignment.as_deref(), Some("INC-001"));

        let resolved = dispatcher
            .resolve("INC-001", Some("coordinator".into()))
            .await
            .unwrap();
        assert_eq!(resolved.status, IncidentStatus::Resolved);

        let responder = dispatcher.get_responder("RSP-001").await.unwrap();
        assert_eq!(responder.status, ResponderStatus::Available);
    }

    #[tokio::test]
    async fn update_responder_passes_patch_through() {
        let dispatcher = dispatcher();
        let responder = dispatcher
            .update_responder(
                "RSP-002",
                ResponderPatch {
                    status: Some(ResponderStatus::Offline),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(responder.status, ResponderStatus::Offline);
    }
}
