//! In-memory dispatch store.

use async_trait::async_trait;
use lifeline_common::{
    now_millis, Incident, IncidentPatch, IncidentStatus, LifelineError, Location, NewIncident,
    Priority, Responder, ResponderPatch, ResponderStatus, Result,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::store::DispatchStore;

#[derive(Default)]
struct DispatchState {
    incidents: Vec<Incident>,
    responders: Vec<Responder>,
    // Sequence counters, not Vec lengths: ids stay unique even if a
    // retention policy ever removes old records.
    incident_seq: u64,
    responder_seq: u64,
}

impl DispatchState {
    fn next_incident_id(&mut self) -> String {
        self.incident_seq += 1;
        format!("INC-{:03}", self.incident_seq)
    }

    fn next_responder_id(&mut self) -> String {
        self.responder_seq += 1;
        format!("RSP-{:03}", self.responder_seq)
    }

    fn incident_index(&self, id: &str) -> Result<usize> {
        self.incidents
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| LifelineError::incident_not_found(id))
    }

    fn responder_index(&self, id: &str) -> Result<usize> {
        self.responders
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LifelineError::responder_not_found(id))
    }

    /// Release the responder bound to `responder_id`, if present.
    fn release_responder(&mut self, responder_id: &str) {
        if let Some(responder) = self.responders.iter_mut().find(|r| r.id == responder_id) {
            responder.status = ResponderStatus::Available;
            responder.current_assignment = None;
        }
    }
}

/// Process-lifetime store guarded by a single read/write lock.
///
/// The lock covers both entity tables, which is what makes the compound
/// operations atomic with respect to readers.
pub struct InMemoryStore {
    state: RwLock<DispatchState>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DispatchState::default()),
        }
    }

    /// Store pre-loaded with the demo records the original service shipped:
    /// one active welfare-check incident and two available responder units.
    pub fn seeded() -> Self {
        let mut state = DispatchState::default();

        let id = state.next_incident_id();
        state.incidents.push(
            NewIncident {
                kind: "welfare_check".into(),
                priority: Priority::Medium,
                location: Location {
                    lat: 34.0522,
                    lng: -118.2437,
                    address: Some("123 Main St".into()),
                },
                description: "Wellness check requested".into(),
            }
            .into_incident(id),
        );

        let id = state.next_responder_id();
        state.responders.push(
            Responder::new(
                id,
                "Unit Alpha",
                Location {
                    lat: 34.0525,
                    lng: -118.2440,
                    address: None,
                },
            )
            .with_specializations(["wellness", "crisis_support"]),
        );

        let id = state.next_responder_id();
        state.responders.push(
            Responder::new(
                id,
                "Unit Bravo",
                Location {
                    lat: 34.0510,
                    lng: -118.2420,
                    address: None,
                },
            )
            .with_specializations(["medical_support", "wellness"]),
        );

        info!("Seeded in-memory store with demo incident and responders");
        Self {
            state: RwLock::new(state),
        }
    }

    /// Register a responder (registry creation path; not part of the
    /// external operation surface, used by seeding and tests).
    pub async fn add_responder(
        &self,
        name: impl Into<String>,
        location: Location,
        specializations: Vec<String>,
    ) -> Responder {
        let mut state = self.state.write().await;
        let id = state.next_responder_id();
        let responder =
            Responder::new(id, name, location).with_specializations(specializations);
        state.responders.push(responder.clone());
        responder
    }
}

#[async_trait]
impl DispatchStore for InMemoryStore {
    async fn list_incidents(&self) -> Vec<Incident> {
        self.state.read().await.incidents.clone()
    }

    async fn get_incident(&self, id: &str) -> Result<Incident> {
        let state = self.state.read().await;
        let idx = state.incident_index(id)?;
        Ok(state.incidents[idx].clone())
    }

    async fn create_incident(&self, new: NewIncident) -> Result<Incident> {
        let mut state = self.state.write().await;
        let id = state.next_incident_id();
        let incident = new.into_incident(id);
        debug!(incident_id = %incident.id, kind = %incident.kind, "Created incident");
        state.incidents.push(incident.clone());
        Ok(incident)
    }

    async fn update_incident(&self, id: &str, patch: IncidentPatch) -> Result<Incident> {
        let mut state = self.state.write().await;
        let idx = state.incident_index(id)?;
        patch.apply(&mut state.incidents[idx]);
        Ok(state.incidents[idx].clone())
    }

    async fn list_responders(&self) -> Vec<Responder> {
        self.state.read().await.responders.clone()
    }

    async fn get_responder(&self, id: &str) -> Result<Responder> {
        let state = self.state.read().await;
        let idx = state.responder_index(id)?;
        Ok(state.responders[idx].clone())
    }

    async fn update_responder(&self, id: &str, patch: ResponderPatch) -> Result<Responder> {
        let mut state = self.state.write().await;
        let idx = state.responder_index(id)?;
        patch.apply(&mut state.responders[idx]);
        Ok(state.responders[idx].clone())
    }

    async fn assign(
        &self,
        incident_id: &str,
        responder_id: &str,
    ) -> Result<(Incident, Responder)> {
        let mut state = self.state.write().await;

        // Validate everything before touching either record.
        let inc_idx = state.incident_index(incident_id)?;
        let rsp_idx = state.responder_index(responder_id)?;

        if state.incidents[inc_idx].status == IncidentStatus::Resolved {
            return Err(LifelineError::InvalidInput(format!(
                "Incident {incident_id} is resolved and cannot be assigned"
            )));
        }

        if state.incidents[inc_idx].assigned_responder.as_deref() == Some(responder_id) {
            // Already bound to this responder.
            return Ok((
                state.incidents[inc_idx].clone(),
                state.responders[rsp_idx].clone(),
            ));
        }

        if state.responders[rsp_idx].status != ResponderStatus::Available {
            return Err(LifelineError::ResponderUnavailable(responder_id.to_string()));
        }

        // Reassignment: release the previously bound responder first.
        if let Some(previous) = state.incidents[inc_idx].assigned_responder.take() {
            state.release_responder(&previous);
        }

        let now = now_millis();
        {
            let incident = &mut state.incidents[inc_idx];
            incident.status = IncidentStatus::Assigned;
            incident.assigned_responder = Some(responder_id.to_string());
            incident.updated_at = now;
        }
        {
            let responder = &mut state.responders[rsp_idx];
            responder.status = ResponderStatus::Assigned;
            responder.current_assignment = Some(incident_id.to_string());
        }

        info!(incident_id, responder_id, "Assigned responder to incident");

        Ok((
            state.incidents[inc_idx].clone(),
            state.responders[rsp_idx].clone(),
        ))
    }

    async fn unassign(&self, incident_id: &str) -> Result<(Incident, Option<Responder>)> {
        let mut state = self.state.write().await;
        let inc_idx = state.incident_index(incident_id)?;

        let Some(responder_id) = state.incidents[inc_idx].assigned_responder.take() else {
            return Ok((state.incidents[inc_idx].clone(), None));
        };

        {
            let incident = &mut state.incidents[inc_idx];
            incident.status = IncidentStatus::Active;
            incident.updated_at = now_millis();
        }
        state.release_responder(&responder_id);

        info!(incident_id, responder_id = %responder_id, "Unassigned responder from incident");

        let responder = state
            .responders
            .iter()
            .find(|r| r.id == responder_id)
            .cloned();
        Ok((state.incidents[inc_idx].clone(), responder))
    }

    async fn resolve(&self, incident_id: &str, resolved_by: Option<String>) -> Result<Incident> {
        let mut state = self.state.write().await;
        let inc_idx = state.incident_index(incident_id)?;

        if state.incidents[inc_idx].status == IncidentStatus::Resolved {
            // Terminal state: second resolution is a no-op.
            return Ok(state.incidents[inc_idx].clone());
        }

        if let Some(responder_id) = state.incidents[inc_idx].assigned_responder.take() {
            state.release_responder(&responder_id);
        }

        let now = now_millis();
        let incident = &mut state.incidents[inc_idx];
        incident.status = IncidentStatus::Resolved;
        incident.resolved_by = resolved_by;
        incident.resolved_at = Some(now);
        incident.updated_at = now;

        info!(incident_id, "Resolved incident");

        Ok(state.incidents[inc_idx].clone())
    }
}
