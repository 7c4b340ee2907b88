//! Incident entity and lifecycle types.

use serde::{Deserialize, Serialize};

use crate::responder::Responder;
use crate::time::now_millis;

/// Priority level for incidents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Lifecycle state of an incident.
///
/// `Resolved` is terminal; nothing transitions out of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    #[default]
    Active,
    Assigned,
    Resolved,
}

/// A coordinate pair with an optional human-readable address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A tracked request for support, wellness, or safety assistance.
///
/// Field names on the wire match the original dispatch API (camelCase).
/// `assigned_responder` is a weak back-reference to a [`Responder`] id and is
/// non-null exactly when `status == Assigned`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Unique id, `INC-NNN`, assigned monotonically and never reused.
    pub id: String,

    /// Open-enumeration tag, e.g. `welfare_check`, `medical_support`.
    #[serde(rename = "type")]
    pub kind: String,

    pub priority: Priority,

    pub status: IncidentStatus,

    pub location: Location,

    pub description: String,

    pub assigned_responder: Option<String>,

    /// Who resolved the incident, if resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,

    /// Creation timestamp (Unix millis).
    pub created_at: u64,

    /// Refreshed on every mutation (Unix millis).
    pub updated_at: u64,

    /// Set once on the first resolution and never changed after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<u64>,
}

impl Incident {
    /// Invariant from the data model: assigned iff a responder is bound.
    pub fn assignment_consistent(&self) -> bool {
        self.assigned_responder.is_some() == (self.status == IncidentStatus::Assigned)
    }

    /// Cross-entity invariant against a responder record.
    pub fn bound_to(&self, responder: &Responder) -> bool {
        self.assigned_responder.as_deref() == Some(responder.id.as_str())
            && responder.current_assignment.as_deref() == Some(self.id.as_str())
    }
}

/// Required fields for incident creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncident {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub priority: Priority,
    pub location: Location,
    pub description: String,
}

impl NewIncident {
    /// Materialize a new record. Status starts `Active` with no responder.
    pub fn into_incident(self, id: String) -> Incident {
        let now = now_millis();
        Incident {
            id,
            kind: self.kind,
            priority: self.priority,
            status: IncidentStatus::Active,
            location: self.location,
            description: self.description,
            assigned_responder: None,
            resolved_by: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }
    }
}

/// Partial update for an incident. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentPatch {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<IncidentStatus>,
    pub location: Option<Location>,
    pub description: Option<String>,
}

impl IncidentPatch {
    /// Merge into an existing record and refresh `updated_at`.
    pub fn apply(self, incident: &mut Incident) {
        if let Some(kind) = self.kind {
            incident.kind = kind;
        }
        if let Some(priority) = self.priority {
            incident.priority = priority;
        }
        if let Some(status) = self.status {
            incident.status = status;
        }
        if let Some(location) = self.location {
            incident.location = location;
        }
        if let Some(description) = self.description {
            incident.description = description;
        }
        incident.updated_at = now_millis();
    }
}
