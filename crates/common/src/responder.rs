//! Responder entity types.

use serde::{Deserialize, Serialize};

use crate::incident::Location;

/// Availability state of a responder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderStatus {
    #[default]
    Available,
    Assigned,
    Offline,
}

/// A unit capable of being dispatched to an incident.
///
/// `current_assignment` is non-null exactly when `status == Assigned`;
/// a responder holds at most one assignment at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Responder {
    /// Unique id, `RSP-NNN`.
    pub id: String,

    pub name: String,

    pub status: ResponderStatus,

    pub location: Location,

    /// Capability tags, e.g. `wellness`, `crisis_support`.
    pub specializations: Vec<String>,

    pub current_assignment: Option<String>,
}

impl Responder {
    pub fn new(id: String, name: impl Into<String>, location: Location) -> Self {
        Self {
            id,
            name: name.into(),
            status: ResponderStatus::Available,
            location,
            specializations: Vec::new(),
            current_assignment: None,
        }
    }

    pub fn with_specializations<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specializations = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Invariant: assigned iff an incident is bound.
    pub fn assignment_consistent(&self) -> bool {
        self.current_assignment.is_some() == (self.status == ResponderStatus::Assigned)
    }
}

/// Partial update for a responder. `None` fields are left untouched.
///
/// The registry applies this verbatim; callers changing `status` are
/// responsible for keeping `current_assignment` consistent with it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponderPatch {
    pub name: Option<String>,
    pub status: Option<ResponderStatus>,
    pub location: Option<Location>,
    pub specializations: Option<Vec<String>>,
}

impl ResponderPatch {
    pub fn apply(self, responder: &mut Responder) {
        if let Some(name) = self.name {
            responder.name = name;
        }
        if let Some(status) = self.status {
            responder.status = status;
        }
        if let Some(location) = self.location {
            responder.location = location;
        }
        if let Some(specializations) = self.specializations {
            responder.specializations = specializations;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_responder() -> Responder {
        Responder::new(
            "RSP-001".into(),
            "Unit Alpha",
            Location {
                lat: 34.0525,
                lng: -118.2440,
                address: None,
            },
        )
        .with_specializations(["wellness", "crisis_support"])
    }

    #[test]
    fn new_responder_is_available_and_unassigned() {
        let responder = sample_responder();
        assert_eq!(responder.status, ResponderStatus::Available);
        assert!(responder.current_assignment.is_none());
        assert!(responder.assignment_consistent());
    }

    #[test]
    fn serializes_with_original_field_names() {
        let responder = sample_responder();
        let json = serde_json::to_value(&responder).unwrap();

        assert_eq!(json["id"], "RSP-001");
        assert_eq!(json["status"], "available");
        assert_eq!(json["currentAssignment"], serde_json::Value::Null);
        assert_eq!(json["specializations"][0], "wellness");
    }

    #[test]
    fn patch_merges_selected_fields() {
        let mut responder = sample_responder();
        let patch = ResponderPatch {
            status: Some(ResponderStatus::Offline),
            ..Default::default()
        };
        patch.apply(&mut responder);

        assert_eq!(responder.status, ResponderStatus::Offline);
        assert_eq!(responder.name, "Unit Alpha");
    }

    #[test]
    fn status_tags_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&ResponderStatus::Available).unwrap(),
            "\"available\""
        );
        assert_eq!(
            serde_json::to_string(&ResponderStatus::Offline).unwrap(),
            "\"offline\""
        );
    }
}
