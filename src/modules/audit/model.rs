use serde::Serialize;
use uuid::Uuid;

/// A single audit trail entry.
///
/// `transaction_type` is the coarse bucket (e.g. `token`), `domain` the
/// subsystem, and `action` the specific event. `performed_by` is absent
/// for events with no authenticated actor, such as a failed grant.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub transaction_type: String,
    pub domain: String,
    pub action: String,
    pub performed_by: Option<Uuid>,
    pub related_id: Option<String>,
}

impl AuditEvent {
    pub fn token(action: &str, performed_by: Option<Uuid>, related_id: Option<String>) -> Self {
        Self {
            transaction_type: "token".to_string(),
            domain: "auth".to_string(),
            action: action.to_string(),
            performed_by,
            related_id,
        }
    }

    pub fn login(performed_by: Uuid) -> Self {
        Self {
            transaction_type: "session".to_string(),
            domain: "auth".to_string(),
            action: "login".to_string(),
            performed_by: Some(performed_by),
            related_id: None,
        }
    }
}
