//! Role selection at startup.
//!
//! The chosen role is trusted: there is no credential check. A professional
//! login only has to name a professional that exists.

use serde::{Deserialize, Serialize};

use crate::db::{self, CollectionBackend, DatabaseError};
use crate::models::enums::UserRole;
use crate::models::Professional;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedInUser {
    pub role: UserRole,
    pub professional: Option<Professional>,
}

impl LoggedInUser {
    /// The professional whose patients and agenda this user manages.
    pub fn professional_id(&self) -> Option<&str> {
        self.professional.as_ref().map(|p| p.id.as_str())
    }
}

pub fn login(
    backend: &dyn CollectionBackend,
    role: UserRole,
    professional_id: Option<&str>,
) -> Result<LoggedInUser, DatabaseError> {
    let user = match role {
        UserRole::Admin => LoggedInUser { role, professional: None },
        UserRole::Professional => {
            let id = professional_id.unwrap_or_default();
            let professional = db::get_professional(backend, id)?.ok_or_else(|| DatabaseError::NotFound {
                entity_type: "professional".into(),
                id: id.to_string(),
            })?;
            LoggedInUser { role, professional: Some(professional) }
        }
    };
    tracing::info!(role = %user.role, professional_id = ?user.professional_id(), "Logged in");
    Ok(user)
}
