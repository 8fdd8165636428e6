use std::fmt;

use serde::{Deserialize, Serialize};

/// Staff role. Determines which write paths a user may take.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserRole {
    Pastor,
    #[serde(rename = "Líder")]
    Leader,
    #[serde(rename = "Usuário")]
    Volunteer,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Pastor => "Pastor",
            UserRole::Leader => "Líder",
            UserRole::Volunteer => "Usuário",
        }
    }

    /// Stage moves, urgency, archive/unarchive, detail edits and deletion.
    pub fn can_manage_people(&self) -> bool {
        matches!(self, UserRole::Pastor | UserRole::Leader)
    }

    /// Volunteers may only leave notes.
    pub fn can_log_touchpoints(&self) -> bool {
        self.can_manage_people()
    }

    pub fn can_view_confidential(&self) -> bool {
        matches!(self, UserRole::Pastor)
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, UserRole::Pastor)
    }

    /// Leaders and volunteers are the ones people get assigned to.
    pub fn takes_responsibility(&self) -> bool {
        matches!(self, UserRole::Leader | UserRole::Volunteer)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUserData {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volunteer_is_read_only_for_people() {
        assert!(!UserRole::Volunteer.can_manage_people());
        assert!(!UserRole::Volunteer.can_log_touchpoints());
        assert!(UserRole::Leader.can_manage_people());
        assert!(UserRole::Pastor.can_manage_people());
    }

    #[test]
    fn test_only_pastor_sees_confidential_notes() {
        assert!(UserRole::Pastor.can_view_confidential());
        assert!(!UserRole::Leader.can_view_confidential());
        assert!(!UserRole::Volunteer.can_view_confidential());
    }

    #[test]
    fn test_role_wire_labels() {
        assert_eq!(serde_json::to_string(&UserRole::Leader).unwrap(), "\"Líder\"");
        let role: UserRole = serde_json::from_str("\"Usuário\"").unwrap();
        assert_eq!(role, UserRole::Volunteer);
    }
}
