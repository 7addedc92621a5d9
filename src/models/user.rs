use serde::Serialize;

use super::{AsRecord, iso8601};
use crate::entities::users;

/// Public view of a user. The password hash and admin flag stay out.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl AsRecord for users::Model {
    type Record = UserRecord;

    fn as_record(&self) -> UserRecord {
        UserRecord {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            is_active: self.is_active,
            created_at: iso8601(&self.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_user_record_hides_password_hash() {
        let now = Utc::now();
        let model = users::Model {
            id: 1,
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: Some("$argon2id$secret".to_string()),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            is_active: true,
            is_admin: true,
            created_at: now,
            updated_at: now,
        };

        let json = model.to_json().unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("is_admin"));
        assert!(json.contains("\"username\":\"testuser\""));
    }
}
