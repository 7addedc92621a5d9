use serde::Serialize;

use super::{AsRecord, iso8601};
use crate::entities::contact_messages;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactMessageRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl AsRecord for contact_messages::Model {
    type Record = ContactMessageRecord;

    fn as_record(&self) -> ContactMessageRecord {
        ContactMessageRecord {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
            read: self.read,
            created_at: iso8601(&self.created_at),
            updated_at: iso8601(&self.updated_at),
        }
    }
}
