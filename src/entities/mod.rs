pub mod prelude;

pub mod contact_messages;
pub mod projects;
pub mod users;
