pub use super::contact_messages::Entity as ContactMessages;
pub use super::projects::Entity as Projects;
pub use super::users::Entity as Users;
