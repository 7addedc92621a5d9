use anyhow::Context;
use sea_orm::Set;

use crate::config::Config;
use crate::db::Store;
use crate::db::repositories::user::hash_password;
use crate::entities::users;
use crate::forms::{Field, Rule};

use super::checked;

const USERNAME: Field = Field {
    name: "username",
    label: "Username",
    rules: &[Rule::REQUIRED, Rule::between(1, 80)],
};

const EMAIL: Field = Field {
    name: "email",
    label: "Email",
    rules: &[
        Rule::REQUIRED,
        Rule::email("Invalid email address"),
        Rule::at_most(120),
    ],
};

pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub admin: bool,
}

pub async fn cmd_add_user(config: &Config, new: NewUser) -> anyhow::Result<()> {
    let username = checked(&USERNAME, &new.username);
    let email = checked(&EMAIL, &new.email);
    let (username, email) = match (username, email) {
        (Ok(username), Ok(email)) => (username, email),
        (Err(message), _) | (_, Err(message)) => {
            println!("{message}");
            return Ok(());
        }
    };

    let store = Store::new(&config.database.url).await?;

    if store.users().get_by_username(&username).await?.is_some() {
        println!("User '{username}' already exists.");
        return Ok(());
    }

    let mut record = users::ActiveModel::new_user(username, email);
    record.first_name = Set(new.first_name);
    record.last_name = Set(new.last_name);
    record.is_admin = Set(new.admin);
    if let Some(password) = new.password.as_deref() {
        record.password_hash = Set(Some(hash_password(password).await?));
    }

    let user = store
        .session()
        .create(record)
        .await
        .context("Failed to create user")?;

    println!("✓ Created user '{}' (ID: {})", user.username, user.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_limit_counts_characters() {
        assert!(checked(&USERNAME, &"é".repeat(80)).is_ok());
        assert!(checked(&USERNAME, &"é".repeat(81)).is_err());
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(checked(&EMAIL, " ada@example.com "), Ok("ada@example.com".to_string()));
        assert_eq!(checked(&EMAIL, "nope").unwrap_err(), "Invalid email address");
        let long = format!("{}@example.com", "a".repeat(110));
        assert!(checked(&EMAIL, &long).is_err());
    }
}
