use anyhow::Context;
use chrono::Utc;
use sea_orm::{EntityTrait, QueryOrder, Set};

use crate::config::Config;
use crate::db::Store;
use crate::entities::projects;
use crate::forms::{Field, Rule};

use super::checked;

const TITLE: Field = Field {
    name: "title",
    label: "Title",
    rules: &[Rule::REQUIRED, Rule::between(1, 200)],
};

pub struct NewProject {
    pub owner: String,
    pub title: String,
    pub description: Option<String>,
    pub technologies: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub completed: bool,
}

pub async fn cmd_add_project(config: &Config, new: NewProject) -> anyhow::Result<()> {
    let title = match checked(&TITLE, &new.title) {
        Ok(title) => title,
        Err(message) => {
            println!("{message}");
            return Ok(());
        }
    };

    let store = Store::new(&config.database.url).await?;

    let Some(owner) = store.users().get_by_username(&new.owner).await? else {
        println!("User '{}' not found. Create it with 'folio add-user'.", new.owner);
        return Ok(());
    };

    let mut record = projects::ActiveModel::new_project(owner.id, title);
    record.description = Set(new.description);
    record.technologies = Set(new.technologies);
    record.github_url = Set(new.github_url);
    record.live_url = Set(new.live_url);
    record.image_url = Set(new.image_url);
    record.featured = Set(new.featured);
    record.completed = Set(new.completed);
    if new.completed {
        record.completion_date = Set(Some(Utc::now()));
    }

    let project = store
        .session()
        .create(record)
        .await
        .context("Failed to create project")?;

    println!("✓ Added project '{}' (ID: {})", project.title, project.id);
    Ok(())
}

pub async fn cmd_list_projects(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.database.url).await?;

    let all = projects::Entity::find()
        .order_by_desc(projects::Column::CreatedAt)
        .all(&store.conn)
        .await
        .context("Failed to list projects")?;

    if all.is_empty() {
        println!("No projects yet. Add one with 'folio add-project'.");
        return Ok(());
    }

    println!("{:<5} {:<40} {:<10} {:<10}", "ID", "Title", "Featured", "Completed");
    println!("{:-<68}", "");
    for project in &all {
        let title: String = project.title.chars().take(38).collect();
        println!(
            "{:<5} {:<40} {:<10} {:<10}",
            project.id,
            title,
            if project.featured { "yes" } else { "no" },
            if project.completed { "yes" } else { "no" },
        );
    }
    println!();
    println!("Total: {} projects", all.len());
    Ok(())
}
