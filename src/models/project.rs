use serde::Serialize;

use super::{AsRecord, iso8601};
use crate::entities::projects;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub technologies: Option<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub completed: bool,
    pub completion_date: Option<String>,
    pub created_at: String,
}

impl AsRecord for projects::Model {
    type Record = ProjectRecord;

    fn as_record(&self) -> ProjectRecord {
        ProjectRecord {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            technologies: self.technologies.clone(),
            github_url: self.github_url.clone(),
            live_url: self.live_url.clone(),
            image_url: self.image_url.clone(),
            featured: self.featured,
            completed: self.completed,
            completion_date: self.completion_date.as_ref().map(iso8601),
            created_at: iso8601(&self.created_at),
        }
    }
}

impl ProjectRecord {
    /// Individual technologies from the comma-separated tag string.
    #[must_use]
    pub fn technology_list(&self) -> Vec<&str> {
        self.technologies
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}
