use axum::{extract::State, response::Html};
use std::fmt::Write;
use std::sync::Arc;

use super::{PageError, layout};
use crate::models::AsRecord;
use crate::models::project::ProjectRecord;
use crate::state::AppState;

pub const SKILLS: [&str; 10] = [
    "Python",
    "Flask",
    "Django",
    "JavaScript",
    "React",
    "PostgreSQL",
    "Docker",
    "AWS",
    "REST APIs",
    "Git",
];

pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const SERVICES: [Service; 4] = [
    Service {
        title: "Python Development",
        description: "Custom Python applications, automation scripts, and backend systems.",
        icon: "fab fa-python",
    },
    Service {
        title: "Web Applications",
        description: "Full-stack web development using Flask and Django.",
        icon: "fas fa-globe",
    },
    Service {
        title: "Database Design",
        description: "Efficient database architecture and optimization.",
        icon: "fas fa-database",
    },
    Service {
        title: "API Development",
        description: "RESTful API design and implementation.",
        icon: "fas fa-plug",
    },
];

pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let featured = state.store().projects().list_featured().await?;
    let records: Vec<ProjectRecord> = featured.iter().map(AsRecord::as_record).collect();

    let mut body = String::from(
        "<section class=\"hero\"><h1>Welcome</h1>\
         <p>Developer building reliable web applications.</p>\
         <a href=\"/contact\">Get in touch</a></section>\n\
         <section><h2>Featured Projects</h2>\n",
    );
    body.push_str(&project_list(&records, "No featured projects yet."));
    body.push_str("</section>");

    Ok(Html(layout::page("Home", None, &body)))
}

pub async fn about() -> Html<String> {
    let mut body = String::from("<h1>About Me</h1>\n<h2>Skills</h2>\n<ul class=\"skills\">\n");
    for skill in SKILLS {
        let _ = writeln!(body, "<li>{skill}</li>");
    }
    body.push_str("</ul>");
    Html(layout::page("About", None, &body))
}

pub async fn services() -> Html<String> {
    let mut body = String::from("<h1>Services</h1>\n<div class=\"services\">\n");
    for service in &SERVICES {
        let _ = writeln!(
            body,
            "<article class=\"service\"><i class=\"{}\"></i><h3>{}</h3><p>{}</p></article>",
            service.icon, service.title, service.description
        );
    }
    body.push_str("</div>");
    Html(layout::page("Services", None, &body))
}

pub async fn projects(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let completed = state.store().projects().list_completed().await?;
    let records: Vec<ProjectRecord> = completed.iter().map(AsRecord::as_record).collect();

    let mut body = String::from("<h1>Projects</h1>\n");
    body.push_str(&project_list(&records, "No projects to show yet."));
    Ok(Html(layout::page("Projects", None, &body)))
}

fn project_list(records: &[ProjectRecord], empty: &str) -> String {
    if records.is_empty() {
        return format!("<p class=\"empty\">{empty}</p>\n");
    }

    let mut html = String::from("<div class=\"projects\">\n");
    for record in records {
        project_card(&mut html, record);
    }
    html.push_str("</div>\n");
    html
}

fn project_card(html: &mut String, project: &ProjectRecord) {
    let _ = write!(html, "<article class=\"project\">");
    if let Some(image) = &project.image_url {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"{}\">",
            layout::attr(image),
            layout::attr(&project.title)
        );
    }
    let _ = write!(html, "<h3>{}</h3>", layout::text(&project.title));
    if let Some(description) = &project.description {
        let _ = write!(html, "<p>{}</p>", layout::text(description));
    }

    let technologies = project.technology_list();
    if !technologies.is_empty() {
        html.push_str("<ul class=\"tech\">");
        for tech in technologies {
            let _ = write!(html, "<li>{}</li>", layout::text(tech));
        }
        html.push_str("</ul>");
    }

    for (url, label) in [(&project.github_url, "Code"), (&project.live_url, "Live")] {
        if let Some(url) = url {
            let _ = write!(html, "<a href=\"{}\">{label}</a> ", layout::attr(url));
        }
    }
    html.push_str("</article>\n");
}
