//! Project directory listing.
//!
//! Lists directories under the configured projects root. By default only
//! directories containing an `index.html` count as published; `all=true`
//! lists every directory. A missing root is reported with a warning rather
//! than an error.

use std::fs;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::api::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
	pub all: Option<String>,
}

pub async fn list(
	state: web::Data<AppState>,
	query: web::Query<ProjectsQuery>,
) -> Result<HttpResponse, ApiError> {
	let include_all = query.all.as_deref() == Some("true");
	let root = &state.config.projects_root;

	let (projects, warning) = match list_projects(root, include_all) {
		Ok(projects) => (projects, None),
		Err(e) => {
			warn!(root = %root, error = %e, "Projects root not readable");
			(
				Vec::new(),
				Some(format!("Projects directory not found: {}", root)),
			)
		}
	};

	Ok(HttpResponse::Ok().json(json!({
		"projects": projects,
		"warning": warning,
	})))
}

fn list_projects(root: &str, include_all: bool) -> std::io::Result<Vec<String>> {
	let mut projects = Vec::new();
	for entry in fs::read_dir(root)? {
		let entry = entry?;
		if !entry.file_type()?.is_dir() {
			continue;
		}
		if !include_all && !entry.path().join("index.html").is_file() {
			continue;
		}
		projects.push(entry.file_name().to_string_lossy().into_owned());
	}
	projects.sort();
	Ok(projects)
}
