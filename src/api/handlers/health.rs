//! Liveness probe.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::api::AppState;

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
	HttpResponse::Ok().json(json!({
		"status": "OK",
		"timestamp": Utc::now().to_rfc3339(),
		"uptime": state.started_at.elapsed().as_secs_f64(),
		"stellar_horizon": state.config.horizon_url,
	}))
}
