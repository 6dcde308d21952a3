// src/routes/championship.rs
use actix_web::{get, web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::championship_handler;
use crate::services::RankingService;

/// List all championships
#[get("")]
pub async fn list_championships(
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    championship_handler::list_championships(service).await
}

/// Get championship standings
#[get("/{championship_id}/standings")]
pub async fn get_standings(
    path: web::Path<Uuid>,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    let championship_id = path.into_inner();
    championship_handler::get_standings(championship_id, service).await
}

/// Get favorite-team (Highlander) state
#[get("/{championship_id}/highlander")]
pub async fn get_highlander(
    path: web::Path<Uuid>,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    let championship_id = path.into_inner();
    championship_handler::get_highlander(championship_id, service).await
}

/// Get standings and Highlander together
#[get("/{championship_id}/leaderboard")]
pub async fn get_leaderboard(
    path: web::Path<Uuid>,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    let championship_id = path.into_inner();
    championship_handler::get_leaderboard(championship_id, service).await
}

/// Get one participant's scored predictions
#[get("/{championship_id}/users/{user_id}/scorecard")]
pub async fn get_scorecard(
    path: web::Path<(Uuid, Uuid)>,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    let (championship_id, user_id) = path.into_inner();
    championship_handler::get_scorecard(championship_id, user_id, service).await
}
