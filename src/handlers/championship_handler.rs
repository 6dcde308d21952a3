use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::models::common::ApiResponse;
use crate::services::{RankingService, ServiceError};

fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(message, data))
}

/// Translate a service failure into the JSON error envelope
fn error_response(error: &ServiceError) -> HttpResponse {
    match error {
        ServiceError::ChampionshipNotFound(_) | ServiceError::ParticipantNotFound { .. } => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error(error.to_string()))
        }
        ServiceError::Ranking(e) => {
            tracing::warn!("Ranking could not be computed: {}", e);
            HttpResponse::UnprocessableEntity().json(ApiResponse::<()>::error_with_message(
                "Championship data is inconsistent",
                e.to_string(),
            ))
        }
        ServiceError::Source(e) => {
            tracing::error!("Failed to read championship data: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Database error"))
        }
    }
}

/// List all championships
pub async fn list_championships(service: web::Data<RankingService>) -> Result<HttpResponse> {
    match service.list_championships().await {
        Ok(championships) => Ok(ok("Championships retrieved", championships)),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Get the points table of a championship
#[tracing::instrument(name = "Get championship standings", skip(service))]
pub async fn get_standings(
    championship_id: Uuid,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    match service.get_standings(championship_id).await {
        Ok(standings) => Ok(ok("Standings retrieved", standings)),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Get the favorite-team competition state
#[tracing::instrument(name = "Get championship highlander", skip(service))]
pub async fn get_highlander(
    championship_id: Uuid,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    match service.get_highlander(championship_id).await {
        Ok(highlander) => Ok(ok("Highlander retrieved", highlander)),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Get standings and Highlander in one payload
#[tracing::instrument(name = "Get championship leaderboard", skip(service))]
pub async fn get_leaderboard(
    championship_id: Uuid,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    match service.get_leaderboard(championship_id).await {
        Ok(leaderboard) => Ok(ok("Leaderboard retrieved", leaderboard)),
        Err(e) => Ok(error_response(&e)),
    }
}

/// Get the per-prediction breakdown of one participant
#[tracing::instrument(name = "Get participant scorecard", skip(service))]
pub async fn get_scorecard(
    championship_id: Uuid,
    user_id: Uuid,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    match service.get_scorecard(championship_id, user_id).await {
        Ok(scorecard) => Ok(ok("Scorecard retrieved", scorecard)),
        Err(e) => Ok(error_response(&e)),
    }
}
