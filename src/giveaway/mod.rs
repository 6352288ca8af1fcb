use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lifecycle::{self, CreateError, CreateRequest};
use crate::render::GiveawayView;
use crate::store::Store;

mod test;

#[derive(Serialize, Deserialize, ToSchema)]
pub(super) enum GiveawayError {
    #[schema(example = "number of winners must be a positive integer")]
    Invalid(String),
    #[schema(example = "entry point already has an open giveaway (id 3)")]
    Conflict(String),
}

#[derive(Serialize, Deserialize, ToSchema)]
pub(super) struct CreateGiveawayPayload {
    #[schema(example = "Nitro Classic")]
    pub prize: String,
    #[schema(example = "Courtesy of the mods")]
    pub description: Option<String>,
    #[schema(example = 2)]
    pub winner_count: i64,
    #[schema(example = "5:30PM")]
    pub end_time: String,
    #[schema(example = "channel-1234")]
    pub entry_point: String,
    pub message_ref: Option<String>,
}

#[utoipa::path(
    post,
    path = "/giveaway",
    request_body = CreateGiveawayPayload,
    responses(
        (status = 201, description = "Giveaway opened and announced", body = GiveawayView),
        (status = 400, description = "Invalid prize, description, winner count or end time", body = GiveawayError),
        (status = 409, description = "Entry point already has an open giveaway", body = GiveawayError)
    )
)]
#[axum::debug_handler]
pub(super) async fn create_giveaway(
    State(store): State<Arc<Store>>,
    Json(payload): Json<CreateGiveawayPayload>,
) -> impl IntoResponse {
    let mut store = store.lock().await;
    let now = Utc::now().with_timezone(&store.tz);

    let request = CreateRequest {
        prize: payload.prize,
        description: payload.description,
        winner_count: payload.winner_count,
        end_time: payload.end_time,
        entry_point: payload.entry_point,
        message_ref: payload.message_ref,
    };

    match lifecycle::create_giveaway(&mut store, request, now) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error @ CreateError::AlreadyActive(_)) => (
            StatusCode::CONFLICT,
            Json(GiveawayError::Conflict(error.to_string())),
        )
            .into_response(),
        Err(error) => (
            StatusCode::BAD_REQUEST,
            Json(GiveawayError::Invalid(error.to_string())),
        )
            .into_response(),
    }
}
