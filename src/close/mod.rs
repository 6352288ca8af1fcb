use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lifecycle;
use crate::render::ResolutionNotice;
use crate::store::Store;
use crate::types::GiveawayId;

mod test;

#[derive(Serialize, Deserialize, ToSchema)]
pub(super) enum CloseError {
    #[schema(example = "No active giveaway found")]
    NotFound(String),
}

#[derive(Serialize, Deserialize, ToSchema)]
pub(super) struct CloseByEntryPointPayload {
    #[schema(example = "channel-1234")]
    pub entry_point: String,
}

#[utoipa::path(
    post,
    path = "/giveaway/{id}/close",
    params(("id" = u64, Path, description = "Giveaway id")),
    responses(
        (status = 200, description = "Giveaway resolved", body = ResolutionNotice),
        (status = 404, description = "Giveaway unknown or already resolved", body = CloseError)
    )
)]
#[axum::debug_handler]
pub(super) async fn close_giveaway(
    Path(id): Path<u64>,
    State(store): State<Arc<Store>>,
) -> impl IntoResponse {
    let mut store = store.lock().await;

    match lifecycle::resolve_giveaway(&mut store, GiveawayId(id)) {
        Some(notice) => (StatusCode::OK, Json(notice)).into_response(),
        None => not_found(),
    }
}

#[utoipa::path(
    post,
    path = "/close",
    request_body = CloseByEntryPointPayload,
    responses(
        (status = 200, description = "Oldest open giveaway at the entry point resolved", body = ResolutionNotice),
        (status = 404, description = "No open giveaway at that entry point", body = CloseError)
    )
)]
#[axum::debug_handler]
pub(super) async fn close_entry_point(
    State(store): State<Arc<Store>>,
    Json(payload): Json<CloseByEntryPointPayload>,
) -> impl IntoResponse {
    let mut store = store.lock().await;

    match lifecycle::resolve_entry_point(&mut store, &payload.entry_point) {
        Some(notice) => (StatusCode::OK, Json(notice)).into_response(),
        None => not_found(),
    }
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(CloseError::NotFound("No active giveaway found".to_string())),
    )
        .into_response()
}
