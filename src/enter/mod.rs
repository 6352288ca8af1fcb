use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lifecycle::{self, EntryOutcome};
use crate::store::Store;
use crate::types::GiveawayId;


#[derive(Serialize, Deserialize, ToSchema)]
pub(super) enum EnterError {
    #[schema(example = "This giveaway is no longer active")]
    NotFound(String),
}

#[derive(Serialize, Deserialize, ToSchema)]
pub(super) struct EnterPayload {
    #[schema(example = "user-42")]
    pub participant_id: String,
}

#[utoipa::path(
    post,
    path = "/giveaway/{id}/enter",
    request_body = EnterPayload,
    params(("id" = u64, Path, description = "Giveaway id")),
    responses(
        (status = 200, description = "Joined, or already a participant", body = EntryOutcome),
        (status = 404, description = "Giveaway unknown or already resolved", body = EnterError)
    )
)]
#[axum::debug_handler]
pub(super) async fn enter_giveaway(
    Path(id): Path<u64>,
    State(store): State<Arc<Store>>,
    Json(payload): Json<EnterPayload>,
) -> impl IntoResponse {
    let mut store = store.lock().await;

    match lifecycle::enter_giveaway(&mut store, GiveawayId(id), &payload.participant_id) {
        Some(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(EnterError::NotFound(
                "This giveaway is no longer active".to_string(),
            )),
        )
            .into_response(),
    }
}
