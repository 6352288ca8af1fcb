use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{response::IntoResponse, routing, Json, Router, Server};
use chrono::FixedOffset;
use dotenv::dotenv;
use hyper::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::lifecycle::EntryOutcome;
use crate::registry::GiveawayRegistry;
use crate::render::{GiveawayView, LogRender, Outcome, ResolutionNotice};
use crate::store::{Store, StoreInternal};
use crate::types::GiveawayId;

use close::{CloseByEntryPointPayload, CloseError};
use enter::{EnterError, EnterPayload};
use giveaway::{CreateGiveawayPayload, GiveawayError};

mod close;
mod enter;
mod giveaway;

mod lifecycle;
mod registry;
mod render;
mod scanner;
mod select;
mod store;
mod timeparse;
mod types;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();

    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    #[derive(OpenApi)]
    #[openapi(
        paths(
            giveaway::create_giveaway,
            enter::enter_giveaway,
            close::close_giveaway,
            close::close_entry_point,
        ),
        components(
            schemas(GiveawayId, GiveawayView, Outcome, ResolutionNotice, EntryOutcome),
            schemas(GiveawayError, CreateGiveawayPayload),
            schemas(EnterError, EnterPayload),
            schemas(CloseError, CloseByEntryPointPayload),
        ),
        tags(
            (name = "giveaway", description = "Giveaway lifecycle API")
        )
    )]
    struct ApiDoc;

    let store = create_store();
    scanner::spawn(store.clone(), scan_period());

    let app = create_app(store)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"));

    let address = SocketAddr::from((Ipv4Addr::LOCALHOST, port()));
    info!(%address, "giveaway server listening");
    info!("API playgrounds: /swagger-ui /redoc /rapidoc");
    Server::bind(&address).serve(app.into_make_service()).await
}

pub fn create_app(store: Arc<Store>) -> Router {
    Router::new()
        .route("/health", routing::get(health))
        .route("/giveaway", routing::post(giveaway::create_giveaway))
        .route("/giveaway/:id/enter", routing::post(enter::enter_giveaway))
        .route("/giveaway/:id/close", routing::post(close::close_giveaway))
        .route("/close", routing::post(close::close_entry_point))
        .with_state(store)
}

/// Builds the in-memory store from the environment. `GIVEAWAY_UTC_OFFSET`
/// (default "+00:00") fixes the offset used to resolve and display giveaway
/// end times; every announcement names the offset in effect. Open giveaways
/// do not survive a restart.
pub fn create_store() -> Arc<Store> {
    let tz = match std::env::var("GIVEAWAY_UTC_OFFSET") {
        Ok(raw) => raw
            .parse::<FixedOffset>()
            .expect("GIVEAWAY_UTC_OFFSET must be an offset like \"+01:00\""),
        Err(_) => FixedOffset::east_opt(0).expect("zero offset is valid"),
    };
    info!(%tz, "resolving giveaway end times at fixed offset");

    Arc::new(Store::new(StoreInternal {
        registry: GiveawayRegistry::new(),
        tz,
        renderer: Box::new(LogRender),
    }))
}

fn scan_period() -> Duration {
    let seconds = std::env::var("GIVEAWAY_SCAN_INTERVAL_SECS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(60);
    Duration::from_secs(seconds)
}

fn port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(8080)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}
