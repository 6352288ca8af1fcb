#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{self, Method, Request, StatusCode},
        Router,
    };
    use chrono::FixedOffset;
    use tower::ServiceExt;

    use crate::create_app;
    use crate::registry::GiveawayRegistry;
    use crate::render::LogRender;
    use crate::store::{Store, StoreInternal};

    fn test_app() -> Router {
        let store = Arc::new(Store::new(StoreInternal {
            registry: GiveawayRegistry::new(),
            tz: FixedOffset::east_opt(0).unwrap(),
            renderer: Box::new(LogRender),
        }));
        create_app(store)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method(Method::POST)
            .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn create_giveaway(app: &Router, winner_count: u64) -> u64 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/giveaway",
                serde_json::json!({
                    "prize": "Nitro Classic",
                    "winner_count": winner_count,
                    "end_time": "5:30PM",
                    "entry_point": "channel-1",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        body["id"].as_u64().unwrap()
    }

    async fn enter(app: &Router, id: u64, participant: &str) {
        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/giveaway/{id}/enter"),
                serde_json::json!({ "participant_id": participant }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn closing_draws_capped_winners_from_the_roster() {
        let app = test_app();
        let id = create_giveaway(&app, 5).await;
        for participant in ["A", "B", "C"] {
            enter(&app, id, participant).await;
        }

        let response = app
            .clone()
            .oneshot(post_json(&format!("/giveaway/{id}/close"), serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(body["total_participants"], 3);
        let winners = body["outcome"]["Winners"].as_array().unwrap();
        assert_eq!(winners.len(), 3);
        let mut names: Vec<&str> = winners.iter().map(|w| w.as_str().unwrap()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names, vec!["A", "B", "C"]);

        // The scanner/manual race: a second close observes not found.
        let response = app
            .clone()
            .oneshot(post_json(&format!("/giveaway/{id}/close"), serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn closing_an_empty_giveaway_reports_no_participants() {
        let app = test_app();
        let id = create_giveaway(&app, 1).await;

        let response = app
            .clone()
            .oneshot(post_json(&format!("/giveaway/{id}/close"), serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["outcome"], "NoParticipants");
        assert_eq!(body["prize"], "Nitro Classic");
    }

    #[tokio::test]
    async fn closing_by_entry_point_resolves_the_open_giveaway() {
        let app = test_app();
        let id = create_giveaway(&app, 1).await;
        enter(&app, id, "user-1").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/close",
                serde_json::json!({ "entry_point": "channel-1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["id"].as_u64().unwrap(), id);

        let response = app
            .clone()
            .oneshot(post_json(
                "/close",
                serde_json::json!({ "entry_point": "channel-1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
