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

    #[tokio::test]
    async fn create_giveaway_announces_and_registers() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/giveaway",
                serde_json::json!({
                    "prize": "Nitro Classic",
                    "description": "Courtesy of the mods",
                    "winner_count": 2,
                    "end_time": "5:30PM",
                    "entry_point": "channel-1",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(body["id"], 1);
        assert_eq!(body["prize"], "Nitro Classic");
        assert_eq!(body["winner_count"], 2);
        assert_eq!(body["participant_count"], 0);
        assert!(body["ends_at"]
            .as_str()
            .unwrap()
            .contains("05:30 PM (UTC+00:00)"));
    }

    #[tokio::test]
    async fn create_rejects_a_zero_winner_count() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/giveaway",
                serde_json::json!({
                    "prize": "Nitro Classic",
                    "winner_count": 0,
                    "end_time": "5:30PM",
                    "entry_point": "channel-1",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Nothing was registered, so there is nothing to close.
        let close_response = app
            .clone()
            .oneshot(post_json(
                "/close",
                serde_json::json!({ "entry_point": "channel-1" }),
            ))
            .await
            .unwrap();

        assert_eq!(close_response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_rejects_a_bad_end_time() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/giveaway",
                serde_json::json!({
                    "prize": "Nitro Classic",
                    "winner_count": 1,
                    "end_time": "5:75PM",
                    "entry_point": "channel-1",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["Invalid"].as_str().unwrap().contains("invalid end time"));
    }

    #[tokio::test]
    async fn create_conflicts_while_the_entry_point_is_busy() {
        let app = test_app();

        let payload = serde_json::json!({
            "prize": "Nitro Classic",
            "winner_count": 1,
            "end_time": "5:30PM",
            "entry_point": "channel-1",
        });

        let first = app
            .clone()
            .oneshot(post_json("/giveaway", payload.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .clone()
            .oneshot(post_json("/giveaway", payload))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }
}
