use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware, security_headers_middleware};
use super::state::AppState;
use super::teams;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/rename", put(teams::rename_team_by_body))
        .route(
            "/teams/{team_id}",
            get(teams::view_team).delete(teams::delete_team),
        )
        .route("/teams/{team_id}/name", put(teams::rename_team))
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::auth::{JwtConfig, JwtService};

    struct TestApp {
        router: Router,
        jwt: Arc<JwtService>,
        cookie_name: String,
    }

    impl TestApp {
        fn new() -> Self {
            Self::with_cookie("jwt")
        }

        fn with_cookie(cookie_name: &str) -> Self {
            let jwt = Arc::new(JwtService::new(JwtConfig::new("router-test-secret", 1)));
            let state = crate::create_in_memory_app_state(jwt.clone(), cookie_name);

            Self {
                router: create_router_with_state(state),
                jwt,
                cookie_name: cookie_name.to_string(),
            }
        }

        fn cookie(&self, admin: &str) -> String {
            format!("{}={}", self.cookie_name, self.jwt.generate(admin).unwrap())
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            cookie: Option<&str>,
            body: Option<Value>,
        ) -> Response {
            let mut builder = Request::builder().method(method).uri(uri);

            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }

            let body = match body {
                Some(value) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(value.to_string())
                }
                None => Body::empty(),
            };

            self.router
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap()
        }

        async fn create(&self, admin: &str, name: &str) -> Value {
            let response = self
                .send(
                    Method::POST,
                    "/teams",
                    Some(&self.cookie(admin)),
                    Some(json!({ "name": name })),
                )
                .await;
            assert_eq!(response.status(), StatusCode::OK);
            body_json(response).await
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = TestApp::new();

        let health = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(body_json(health).await["status"], "healthy");

        let live = app.send(Method::GET, "/live", None, None).await;
        assert_eq!(live.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_team() {
        let app = TestApp::new();

        let team = app.create("alice", "Alpha").await;

        assert_eq!(team["name"], "Alpha");
        assert!(!team["id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_team_without_cookie() {
        let app = TestApp::new();

        let response = app
            .send(Method::POST, "/teams", None, Some(json!({ "name": "Alpha" })))
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Invalid or missing JWT token.");
        assert_eq!(body["error"]["type"], "authentication_error");
    }

    #[tokio::test]
    async fn test_create_team_invalid_name() {
        let app = TestApp::new();

        let response = app
            .send(
                Method::POST,
                "/teams",
                Some(&app.cookie("alice")),
                Some(json!({ "name": "ab" })),
            )
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Invalid team name. It must be between 3 and 30 characters."
        );
    }

    #[tokio::test]
    async fn test_create_team_malformed_body() {
        let app = TestApp::new();

        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/teams")
                    .header(header::COOKIE, app.cookie("alice"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{oops"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "json_parse_error"
        );
    }

    #[tokio::test]
    async fn test_create_team_with_taken_id() {
        let app = TestApp::new();
        let alice = app.cookie("alice");
        let bob = app.cookie("bob");

        let response = app
            .send(
                Method::POST,
                "/teams",
                Some(&alice),
                Some(json!({ "id": "alpha-squad", "name": "Alpha" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .send(
                Method::POST,
                "/teams",
                Some(&bob),
                Some(json!({ "id": "alpha-squad", "name": "Bravo" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "A team with this ID already exists."
        );

        let view = app
            .send(Method::GET, "/teams/alpha-squad", Some(&bob), None)
            .await;
        assert_eq!(body_json(view).await["team"]["name"], "Alpha");

        let listing = app.send(Method::GET, "/teams", Some(&bob), None).await;
        assert_eq!(listing.status(), StatusCode::NO_CONTENT);

        let delete = app
            .send(Method::DELETE, "/teams/alpha-squad", Some(&bob), None)
            .await;
        assert_eq!(delete.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_list_teams() {
        let app = TestApp::new();
        app.create("alice", "Alpha").await;
        app.create("alice", "Bravo").await;
        app.create("bob", "Charlie").await;

        let response = app
            .send(Method::GET, "/teams", Some(&app.cookie("alice")), None)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["teams"][0]["admin_id"], "alice");
        assert_eq!(body["teams"][0]["role"], "Owner");
        assert_eq!(body["teams"][0]["active"], true);
    }

    #[tokio::test]
    async fn test_list_teams_empty() {
        let app = TestApp::new();

        let response = app
            .send(Method::GET, "/teams", Some(&app.cookie("dave")), None)
            .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_list_teams_bad_token() {
        let app = TestApp::new();

        let response = app
            .send(Method::GET, "/teams", Some("jwt=garbage"), None)
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Invalid or expired token."
        );
    }

    #[tokio::test]
    async fn test_rename_team_routes() {
        let app = TestApp::new();
        let team = app.create("alice", "Alpha").await;
        let id = team["id"].as_str().unwrap();
        let cookie = app.cookie("alice");

        let response = app
            .send(
                Method::PUT,
                &format!("/teams/{}/name", id),
                Some(&cookie),
                Some(json!({ "new_name": "Bravo" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Bravo");

        let response = app
            .send(
                Method::PUT,
                "/teams/rename",
                Some(&cookie),
                Some(json!({ "team_id": id, "new_name": "Charlie" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Charlie");
    }

    #[tokio::test]
    async fn test_rename_team_forbidden() {
        let app = TestApp::new();
        let team = app.create("alice", "Alpha").await;
        let id = team["id"].as_str().unwrap();

        let response = app
            .send(
                Method::PUT,
                &format!("/teams/{}/name", id),
                Some(&app.cookie("bob")),
                Some(json!({ "new_name": "Bravo" })),
            )
            .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "You do not have permission to modify this team."
        );
    }

    #[tokio::test]
    async fn test_view_team() {
        let app = TestApp::new();
        let team = app.create("alice", "Alpha").await;
        let id = team["id"].as_str().unwrap();

        let response = app
            .send(Method::GET, &format!("/teams/{}", id), Some(&app.cookie("bob")), None)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["view"], "team_detail");
        assert_eq!(body["team"]["name"], "Alpha");
    }

    #[tokio::test]
    async fn test_view_team_without_cookie_redirects_to_login() {
        let app = TestApp::new();
        let team = app.create("alice", "Alpha").await;
        let id = team["id"].as_str().unwrap();

        let response = app
            .send(Method::GET, &format!("/teams/{}", id), None, None)
            .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_view_missing_team() {
        let app = TestApp::new();

        let response = app
            .send(Method::GET, "/teams/ghost", Some(&app.cookie("alice")), None)
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["view"], "error");
        assert_eq!(body["message"], "The team with ID ghost was not found.");
    }

    #[tokio::test]
    async fn test_custom_cookie_name() {
        let app = TestApp::with_cookie("session");
        let token = app.jwt.generate("alice").unwrap();
        assert!(app.cookie("alice").starts_with("session="));

        let team = app.create("alice", "Alpha").await;
        assert_eq!(team["name"], "Alpha");

        let response = app
            .send(
                Method::POST,
                "/teams",
                Some(&format!("jwt={}", token)),
                Some(json!({ "name": "Bravo" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_and_delete_scenario() {
        let app = TestApp::new();
        let alice = app.cookie("alice");
        let bob = app.cookie("bob");

        let team = app.create("alice", "Alpha").await;
        assert_eq!(team["name"], "Alpha");
        let id = team["id"].as_str().unwrap();

        let duplicate = app
            .send(Method::POST, "/teams", Some(&alice), Some(json!({ "name": "Alpha" })))
            .await;
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(duplicate).await["error"]["message"],
            "A team with this name already exists."
        );

        let by_bob = app
            .send(Method::DELETE, &format!("/teams/{}", id), Some(&bob), None)
            .await;
        assert_eq!(by_bob.status(), StatusCode::FORBIDDEN);

        let by_alice = app
            .send(Method::DELETE, &format!("/teams/{}", id), Some(&alice), None)
            .await;
        assert_eq!(by_alice.status(), StatusCode::NO_CONTENT);

        let view = app
            .send(Method::GET, &format!("/teams/{}", id), Some(&alice), None)
            .await;
        assert_eq!(view.status(), StatusCode::NOT_FOUND);

        let listing = app.send(Method::GET, "/teams", Some(&alice), None).await;
        assert_eq!(listing.status(), StatusCode::NO_CONTENT);

        let again = app
            .send(Method::DELETE, &format!("/teams/{}", id), Some(&alice), None)
            .await;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }
}
