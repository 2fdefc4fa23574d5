//! Router assembly.
//!
//! Public routes serve rates, prices, posts and contact links. Admin routes
//! sit behind [`require_admin`]. When a static directory is configured, the
//! built single-page app is served for every other path.

use std::path::Path;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, put},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{handlers, middleware::auth::require_admin, state::AppState};

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/posts",
            get(handlers::posts::list_all_posts).post(handlers::posts::create_post),
        )
        .route(
            "/api/v1/admin/posts/{id}",
            patch(handlers::posts::update_post).delete(handlers::posts::delete_post),
        )
        .route("/api/v1/admin/prices", put(handlers::prices::update_prices))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), require_admin));

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/rates", get(handlers::rates::get_live_rates))
        .route(
            "/api/v1/exchange-rates",
            get(handlers::prices::list_exchange_rates),
        )
        .route("/api/v1/gold-prices", get(handlers::prices::list_gold_prices))
        .route("/api/v1/posts", get(handlers::posts::list_published_posts))
        .route("/api/v1/social", get(handlers::social::get_social_links))
        .merge(admin_routes);

    if let Some(dir) = &state.config.static_dir {
        // Unknown paths get index.html so client-side routes resolve
        let index = Path::new(dir).join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        middleware::auth::hash_token,
        services::rate_fetcher::{RateFetcher, RateSource},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::AUTHORIZATION},
        response::Response,
    };
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;

    /// Address nothing listens on.
    async fn closed_addr() -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr
    }

    fn config(static_dir: Option<String>) -> Config {
        Config {
            database_url: "postgres://postgres@127.0.0.1:1/mmk".into(),
            server_port: 0,
            cbm_api_url: "http://127.0.0.1:1/api/latest".into(),
            hellolinker_url: "http://127.0.0.1:1/".into(),
            fetch_timeout_secs: 1,
            fetch_user_agent: "mmk-today-test".into(),
            static_dir,
            facebook_url: "https://facebook.example/mmk".into(),
            telegram_url: "https://t.me/mmktoday".into(),
            youtube_url: "https://youtube.example/mmk".into(),
            tiktok_url: "https://tiktok.example/mmk".into(),
        }
    }

    async fn app(static_dir: Option<String>) -> Router {
        let db_addr = closed_addr().await;
        let source_addr = closed_addr().await;

        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(300))
            .connect_lazy(&format!("postgres://postgres@{db_addr}/mmk"))
            .unwrap();
        let fetcher = RateFetcher::new(
            vec![
                RateSource::CbmApi(format!("http://{source_addr}/api/latest")),
                RateSource::HelloLinker(format!("http://{source_addr}/")),
            ],
            Duration::from_secs(1),
            "mmk-today-test",
        )
        .unwrap();

        build_router(AppState {
            pool,
            fetcher,
            config: Arc::new(config(static_dir)),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> Response {
        app.oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn live_rates_fall_back_to_sixteen_defaults() {
        let response = send(app(None).await, get("/api/rates")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let rates = body.as_array().unwrap();
        assert_eq!(rates.len(), 16);
        for rate in rates {
            assert!(rate["currency"].is_string());
            assert!(rate["buy"].is_string());
            assert!(rate["sell"].is_string());
        }
        assert_eq!(rates[15]["currency"], "MOP");
    }

    #[tokio::test]
    async fn admin_routes_require_a_token() {
        let requests = [
            get("/api/v1/admin/posts"),
            Request::builder()
                .method("POST")
                .uri("/api/v1/admin/posts")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"title":"t","content":"c"}"#))
                .unwrap(),
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/admin/posts/550e8400-e29b-41d4-a716-446655440000")
                .body(Body::empty())
                .unwrap(),
            Request::builder()
                .method("PUT")
                .uri("/api/v1/admin/prices")
                .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        ];

        for request in requests {
            let response = send(app(None).await, request).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "unauthorized");
        }
    }

    #[tokio::test]
    async fn social_links_come_from_config() {
        let response = send(app(None).await, get("/api/v1/social")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["telegram"], "https://t.me/mmktoday");
        assert_eq!(body["facebook"], "https://facebook.example/mmk");
    }

    #[tokio::test]
    async fn health_reports_database_outage() {
        let response = send(app(None).await, get("/health")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "internal_error");
    }

    #[tokio::test]
    async fn unknown_paths_serve_the_single_page_app() {
        let dir = std::env::temp_dir().join(format!("mmk-today-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<div id=\"root\">mmk-today</div>").unwrap();

        let app = app(Some(dir.to_string_lossy().into_owned())).await;
        let response = send(app, get("/gold-prices")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("mmk-today"));

        std::fs::remove_dir_all(&dir).ok();
    }

    fn router_with(pool: sqlx::PgPool) -> Router {
        let fetcher = RateFetcher::new(
            vec![RateSource::CbmApi("http://127.0.0.1:1/api/latest".into())],
            Duration::from_secs(1),
            "mmk-today-test",
        )
        .unwrap();

        build_router(AppState {
            pool,
            fetcher,
            config: Arc::new(config(None)),
        })
    }

    async fn issue_key(pool: &sqlx::PgPool, token: &str, is_admin: bool) {
        sqlx::query("INSERT INTO api_keys (key_hash, display_name, is_admin) VALUES ($1, $2, $3)")
            .bind(hash_token(token))
            .bind(token)
            .bind(is_admin)
            .execute(pool)
            .await
            .unwrap();
    }

    fn admin_request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, "Bearer admin-token");
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn admin_gate_separates_unknown_viewer_and_admin(pool: sqlx::PgPool) {
        issue_key(&pool, "viewer-token", false).await;
        issue_key(&pool, "admin-token", true).await;
        let router = router_with(pool);

        for (token, expected) in [
            ("unknown-token", StatusCode::UNAUTHORIZED),
            ("viewer-token", StatusCode::FORBIDDEN),
            ("admin-token", StatusCode::OK),
        ] {
            let request = Request::builder()
                .uri("/api/v1/admin/posts")
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap();
            let response = send(router.clone(), request).await;
            assert_eq!(response.status(), expected, "token {token}");
        }
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn health_is_ok_with_a_database(pool: sqlx::PgPool) {
        let response = send(router_with(pool), get("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "reachable");
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn inactive_admin_key_is_unauthorized(pool: sqlx::PgPool) {
        issue_key(&pool, "admin-token", true).await;
        sqlx::query("UPDATE api_keys SET is_active = false")
            .execute(&pool)
            .await
            .unwrap();

        let response = send(
            router_with(pool),
            admin_request("GET", "/api/v1/admin/posts", None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn post_lifecycle_returns_stored_rows(pool: sqlx::PgPool) {
        issue_key(&pool, "admin-token", true).await;
        let router = router_with(pool);

        let response = send(
            router.clone(),
            admin_request(
                "POST",
                "/api/v1/admin/posts",
                Some(r#"{"title":" USD up ","content":"Rates moved."}"#),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["title"], "USD up");
        assert_eq!(created["published"], false);
        let id = created["id"].as_str().unwrap().to_string();

        // Drafts stay out of the public feed
        let feed = body_json(send(router.clone(), get("/api/v1/posts")).await).await;
        assert!(feed.as_array().unwrap().is_empty());

        let response = send(
            router.clone(),
            admin_request(
                "PATCH",
                &format!("/api/v1/admin/posts/{id}"),
                Some(r#"{"published":true}"#),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["published"], true);
        assert_eq!(updated["title"], "USD up");
        assert_eq!(updated["content"], "Rates moved.");

        let feed = body_json(send(router.clone(), get("/api/v1/posts")).await).await;
        assert_eq!(feed[0]["id"], id.as_str());

        let uri = format!("/api/v1/admin/posts/{id}");
        let response = send(router.clone(), admin_request("DELETE", &uri, None)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(router.clone(), admin_request("DELETE", &uri, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            router,
            admin_request("PATCH", &uri, Some(r#"{"title":"gone"}"#)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "post_not_found");
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn admin_price_update_is_visible_publicly(pool: sqlx::PgPool) {
        issue_key(&pool, "admin-token", true).await;
        let router = router_with(pool);

        let response = send(
            router.clone(),
            admin_request(
                "PUT",
                "/api/v1/admin/prices",
                Some(
                    r#"{"rates":[{"currency":"USD","buy":"4470.00","sell":"4570.00"}],
                        "gold_prices":[{"type":"24 Karat","price":2750.5,"change":7.54,"category":"world"}]}"#,
                ),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let rates = body_json(send(router.clone(), get("/api/v1/exchange-rates")).await).await;
        assert_eq!(rates[0]["code"], "USD");
        assert_eq!(rates[0]["currency"], "US Dollar");
        assert_eq!(rates[0]["buy"], "4470.00");

        let gold = body_json(send(router, get("/api/v1/gold-prices")).await).await;
        assert_eq!(gold[0]["type"], "24 Karat");
        assert_eq!(gold[0]["unit"], "1 oz");
    }

    #[tokio::test]
    async fn unknown_paths_are_404_without_static_dir() {
        let response = send(app(None).await, get("/gold-prices")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
