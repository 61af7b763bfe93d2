//! Axum application setup.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Largest accepted request body (uploads and row updates).
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// How often expired sessions are dropped.
const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; style-src 'self' 'unsafe-inline'; script-src 'self'; img-src 'self' data: https:";

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let csv_routes = Router::new()
        .route("/upload", post(handlers::upload_files))
        .route("/update", put(handlers::update_data))
        .route("/validate", post(handlers::validate_data))
        .route("/data/:session_id/:file_type", get(handlers::get_data))
        .route("/export/:session_id/:file_type", get(handlers::export_csv))
        .route("/session/:session_id", delete(handlers::delete_session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            super::middleware::rate_limit,
        ));

    Router::new()
        .nest("/api/csv", csv_routes)
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Drop expired sessions once an hour for as long as the server runs.
fn spawn_purge_task(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let purged = state.store.purge_expired(chrono::Utc::now());
            state.limiter.retain_recent();
            tracing::debug!(purged, "session purge pass");
        }
    })
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let purge = spawn_purge_task(state.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "server listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await?;

    purge.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt; // for `oneshot`

    const BOUNDARY: &str = "crosscheck-test-boundary";

    const STRINGS_CSV: &str = "Tier,Industry,Topic,Subtopic,Prefix,Fuzzing-Idx,Prompt,Risks,Keywords\n\
        1,General,Compliance,Audit Findings,p,1,q,r,k\n\
        2,General,Compliancee,Audit,p,2,q,r,k\n";

    const CLASSIFICATIONS_CSV: &str = "Topic,SubTopic,Industry,Classification\n\
        Compliance,Audit Findings,General,Standard\n\
        Finance,Budget Proposals,General,Standard\n";

    fn multipart_body(files: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (field, contents) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{field}.csv\"\r\nContent-Type: text/csv\r\n\r\n{contents}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn upload_request(files: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/csv/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(files)))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn extract_json(body: Body) -> Value {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn upload_both(state: &AppState) -> String {
        let response = create_router(state.clone())
            .oneshot(upload_request(&[
                ("strings", STRINGS_CSV),
                ("classifications", CLASSIFICATIONS_CSV),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        body["sessionId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(AppState::default());
        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["status"], "OK");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_upload_creates_session() {
        let state = AppState::default();
        let response = create_router(state.clone())
            .oneshot(upload_request(&[
                ("strings", STRINGS_CSV),
                ("classifications", CLASSIFICATIONS_CSV),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["files"]["strings"]["rowCount"], 2);
        assert_eq!(body["files"]["classifications"]["rowCount"], 2);
        assert_eq!(body["files"]["strings"]["data"][0]["Topic"], "Compliance");
        assert_eq!(state.store.stats().total_sessions, 1);
    }

    #[tokio::test]
    async fn test_upload_without_files_is_rejected() {
        let state = AppState::default();
        let response = create_router(state.clone())
            .oneshot(upload_request(&[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.store.stats().total_sessions, 0);
    }

    #[tokio::test]
    async fn test_upload_with_bad_headers_is_rejected() {
        let state = AppState::default();
        let response = create_router(state.clone())
            .oneshot(upload_request(&[("classifications", "Topic,Industry\nA,B\n")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("Missing: SubTopic, Classification"));
        assert_eq!(state.store.stats().total_sessions, 0);
    }

    #[tokio::test]
    async fn test_upload_sanitizes_cells() {
        let state = AppState::default();
        let csv = "Topic,SubTopic,Industry,Classification\n<Finance>, Budget ,General,x\n";
        let response = create_router(state)
            .oneshot(upload_request(&[("classifications", csv)]))
            .await
            .unwrap();

        let body = extract_json(response.into_body()).await;
        assert_eq!(body["files"]["classifications"]["data"][0]["Topic"], "Finance");
        assert_eq!(body["files"]["classifications"]["data"][0]["SubTopic"], "Budget");
    }

    #[tokio::test]
    async fn test_validate_returns_report_and_suggestions() {
        let state = AppState::default();
        let session_id = upload_both(&state).await;

        let response = create_router(state)
            .oneshot(json_request(
                "POST",
                "/api/csv/validate",
                json!({ "sessionId": session_id }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["isValid"], false);
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["type"], "invalid_combination");
        assert_eq!(body["errors"][0]["row"], 2);
        assert_eq!(body["stats"]["factCount"], 2);

        let suggestions = body["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0]["row"], 2);
        assert_eq!(
            suggestions[0]["suggestions"][0]["combination"]["Topic"],
            "Compliance"
        );
    }

    #[tokio::test]
    async fn test_validate_requires_both_datasets() {
        let state = AppState::default();
        let response = create_router(state.clone())
            .oneshot(upload_request(&[("strings", STRINGS_CSV)]))
            .await
            .unwrap();
        let body = extract_json(response.into_body()).await;
        let session_id = body["sessionId"].as_str().unwrap().to_string();

        let response = create_router(state)
            .oneshot(json_request(
                "POST",
                "/api/csv/validate",
                json!({ "sessionId": session_id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validate_unknown_session_is_not_found() {
        let app = create_router(AppState::default());
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/csv/validate",
                json!({ "sessionId": "nope" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_update_then_validate_passes() {
        let state = AppState::default();
        let session_id = upload_both(&state).await;

        let fixed = json!([
            { "Tier": "1", "Industry": "General", "Topic": "Compliance", "Subtopic": "Audit Findings",
              "Prefix": "p", "Fuzzing-Idx": "1", "Prompt": "q", "Risks": "r", "Keywords": "k" },
            { "Tier": "2", "Industry": "General", "Topic": " <Compliance> ", "Subtopic": "Audit Findings",
              "Prefix": "p", "Fuzzing-Idx": "2", "Prompt": "q", "Risks": "r", "Keywords": "k" }
        ]);
        let response = create_router(state.clone())
            .oneshot(json_request(
                "PUT",
                "/api/csv/update",
                json!({ "sessionId": session_id, "fileType": "strings", "data": fixed }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["rowCount"], 2);
        assert!(body["lastModified"].is_string());
        assert!(body.get("rowProblems").is_none());

        let response = create_router(state)
            .oneshot(json_request(
                "POST",
                "/api/csv/validate",
                json!({ "sessionId": session_id }),
            ))
            .await
            .unwrap();
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["isValid"], true);
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_update_reports_blank_required_fields() {
        let state = AppState::default();
        let session_id = upload_both(&state).await;

        let rows = json!([{ "Tier": "1", "Industry": "", "Topic": "Compliance", "Subtopic": "Audit Findings" }]);
        let response = create_router(state)
            .oneshot(json_request(
                "PUT",
                "/api/csv/update",
                json!({ "sessionId": session_id, "fileType": "strings", "data": rows }),
            ))
            .await
            .unwrap();

        let body = extract_json(response.into_body()).await;
        assert_eq!(body["rowProblems"][0]["row"], 1);
        assert_eq!(body["rowProblems"][0]["errors"][0], "Industry is required");
    }

    #[tokio::test]
    async fn test_update_unknown_file_type_is_rejected() {
        let state = AppState::default();
        let session_id = upload_both(&state).await;

        let response = create_router(state)
            .oneshot(json_request(
                "PUT",
                "/api/csv/update",
                json!({ "sessionId": session_id, "fileType": "facts", "data": [] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_without_data_is_bad_request() {
        let state = AppState::default();
        let session_id = upload_both(&state).await;

        let response = create_router(state)
            .oneshot(json_request(
                "PUT",
                "/api/csv/update",
                json!({ "sessionId": session_id, "fileType": "strings" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "bad_request");
        assert_eq!(
            body["message"],
            "Missing required fields: sessionId, fileType, or data"
        );
    }

    #[tokio::test]
    async fn test_update_coerces_non_string_cells() {
        let state = AppState::default();
        let session_id = upload_both(&state).await;

        let rows = json!([
            { "Tier": 1, "Industry": "General", "Topic": "Compliance", "Subtopic": "Audit Findings",
              "Prefix": null, "Fuzzing-Idx": 2.5, "Prompt": "q", "Risks": "r", "Keywords": "k" }
        ]);
        let response = create_router(state.clone())
            .oneshot(json_request(
                "PUT",
                "/api/csv/update",
                json!({ "sessionId": session_id, "fileType": "strings", "data": rows }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let uri = format!("/api/csv/data/{}/strings", session_id);
        let response = create_router(state)
            .oneshot(empty_request("GET", &uri))
            .await
            .unwrap();
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["data"][0]["Tier"], "1");
        assert_eq!(body["data"][0]["Prefix"], "");
        assert_eq!(body["data"][0]["Fuzzing-Idx"], "2.5");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("PUT")
            .uri("/api/csv/update")
            .header("content-type", "application/json")
            .body(Body::from("{\"sessionId\": "))
            .unwrap();
        let response = create_router(AppState::default())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_validate_without_session_id_is_bad_request() {
        let response = create_router(AppState::default())
            .oneshot(json_request("POST", "/api/csv/validate", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["message"], "Session ID is required");
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let response = create_router(AppState::default())
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        assert!(headers["content-security-policy"]
            .to_str()
            .unwrap()
            .starts_with("default-src 'self'"));
    }

    #[tokio::test]
    async fn test_api_routes_are_rate_limited() {
        let state = AppState::default().with_rate_limit(std::num::NonZeroU32::new(2).unwrap());
        let uri = "/api/csv/data/missing/strings";

        for _ in 0..2 {
            let response = create_router(state.clone())
                .oneshot(empty_request("GET", uri))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }

        let response = create_router(state.clone())
            .oneshot(empty_request("GET", uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"], "too_many_requests");

        let response = create_router(state)
            .oneshot(empty_request("GET", "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_data_returns_dataset() {
        let state = AppState::default();
        let session_id = upload_both(&state).await;

        let uri = format!("/api/csv/data/{}/classifications", session_id);
        let response = create_router(state)
            .oneshot(empty_request("GET", &uri))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["originalFileName"], "classifications.csv");
        assert_eq!(body["headers"][1], "SubTopic");
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_export_returns_csv_attachment() {
        let state = AppState::default();
        let session_id = upload_both(&state).await;

        let uri = format!("/api/csv/export/{}/classifications", session_id);
        let response = create_router(state)
            .oneshot(empty_request("GET", &uri))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/csv");
        let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment; filename=\"classifications_"));
        assert!(disposition.ends_with(".csv\""));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Topic,SubTopic,Industry,Classification"));
        assert!(text.contains("Finance,Budget Proposals,General,Standard"));
    }

    #[tokio::test]
    async fn test_delete_session() {
        let state = AppState::default();
        let session_id = upload_both(&state).await;
        let uri = format!("/api/csv/session/{}", session_id);

        let response = create_router(state.clone())
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Session deleted successfully");

        let response = create_router(state.clone())
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Session not found");

        let data_uri = format!("/api/csv/data/{}/strings", session_id);
        let response = create_router(state)
            .oneshot(empty_request("GET", &data_uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
