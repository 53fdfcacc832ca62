use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/fetch_news", get(handlers::fetch_news))
        .route("/fetch_news/", get(handlers::fetch_news))
        .route(
            "/generate_tts",
            get(handlers::generate_tts_query).post(handlers::generate_tts_json),
        )
        .route(
            "/generate_tts/",
            get(handlers::generate_tts_query).post(handlers::generate_tts_json),
        )
        .route("/audio/:name", get(handlers::audio))
        .route("/topics", get(handlers::list_topics))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: SocketAddr) -> ns_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use ns_core::{Error, NewsReport, Result};
    pub use crate::{create_app, serve, AppState};
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use async_trait::async_trait;
    use axum::http::{header, Request, StatusCode};
    use ns_core::{Error, NarrationStyle, SpeechSynthesizer};
    use ns_inference::models::{EchoTranslator, SilentSynthesizer};
    use ns_inference::{NarrationBuilder, TopicTable};
    use ns_sources::providers::FixtureProvider;
    use ns_sources::NewsManager;
    use ns_storage::MemoryAudioStorage;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct UnavailableSynthesizer;

    #[async_trait]
    impl SpeechSynthesizer for UnavailableSynthesizer {
        fn name(&self) -> &str {
            "unavailable"
        }

        async fn synthesize(&self, _text: &str, _lang: &str) -> ns_core::Result<Vec<u8>> {
            Err(Error::Speech("engine unavailable".to_string()))
        }
    }

    fn app(records: Vec<Value>) -> Router {
        app_with(records, Arc::new(SilentSynthesizer))
    }

    fn app_with(records: Vec<Value>, synthesizer: Arc<dyn SpeechSynthesizer>) -> Router {
        let narration = NarrationBuilder::new(NarrationStyle::Summaries, "hi", Arc::new(EchoTranslator));
        let mut manager = NewsManager::new(
            TopicTable::default(),
            narration,
            synthesizer,
            Arc::new(MemoryAudioStorage::new()),
        );
        manager.add_provider(Arc::new(FixtureProvider::new("fixture", records)));
        create_app(AppState {
            manager: Arc::new(manager),
        })
    }

    fn acme_records() -> Vec<Value> {
        vec![
            json!({
                "title": "Acme unveils breakthrough battery",
                "description": "Acme reports strong growth and record profit."
            }),
            json!({
                "title": "Acme faces antitrust lawsuit",
                "description": "Regulators warn of fraud risks as losses mount."
            }),
        ]
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root() {
        let (status, body) = send(app(vec![]), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], handlers::WELCOME);
    }

    #[tokio::test]
    async fn test_fetch_news_payload() {
        let (status, body) = send(app(acme_records()), get("/fetch_news/?company=Acme")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Company"], "Acme");
        assert_eq!(body["Articles"].as_array().unwrap().len(), 2);
        assert_eq!(body["Articles"][0]["Sentiment"], "Positive");

        let comparative = &body["Comparative Sentiment Score"];
        assert_eq!(comparative["Sentiment Distribution"], json!({"Positive": 1, "Negative": 1, "Neutral": 0}));
        assert_eq!(comparative["Topic Overlap"]["Common Topics"], json!(["No common topics"]));
        assert_eq!(body["Final Sentiment Analysis"], "Mostly Negative");
        assert!(body["Audio"].as_str().unwrap().ends_with(".mp3"));
    }

    #[tokio::test]
    async fn test_fetch_news_without_articles_is_an_error() {
        let (status, body) = send(app(vec![]), get("/fetch_news?company=Acme")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No valid articles found.");
        assert!(body.get("Articles").is_none());
    }

    #[tokio::test]
    async fn test_fetch_news_requires_company() {
        let (status, body) = send(app(acme_records()), get("/fetch_news")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Company must not be empty.");
    }

    #[tokio::test]
    async fn test_generate_tts_get_and_post() {
        let (status, body) = send(app(vec![]), get("/generate_tts?text=hello%20world")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["audio_file"].as_str().unwrap().starts_with("memory://output_"));

        let request = Request::builder()
            .method("POST")
            .uri("/generate_tts/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "नमस्ते"}"#))
            .unwrap();
        let (status, body) = send(app(vec![]), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["audio_file"].is_string());
    }

    #[tokio::test]
    async fn test_generate_tts_rejects_empty_text() {
        let request = Request::builder()
            .method("POST")
            .uri("/generate_tts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "   "}"#))
            .unwrap();
        let (status, body) = send(app(vec![]), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Text must not be empty.");

        let (status, _) = send(app(vec![]), get("/generate_tts")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_tts_malformed_body_is_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/generate_tts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app(vec![]), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("JSON"));

        let request = Request::builder()
            .method("POST")
            .uri("/generate_tts")
            .body(Body::from(r#"{"text": "hello"}"#))
            .unwrap();
        let (status, body) = send(app(vec![]), request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_speech_failure_maps_to_bad_gateway() {
        let app = app_with(acme_records(), Arc::new(UnavailableSynthesizer));
        let (status, body) = send(app.clone(), get("/generate_tts?text=hello")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Speech synthesis error: engine unavailable");

        let (status, body) = send(app, get("/fetch_news?company=Acme")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["Audio"].is_null());
    }

    #[tokio::test]
    async fn test_audio_served_by_artifact_name() {
        let app = app(vec![]);
        let (_, body) = send(app.clone(), get("/generate_tts?text=hello")).await;
        let name = body["audio_file"].as_str().unwrap().trim_start_matches("memory://").to_string();

        let response = app.clone().oneshot(get(&format!("/audio/{}", name))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"ID3"));

        let (status, body) = send(app, get("/audio/missing.mp3")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Audio artifact not found: missing.mp3");
    }

    #[tokio::test]
    async fn test_topics() {
        let (status, body) = send(app(vec![]), get("/topics")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);
        assert_eq!(body[0]["name"], "Technology");
    }
}
