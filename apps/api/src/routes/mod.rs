pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::conversion::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cv/convert", post(handlers::handle_convert))
        .route("/api/v1/cv/preview", post(handlers::handle_preview))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use image::ImageFormat;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::conversion::assemble::default_page_config;
    use crate::conversion::logo::fixtures::logo_bytes;
    use crate::conversion::logo::LogoImage;

    #[tokio::test]
    async fn test_health() {
        let state = AppState {
            config: Config::for_tests(),
            logo: Arc::new(LogoImage::from_bytes(&logo_bytes(ImageFormat::Png)).unwrap()),
            page_config: Arc::new(default_page_config()),
        };

        let response = build_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "cv-formatter-api");
    }
}
