use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

const MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Credentialed CORS for the configured browser origins.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins(origins)))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_DISPOSITION])
        .allow_credentials(true)
        .max_age(MAX_AGE)
}

fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping invalid CORS origin {origin:?}");
                None
            }
        })
        .collect()
}

#[test]
fn allowed_origins_skips_invalid_test() {
    let origins = vec![
        "https://dadosdedemanda.vercel.app".to_string(),
        "http://bad\norigin".to_string(),
        "http://localhost:3000".to_string(),
    ];
    assert_eq!(
        allowed_origins(&origins),
        vec![
            HeaderValue::from_static("https://dadosdedemanda.vercel.app"),
            HeaderValue::from_static("http://localhost:3000"),
        ]
    );
}

#[test]
fn cors_layer_default_origins_test() {
    let config = roleta::config::Config::default();
    assert_eq!(allowed_origins(&config.cors_origins).len(), 2);
    let _layer = cors_layer(&config.cors_origins);
}
