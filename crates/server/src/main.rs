mod api;
mod cors;
mod dto;
mod state;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use roleta::prelude::*;
use std::{sync::Arc, time::Instant};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/upload", post(api::upload))
        .route("/health/db", get(api::health_db))
        .route("/debug/driver/{code}", get(api::debug_driver))
        .route("/debug/cpf/{code}", get(api::debug_driver))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt().init();
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    info!("Starting server...");
    let config = Config::from_env();
    let port = config.port;
    let cors = cors::cors_layer(&config.cors_origins);

    let now = Instant::now();
    let (pipeline, database) = match Pipeline::from_config(config) {
        Ok(wired) => wired,
        Err(err) => {
            error!("Failed to set up pipeline: {err}");
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState::new(pipeline, database));
    info!("Setup took {:?}", now.elapsed());

    let app = router(state, cors);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
    };

    async fn serve() -> std::net::SocketAddr {
        let config = Config::default();
        let cors = cors::cors_layer(&config.cors_origins);
        let (pipeline, database) = Pipeline::from_config(config).unwrap();
        let app = router(Arc::new(AppState::new(pipeline, database)), cors);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        addr
    }

    async fn send(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response.to_lowercase()
    }

    #[tokio::test]
    async fn cpf_alias_test() {
        let addr = serve().await;
        let response = send(
            addr,
            "GET /debug/cpf/951716 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("http/1.1 200"), "{response}");
        assert!(response.contains("\"code\":\"951716\""), "{response}");
    }

    #[tokio::test]
    async fn cors_preflight_test() {
        let addr = serve().await;
        let response = send(
            addr,
            "OPTIONS /upload HTTP/1.1\r\nHost: localhost\r\n\
             Origin: http://localhost:3000\r\n\
             Access-Control-Request-Method: POST\r\n\
             Connection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("http/1.1 200"), "{response}");
        assert!(response.contains("access-control-allow-origin: http://localhost:3000"));
        assert!(response.contains("access-control-allow-credentials: true"));
        assert!(response.contains("access-control-max-age: 43200"));
    }

    #[tokio::test]
    async fn cors_unknown_origin_test() {
        let addr = serve().await;
        let response = send(
            addr,
            "GET /debug/driver/1 HTTP/1.1\r\nHost: localhost\r\n\
             Origin: https://elsewhere.example.com\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(!response.contains("access-control-allow-origin"), "{response}");
    }

    #[test]
    fn dotenv_file_feeds_config_test() {
        let file = "# local overrides\nPORT=8081\nROLETA_CORS_ORIGINS=\"http://localhost:5173\"\n";
        let vars: HashMap<String, String> = dotenvy::from_read_iter(file.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        let config = Config::from_lookup(|key| vars.get(key).cloned());
        assert_eq!(config.port, 8081);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
    }
}
