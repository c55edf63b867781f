pub mod handlers;

use crate::{config::Config, error::ProxyError, google::GoogleClient, provider::ImageProvider};
use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{middleware, web, App, HttpServer};
use std::io;
use std::sync::Arc;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub provider: Arc<dyn ImageProvider>,
    pub config: Config,
}

impl AppState {
    pub fn new(provider: Arc<dyn ImageProvider>, config: Config) -> Self {
        Self { provider, config }
    }
}

/// Registers the API routes and the extractor configs they rely on.
pub fn configure(max_upload_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let json_config = web::JsonConfig::default()
            .error_handler(|err, _req| ProxyError::Validation(err.to_string()).into());
        let multipart_config = MultipartFormConfig::default()
            .total_limit(max_upload_bytes)
            .memory_limit(max_upload_bytes)
            .error_handler(|err, _req| ProxyError::BadRequest(err.to_string()).into());

        cfg.app_data(json_config)
            .app_data(multipart_config)
            .service(handlers::health)
            .service(handlers::debug)
            .service(handlers::test_generate)
            .service(handlers::generate)
            .service(handlers::stylize);
    }
}

pub fn cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }
    allowed_origins.iter().fold(
        Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
        |cors, origin| cors.allowed_origin(origin),
    )
}

pub async fn run(config: Config) -> io::Result<()> {
    let client = GoogleClient::new(&config.google)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let state = web::Data::new(AppState::new(Arc::new(client), config.clone()));
    let allowed_origins = config.allowed_origins.clone();
    let max_upload_bytes = config.max_upload_bytes;

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(cors(&allowed_origins))
            .app_data(state.clone())
            .configure(configure(max_upload_bytes))
    })
    .bind(config.bind_address())?
    .run()
    .await
}
