pub mod applications;
mod extract;
mod response;

use std::sync::Arc;

use axum::http::{header::InvalidHeaderValue, HeaderValue};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Settings;
use crate::service::ApplicationService;

pub use extract::ValidatedJson;
pub use response::SuccessfulResponse;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub applications: Arc<dyn ApplicationService>,
}

pub fn create_router(state: AppState) -> Router {
    let prefix = state.settings.api.trim_end_matches('/');

    Router::new()
        .nest(&format!("{prefix}/applications"), applications::router())
        .with_state(state)
}

/// CORS policy admitting exactly the configured origins.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_accepts_configured_origins() {
        let origins = vec!["http://localhost:3000".to_string(), "https://example.com".to_string()];
        assert!(cors_layer(&origins).is_ok());
        assert!(cors_layer(&[]).is_ok());
    }

    #[test]
    fn cors_layer_rejects_unencodable_origin() {
        assert!(cors_layer(&["http://bad\norigin".to_string()]).is_err());
    }
}
