use axum::http::{HeaderValue, Method, header};
use core_config::Environment;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

pub const CORS_ORIGIN_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// CORS for a fixed list of origins.
///
/// Allows the methods the API serves plus the JSON content headers, and lets
/// browsers cache the preflight for an hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Allows any origin. Development only.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Parse a comma-separated origin list, ignoring blanks.
pub fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid {CORS_ORIGIN_VAR} value '{origin}': {e}"),
                )
            })
        })
        .collect()
}

/// CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Unset falls back to permissive CORS in development and is an error in
/// production, as is a value with no origins in it.
pub fn cors_layer_from_env(environment: &Environment) -> io::Result<CorsLayer> {
    match std::env::var(CORS_ORIGIN_VAR) {
        Ok(raw) => {
            let origins = parse_origins(&raw)?;
            if origins.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{CORS_ORIGIN_VAR} cannot be empty"),
                ));
            }
            info!(origins = %raw, "CORS configured");
            Ok(create_cors_layer(origins))
        }
        Err(_) if environment.is_production() => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{CORS_ORIGIN_VAR} is required in production. Example: {CORS_ORIGIN_VAR}=https://example.com"
            ),
        )),
        Err(_) => {
            warn!("{CORS_ORIGIN_VAR} not set, allowing any origin");
            Ok(create_permissive_cors_layer())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        let origins = parse_origins(" http://localhost:3000, ,https://example.com ").unwrap();
        assert_eq!(origins, vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("https://example.com"),
        ]);
    }

    #[test]
    fn test_parse_origins_rejects_invalid_header() {
        assert!(parse_origins("http://bad\norigin").is_err());
    }

    #[test]
    fn test_unset_origin_is_permissive_in_development() {
        temp_env::with_var_unset(CORS_ORIGIN_VAR, || {
            assert!(cors_layer_from_env(&Environment::Development).is_ok());
        });
    }

    #[test]
    fn test_unset_origin_fails_in_production() {
        temp_env::with_var_unset(CORS_ORIGIN_VAR, || {
            let err = cors_layer_from_env(&Environment::Production).unwrap_err();
            assert!(err.to_string().contains(CORS_ORIGIN_VAR));
        });
    }

    #[test]
    fn test_blank_origin_list_is_rejected() {
        temp_env::with_var(CORS_ORIGIN_VAR, Some(" , "), || {
            assert!(cors_layer_from_env(&Environment::Development).is_err());
        });
    }

    #[test]
    fn test_origin_list_is_accepted_in_production() {
        temp_env::with_var(CORS_ORIGIN_VAR, Some("https://example.com"), || {
            assert!(cors_layer_from_env(&Environment::Production).is_ok());
        });
    }
}
