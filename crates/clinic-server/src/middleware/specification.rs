//! OpenAPI document and Scalar UI.
//!
//! The document is generated from the aide-annotated routes and served as
//! JSON next to an interactive Scalar reference.

use aide::axum::ApiRouter;
use aide::openapi::{ApiKeyLocation, Info, OpenApi, SecurityScheme};
use aide::scalar::Scalar;
use aide::transform::TransformOpenApi;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Paths of the OpenAPI document and the Scalar UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path which exposes the OpenAPI JSON document.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Path which exposes the Scalar API reference UI.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

/// Extension trait for [`ApiRouter`] to serve its OpenAPI document.
pub trait RouterOpenApiExt<S> {
    /// Finishes the router, serving the document and the Scalar UI at the
    /// configured paths.
    fn with_open_api(self, config: OpenApiConfig) -> Router<S>;

    /// Same as [`with_open_api`] with a custom [`Info`] object.
    ///
    /// [`with_open_api`]: RouterOpenApiExt::with_open_api
    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: OpenApiConfig) -> Router<S> {
        let info = Info {
            title: "Dental Clinic API".to_owned(),
            summary: Some("Patients, appointments and their clinical records".to_owned()),
            description: Some(
                "Every route except `POST /api/login` requires the `access_token` header \
                returned by the login call. Failures use the envelope \
                `{success: false, error: {code, message}, status}`."
                    .to_owned(),
            ),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info,
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json);
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router
            .finish_api_with(&mut api, access_token_scheme)
            .layer(Extension(api))
    }
}

fn access_token_scheme(api: TransformOpenApi<'_>) -> TransformOpenApi<'_> {
    api.security_scheme(
        "access_token",
        SecurityScheme::ApiKey {
            location: ApiKeyLocation::Header,
            name: "access_token".to_owned(),
            description: Some("Token returned by `POST /api/login`.".to_owned()),
            extensions: Default::default(),
        },
    )
}
