//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use audiogate_core::models;

struct BearerAuthAddon;

impl Modify for BearerAuthAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Audiogate API",
        version = "0.1.0",
        description = "User registration, login and authenticated audio uploads to object storage."
    ),
    paths(
        handlers::ping::ping,
        handlers::users::register,
        handlers::users::login,
        handlers::users::current_user,
        handlers::audio::upload_audio,
        handlers::audio::get_audio,
    ),
    components(
        schemas(
            handlers::ping::PingResponse,
            handlers::users::RegisterRequest,
            handlers::users::RegisterResponse,
            handlers::users::LoginRequest,
            handlers::users::LoginResponse,
            models::UserResponse,
            models::AudioUploadResponse,
            models::AudioFileResponse,
            error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuthAddon),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "users", description = "Registration, login and the current identity"),
        (name = "audio", description = "Authenticated audio uploads")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
