//! Profile handlers.

use actix_web::{HttpResponse, web};

use chirp_shared::dto::AuthorResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/profiles/{username}
pub async fn get_by_username(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let profile = state.profiles.get_by_username(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AuthorResponse {
        id: profile.id,
        username: profile.username,
        profile_image_url: profile.profile_image_url,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use std::sync::Arc;
    use std::time::Duration;

    use chirp_core::service::{PostService, ProfileService};
    use chirp_infra::auth::{JwtConfig, JwtTokenVerifier};
    use chirp_infra::database::InMemoryPostRepository;
    use chirp_infra::directory::NullUserDirectory;
    use chirp_infra::rate_limit::{KeyedRateLimiter, RateLimitConfig};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    #[actix_web::test]
    async fn unknown_username_is_not_found() {
        let directory = Arc::new(NullUserDirectory);
        let state = AppState {
            posts: Arc::new(PostService::new(
                Arc::new(InMemoryPostRepository::new()),
                directory.clone(),
                Arc::new(KeyedRateLimiter::new(RateLimitConfig {
                    max_requests: 3,
                    window: Duration::from_secs(60),
                })),
            )),
            profiles: Arc::new(ProfileService::new(directory)),
            verifier: Arc::new(JwtTokenVerifier::new(JwtConfig {
                secret: "test-secret".to_string(),
            })),
        };

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/profiles/nobody")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
