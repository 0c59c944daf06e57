//! 路由装配

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use super::handlers::{auth, catalog, device_preference, language_preference, role, root, user};
use super::middleware::auth_middleware;
use super::AppState;

pub const API_PREFIX: &str = "/api/v1";

pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/send-otp", post(auth::send_otp))
        .route("/auth/verify-otp", post(auth::verify_otp))
        .route("/auth/resend-otp", post(auth::resend_otp))
        .route("/auth/access-token", post(auth::access_token))
        .route("/user/create", post(user::create_user))
        .route(
            "/device-preference",
            post(device_preference::create).patch(device_preference::update),
        )
        .route(
            "/device-preference/{device_id}",
            get(device_preference::get).delete(device_preference::delete),
        )
        .route(
            "/language-preference/region",
            post(language_preference::create_region).get(language_preference::find_region),
        )
        .route(
            "/language-preference",
            post(language_preference::create)
                .get(language_preference::get)
                .delete(language_preference::delete),
        )
        .route("/domain", get(catalog::list_domains))
        .route("/category", get(catalog::list_categories));

    let protected = Router::new()
        .route("/auth/mpin", post(auth::create_mpin))
        .route("/auth/mpin/verify", post(auth::verify_mpin))
        .route("/auth/mpin/reset", post(auth::reset_mpin))
        .route("/auth/mpin/send-otp", post(auth::send_mpin_otp))
        .route("/auth/logout", post(auth::logout))
        .route(
            "/user",
            get(user::find_current)
                .post(user::create_user)
                .patch(user::update)
                .delete(user::remove),
        )
        .route("/user/all", get(user::find_all))
        .route("/user/journey", get(user::journey))
        .route("/user/persona", patch(user::update_persona))
        .route("/user/kyc", patch(user::update_kyc))
        .route("/user/role", patch(user::update_role))
        .route("/role", post(role::create).get(role::find_all))
        .route(
            "/role/{id}",
            get(role::find_one).patch(role::update).delete(role::remove),
        )
        .route("/domain", post(catalog::create_domain))
        .route("/category", post(catalog::create_category))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/", get(root::status))
        .route("/health", get(root::status))
        .nest(API_PREFIX, public.merge(protected))
        .with_state(state)
}
