use actix_web::web;

pub mod auth;
pub mod candidates;
pub mod employers;
pub mod health;
pub mod responses;
pub mod vacancies;

/// Register every route. `main.rs` wraps the app in the bearer-auth and
/// trace middleware; tests can register the same paths with whichever
/// wrappers the scenario needs.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    auth::configure_routes(cfg);
    candidates::configure_routes(cfg);
    employers::configure_routes(cfg);
    vacancies::configure_routes(cfg);
    responses::configure_routes(cfg);
}
