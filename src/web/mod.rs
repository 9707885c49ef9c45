pub mod dto;
pub mod routes;

use rocket::{routes, Build, Rocket};
use std::sync::Arc;

use crate::bootstrap::AppState;
use crate::web::routes::{chain_search, default_chain, health};

/// Rocket instance with every route mounted and `app_state` managed.
pub fn build(app_state: Arc<AppState>, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .manage(app_state)
        .mount("/", routes![chain_search, default_chain, health])
}
