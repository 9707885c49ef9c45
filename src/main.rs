use rocket::launch;
use std::sync::Arc;

use chain_arbitrage::{bootstrap::AppState, config::Config, web};

#[launch]
fn rocket() -> _ {
    env_logger::init();

    // Load configuration
    let config = Config::from_env()
        .expect("Failed to load configuration");

    // Build application state
    let app_state = Arc::new(
        AppState::new(&config)
            .expect("Failed to initialize application state")
    );
    log::info!(
        "search defaults: interval=[{}, {}] tolerance={} fee={}",
        app_state.search.interval.lower,
        app_state.search.interval.upper,
        app_state.search.tolerance,
        app_state.default_fee_rate
    );

    web::build(app_state, config.port)
}
