use super::health;
use axum::Router;
use axum::extract::FromRef;
use axum::routing::get;
use pm_domain::constants::HEALTH_PATH;
use pm_event_bus::EventBus;

pub fn system_router<S>() -> Router<S>
where
    S: Send + Sync + Clone + 'static,
    EventBus: FromRef<S>,
{
    Router::<S>::new().route(HEALTH_PATH, get(health::health_handler))
}
