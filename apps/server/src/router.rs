use crate::{game, scores};
use axum::Router;
use axum::body::Bytes;
use axum::response::Html;
use axum::routing::get;
use powermatch::domain::config::BuildConfig;
use powermatch::domain::constants::{ASSETS_PATH, GAME_SOCKET_PATH, HIGHSCORES_API_PATH};
use powermatch::kernel::routes::{View, paths, resolve};
use powermatch::kernel::server::{ApiState, system_router};
use powermatch::kernel::shell::render_shell;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Builds the application router.
///
/// Only the declared client paths serve the page shell; every other path that
/// is not an API or asset route falls through to axum's default `404`.
#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let build = state.config.build.clone();
    let assets = build.dist_dir.join(ASSETS_PATH.trim_start_matches('/'));
    let index = load_index(&build);

    let mut router = Router::new()
        .merge(system_router())
        .route(GAME_SOCKET_PATH, get(game::socket_handler))
        .route(HIGHSCORES_API_PATH, get(scores::highscores_handler));

    for (path, view) in paths().filter_map(|path| Some((path, resolve(path)?))) {
        let page = index.clone().unwrap_or_else(|| shell_page(&build, view));
        router = router.route(path, get(move || async move { Html(page) }));
    }

    router
        .nest_service(ASSETS_PATH, ServeDir::new(assets))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Framework integration the client bundle must be built with to mount.
const CLIENT_PLUGIN: &str = "dioxus";

/// The bundled `index.html`, if the client build produced one.
fn load_index(build: &BuildConfig) -> Option<Bytes> {
    if !build.plugins.iter().any(|plugin| plugin == CLIENT_PLUGIN) {
        warn!(plugins = ?build.plugins, "Bundle not built with the {CLIENT_PLUGIN} plugin");
    }

    let path = build.dist_dir.join("index.html");
    match std::fs::read(&path) {
        Ok(html) => {
            info!(path = %path.display(), plugins = ?build.plugins, "Serving bundled page shell");
            Some(Bytes::from(html))
        },
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No bundled page shell; rendering fallback");
            None
        },
    }
}

fn shell_page(build: &BuildConfig, view: View) -> Bytes {
    Bytes::from(render_shell(&build.base_path, view.title()))
}
