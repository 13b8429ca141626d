//! # PowerMatch Web
//!
//! Browser client of the game: start screen, live round chart, result screen
//! and the high-score table. The root tree mounts once into `#app`.
//!
//! ## Example
//! ```no_run
//! pm_web::install_fault_reporter();
//! if let Err(e) = pm_web::run() {
//!     panic!("{e}");
//! }
//! ```

pub mod chart;
mod error;
pub mod fault;
mod host;
pub mod net;
pub mod round;
mod router;
mod views;

pub use crate::error::{WebError, WebErrorExt};
pub use crate::router::Route;

use crate::round::Round;
use dioxus::prelude::*;
use powermatch::kernel::fault::install_panic_hook;
use powermatch::kernel::mount::{APP, MountError};

/// Reports Rust panics and uncaught script errors through the fault sink.
///
/// Returns `true` if anything new was installed.
pub fn install_fault_reporter() -> bool {
    let panics = install_panic_hook();
    let scripts = host::install_script_fault_handler();
    panics || scripts
}

/// Mounts the application into the page's `#app` element.
///
/// # Errors
/// * [`MountError::AnchorMissing`] if the page has no `#app` element.
/// * [`MountError::AlreadyMounted`] on a second call.
pub fn run() -> Result<(), MountError> {
    APP.mount(&host::BrowserHost::current())
}

/// Root component: shared round state and the router.
#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(Round::default()));

    rsx! {
        Router::<Route> {}
    }
}
