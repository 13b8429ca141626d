//! Kernel utilities shared by the server and the web client.
//! Keep this crate lightweight: it holds the bootstrap glue (route table, fault
//! reporting, mounting, shell rendering) and config loading.
//!
//! ## Route lookup
//! ```rust
//! use pm_kernel::routes::{View, resolve};
//!
//! assert_eq!(resolve("/game"), Some(View::PowerCurveGame));
//! assert_eq!(resolve("/game/"), None);
//! ```
//!
//! ## Config loading (non-wasm)
//! ```rust,ignore
//! use pm_kernel::config::load_config;
//! use pm_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod fault;
pub mod mount;
pub mod routes;
#[cfg(feature = "server")]
pub mod server;
pub mod shell;

pub use pm_domain as domain;
