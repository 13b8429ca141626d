//! # Domain Models
//!
//! Pure `PowerMatch` types shared by the server, the web client and the feature
//! crates. The only dependency is `serde`. Keep it lean: no I/O, networking,
//! or heavy logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod game;
pub mod meter;
pub mod protocol;
pub mod score;
