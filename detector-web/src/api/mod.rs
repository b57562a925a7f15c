//! HTTP API handlers for detector-web

pub mod analyze;
pub mod health;
pub mod ui;

pub use analyze::analyze_routes;
pub use health::health_routes;
pub use ui::{setup_routes, ui_routes};
