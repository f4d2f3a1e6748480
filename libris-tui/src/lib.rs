//! Libris TUI library exports.

pub mod api_client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod keys;
pub mod nav;
pub mod notifications;
pub mod persistence;
pub mod state;
pub mod telemetry;
pub mod theme;
pub mod views;
pub mod widgets;
