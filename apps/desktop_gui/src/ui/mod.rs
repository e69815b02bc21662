//! UI layer for the desktop dashboard: app shell and table rendering.

pub mod app;
pub mod tables;

pub use app::DashboardApp;
