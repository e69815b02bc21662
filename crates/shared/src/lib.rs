//! Types shared by the dashboard client, desktop GUI and CLI.

pub mod display;
pub mod domain;
pub mod error;
pub mod protocol;
