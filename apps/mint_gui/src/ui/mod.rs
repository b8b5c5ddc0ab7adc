//! UI layer for the mint desk: app shell and view state.

pub mod app;

pub use app::{AppConfig, MintDeskApp};
