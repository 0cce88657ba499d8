pub mod board;
pub mod config;
pub mod store;
pub mod timefmt;
pub mod tui;
pub mod views;
