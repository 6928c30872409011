pub mod api;
pub mod app;
pub mod chart;
pub mod config;
pub mod error;
pub mod logging;
pub mod market;
pub mod sched;
pub mod ui;
pub mod view;
