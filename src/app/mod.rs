pub mod app_core;
pub mod state;
pub mod ui;

pub use app_core::SacDmApp;
