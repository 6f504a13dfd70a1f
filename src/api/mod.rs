pub mod client;

pub use client::{ApiError, BaselineSource, SacDmClient};
