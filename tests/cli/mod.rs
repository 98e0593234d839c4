mod audit;
mod config;
mod errors;
mod logging;
mod misc;
pub mod support;
