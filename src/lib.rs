pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod notify;
pub mod services;

#[cfg(test)]
mod test;

pub use error::PipelineError;
