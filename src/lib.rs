pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use error::{Error, Result};
