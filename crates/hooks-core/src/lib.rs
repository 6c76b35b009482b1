pub mod config;
pub mod detect;
pub mod error;
pub mod io;
pub mod paths;
pub mod plan;
pub mod render;
pub mod scaffold;
pub mod types;

pub use error::{HooksError, Result};
