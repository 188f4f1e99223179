pub mod config;
pub mod context;
pub mod error;
pub mod memory;

pub use config::*;
pub use context::*;
pub use error::*;
pub use memory::*;
