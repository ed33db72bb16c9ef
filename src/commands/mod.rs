pub mod config;
pub mod convert;
pub mod result;

pub use result::CommandResult;
