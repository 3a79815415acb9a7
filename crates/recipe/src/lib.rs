pub mod catalog;
mod matcher;
mod suggestion;
mod types;

pub use matcher::*;
pub use suggestion::*;
pub use types::*;
