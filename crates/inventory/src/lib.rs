mod command;
mod error;
mod memory;
mod session;
pub mod stats;
mod store;

pub use command::*;
pub use error::*;
pub use memory::*;
pub use session::*;
pub use store::*;
