pub mod category;
mod error;
mod expiry;
pub mod food;

pub use error::*;
pub use expiry::*;
