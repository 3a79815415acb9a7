mod context;
mod error;
mod fallback;
pub mod provider;
mod service;

pub use context::*;
pub use error::*;
pub use fallback::*;
pub use provider::*;
pub use service::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod deepseek;
        pub use deepseek::*;
    }
}
