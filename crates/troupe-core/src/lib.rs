pub mod config;
pub mod error;
pub mod history;
pub mod traits;
pub mod types;

pub use config::AppConfig;
pub use error::{Result, TroupeError};
pub use history::{ChatHistory, FixedFirstChatHistory};
pub use types::*;
