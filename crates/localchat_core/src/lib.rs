pub mod conversation;
pub mod error;
pub mod turn;

pub use conversation::Conversation;
pub use error::{LocalChatError, Result};
pub use turn::{Role, Turn, TurnId};
