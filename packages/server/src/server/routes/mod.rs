// HTTP routes
pub mod admin;
pub mod chat;
pub mod forum;
pub mod health;

pub use admin::*;
pub use chat::*;
pub use forum::*;
pub use health::*;
