// Business domains
pub mod admin;
pub mod chat;
pub mod forum;
pub mod safety;
