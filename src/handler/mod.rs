pub mod auth;
pub mod chat;
pub mod jobs;
pub mod notifications;
pub mod ratings;
pub mod users;
