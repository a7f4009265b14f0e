pub mod access;
pub mod error;
pub mod job_service;
pub mod notification_service;
pub mod rating_service;
