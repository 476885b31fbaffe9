//! Infrastructure layer - Storage, security and service implementations

pub mod attribute;
pub mod auth;
pub mod logging;
pub mod recipe;
pub mod storage;
pub mod user;
