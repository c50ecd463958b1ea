pub mod auth;
pub mod create;
