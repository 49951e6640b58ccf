pub mod auth;
pub mod export;
pub mod plan;
