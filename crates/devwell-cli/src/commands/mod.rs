pub mod activity;
pub mod auth;
pub mod breaks;
pub mod config;
pub mod status;
pub mod stress;
