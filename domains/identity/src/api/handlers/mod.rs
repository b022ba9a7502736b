//! HTTP handlers for the Identity domain

pub mod admin;
pub mod auth;
pub mod users;
