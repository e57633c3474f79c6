//! Engine REST client

pub mod auth;
pub mod client;
pub mod deployments;
pub mod form;
