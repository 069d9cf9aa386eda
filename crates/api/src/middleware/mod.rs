//! Request-time extractors: bearer authentication, role guards, client IP.

pub mod auth;
pub mod client_ip;
pub mod rbac;
