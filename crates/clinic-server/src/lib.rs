#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

/// Tracing target for the `access_token` header gate.
pub const TRACING_TARGET_AUTHENTICATION: &str = "clinic_server::authentication";

/// Tracing target for service construction and configuration.
pub const TRACING_TARGET_SERVICE: &str = "clinic_server::service";

pub use crate::handler::{Error, ErrorKind, Result};
pub use crate::service::{ServiceConfig, ServiceError, ServiceState};
