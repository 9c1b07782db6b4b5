//! # Middleware Stack
//!
//! - [`metrics`]: Prometheus request metrics and store gauges.
//!
//! Request tracing uses `tower_http::trace::TraceLayer` directly; see
//! [`crate::app`].

pub mod metrics;
