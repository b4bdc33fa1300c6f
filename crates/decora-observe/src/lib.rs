//! Observability setup for Decora.
//!
//! Tracing subscriber initialization (with optional OpenTelemetry span
//! export) and the GenAI semantic-convention attribute names used to
//! instrument calls to the generation backends.

pub mod genai_attrs;
pub mod tracing_setup;
