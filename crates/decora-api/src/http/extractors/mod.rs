//! Request extraction helpers for the REST API.

pub mod multipart;
