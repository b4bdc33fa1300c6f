//! File-hosting upload abstractions.
//!
//! Defines the `FileHost` trait the Drive client implements and the upload
//! service that chains credential acquisition, file creation, and public
//! sharing into one operation.

pub mod host;
pub mod service;

pub use host::FileHost;
pub use service::UploadService;
