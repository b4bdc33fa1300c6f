//! Google Drive v3 file-hosting client.

pub mod client;
pub mod types;

pub use client::DriveClient;
