//! Object storage for report photos
//!
//! Uploaded photos live in a single MinIO/S3 bucket; the database only
//! keeps attachment metadata and the storage key.

mod object_store;

pub use object_store::ObjectStore;
