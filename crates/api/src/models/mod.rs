//! Domain models backed by database rows.

pub mod submission;

pub use submission::ContactSubmission;
