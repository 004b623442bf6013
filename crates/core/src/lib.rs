//! SKY BRASIL Core - Shared types library.
//!
//! This crate provides the domain types used across the SKY BRASIL backend:
//! - `api` - HTTP service hosting the payment relay, order-confirmation
//!   notifier and contact/VIP intake handlers
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Every format-constrained value that
//! crosses the service boundary (emails, tax ids, postal codes, phone
//! numbers, monetary amounts) has a newtype here with a fallible `parse`
//! constructor, so handlers downstream never touch unvalidated strings.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, CPF, CEP, phone numbers,
//!   monetary amounts and card brands
//! - [`sanitize`] - Free-text sanitization applied before storage or
//!   rendering into emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod sanitize;
pub mod types;

pub use sanitize::sanitize_text;
pub use types::*;
