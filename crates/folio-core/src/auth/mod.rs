//! Credential checks for the admin area.
//!
//! [`compare::safe_compare`] is the only equality used on secrets.
//! [`basic::Credentials`] decodes an HTTP Basic `Authorization` header and
//! [`admin::AdminCredentials`] holds the configured login and verifies
//! decoded credentials against it.

pub mod admin;
pub mod basic;
pub mod compare;
