//! External system integrations
//!
//! - [`attendance`] - the attendance store (PostgreSQL)
//! - [`mail`] - outbound report delivery (SMTP)
//!
//! Both sides are traits so the pipeline can be driven by fakes in tests.

pub mod attendance;
pub mod mail;
