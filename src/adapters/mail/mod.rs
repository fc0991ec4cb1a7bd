//! Delivery adapter
//!
//! - [`ReportMailer`] - the trait the pipeline depends on
//! - [`compose_report_message`] - builds the MIME message, no I/O
//! - [`SmtpMailer`] - sends through an authenticated SMTP relay

pub mod message;
pub mod smtp;
pub mod traits;

pub use message::{compose_report_message, report_body, report_subject, ReportMessage};
pub use smtp::SmtpMailer;
pub use traits::ReportMailer;
