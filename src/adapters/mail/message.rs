//! Report message composition

use crate::domain::{AttendanceError, ReportDate, Result, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};
use lettre::Message;

/// Everything that goes into one report message
#[derive(Debug, Clone)]
pub struct ReportMessage<'a> {
    /// Sender address
    pub from: &'a str,
    /// Recipient address
    pub to: &'a str,
    /// Day the report covers
    pub report_date: ReportDate,
    /// Time the message is generated
    pub generated_at: NaiveDateTime,
    /// Label of the source terminal, e.g. `Device 19`
    pub device_label: &'a str,
    /// Attachment file name
    pub attachment_name: String,
    /// Attachment bytes
    pub attachment: Vec<u8>,
}

/// `Daily Attendance Report - YYYY-MM-DD`
pub fn report_subject(date: ReportDate) -> String {
    format!("Daily Attendance Report - {date}")
}

/// Plain-text body describing the report scope
pub fn report_body(date: ReportDate, generated_at: NaiveDateTime, device_label: &str) -> String {
    format!(
        "Dear Team,\n\
         \n\
         Please find attached the daily attendance report for {date}.\n\
         \n\
         This report contains the first IN time for each employee via {device_label}.\n\
         \n\
         Report Details:\n\
         - Date: {date}\n\
         - Generated: {generated}\n\
         - Device: {device_label}\n\
         \n\
         Best regards,\n\
         Attendance System\n",
        generated = generated_at.format(TIMESTAMP_FORMAT),
    )
}

fn mailbox(role: &str, address: &str) -> Result<Mailbox> {
    address
        .parse::<Mailbox>()
        .map_err(|e| AttendanceError::Delivery(format!("Invalid {role} address '{address}': {e}")))
}

/// Builds the multipart message: plain-text body plus the artifact as a
/// base64-encoded `application/octet-stream` attachment
///
/// # Errors
///
/// Returns [`AttendanceError::Delivery`] if an address does not parse or the
/// message cannot be assembled.
pub fn compose_report_message(message: ReportMessage<'_>) -> Result<Message> {
    let from = mailbox("sender", message.from)?;
    let to = mailbox("recipient", message.to)?;

    let content_type = ContentType::parse("application/octet-stream")
        .map_err(|e| AttendanceError::Delivery(format!("Invalid attachment content type: {e}")))?;
    let body = Body::new_with_encoding(message.attachment, ContentTransferEncoding::Base64)
        .map_err(|_| AttendanceError::Delivery("Failed to encode attachment".to_string()))?;
    let attachment = Attachment::new(message.attachment_name).body(body, content_type);

    Message::builder()
        .from(from)
        .to(to)
        .subject(report_subject(message.report_date))
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(report_body(
                    message.report_date,
                    message.generated_at,
                    message.device_label,
                )))
                .singlepart(attachment),
        )
        .map_err(|e| AttendanceError::Delivery(format!("Failed to build message: {e}")))
}
