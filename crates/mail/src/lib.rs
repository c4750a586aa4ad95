//! Outgoing mail: SMTP delivery and the weekly attendance report.

pub mod email;
pub mod report;

pub use email::{EmailConfig, EmailDelivery, EmailError};
pub use report::{AtRiskSubject, WeeklyReport};
