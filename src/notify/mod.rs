// src/notify/mod.rs
pub mod email;

pub use email::{deliver_report, DeliveryOutcome, EmailSender};
