use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Largest CV accepted by the upload endpoint (5 MiB).
pub const MAX_CV_BYTES: usize = 5 * 1024 * 1024;

pub const PDF_MIME_TYPE: &str = "application/pdf";
