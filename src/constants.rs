use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// MIME types accepted by the image upload endpoint.
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/svg+xml",
];

/// Upload size ceiling. A file of exactly this size is accepted.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Static site routes enumerated by the sitemap alongside content slugs.
pub const STATIC_ROUTES: [&str; 8] = [
    "",
    "/about",
    "/projects",
    "/blog",
    "/speaking",
    "/services",
    "/resume",
    "/contact",
];
