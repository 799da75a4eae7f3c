//! URL classification
//!
//! Every entry of the URL list is a single video, a whole course, or
//! neither. The URL shapes below match the platform's public routes:
//! - `https://codigofacilito.com/videos/<slug>`
//! - `https://codigofacilito.com/cursos/<slug>`

use once_cell::sync::Lazy;
use regex::Regex;

use crate::download::client::PlatformClient;

#[allow(clippy::expect_used)]
static VIDEO_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?codigofacilito\.com/videos/[\w-]+/?(?:[?#].*)?$").expect("video url regex")
});

#[allow(clippy::expect_used)]
static COURSE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?codigofacilito\.com/cursos/[\w-]+/?(?:[?#].*)?$").expect("course url regex")
});

/// Kind of a URL list entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Video,
    Course,
    Invalid,
}

/// Checks if a URL is a single-video page
pub fn is_video_url(url: &str) -> bool {
    VIDEO_URL_REGEX.is_match(url)
}

/// Checks if a URL is a course page
pub fn is_course_url(url: &str) -> bool {
    COURSE_URL_REGEX.is_match(url)
}

/// Classifies `url` using the client's URL-shape recognition.
///
/// Video shape wins if a client ever recognizes both.
pub fn classify_url<C: PlatformClient + ?Sized>(client: &C, url: &str) -> UrlKind {
    if client.is_video_url(url) {
        UrlKind::Video
    } else if client.is_course_url(url) {
        UrlKind::Course
    } else {
        UrlKind::Invalid
    }
}
