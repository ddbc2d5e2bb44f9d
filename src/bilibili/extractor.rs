//! BV id extraction from free-form input.
//!
//! Accepts a bare id (`BV1xx411c7mD`), a full video link, or any text that
//! embeds one. The first occurrence wins; nothing is trimmed or case-folded.

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static BVID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"BV[0-9A-Za-z]{10}").expect("Failed to compile BV id regex"));

/// A canonical Bilibili video id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bvid(String);

impl Bvid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Bvid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Bvid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the first BV id from `input`.
///
/// Falls back to scanning the percent-decoded path of `input` parsed as an
/// absolute URL, segment by segment. Input with ASCII control characters is
/// not a URL.
pub fn extract_bvid(input: &str) -> Option<Bvid> {
    if let Some(found) = find_in(input) {
        return Some(found);
    }

    if input.chars().any(|c| c.is_ascii_control()) {
        return None;
    }

    let url = url::Url::parse(input).ok()?;
    let path = percent_decode_str(url.path()).decode_utf8_lossy();
    path.split('/').find_map(find_in)
}

fn find_in(haystack: &str) -> Option<Bvid> {
    BVID_REGEX
        .find(haystack)
        .map(|m| Bvid(m.as_str().to_string()))
}
