//! Upstream → public schema mapping.

use crate::bilibili::types::{PartsResponse, PublicPart, UpstreamPart};

impl From<UpstreamPart> for PublicPart {
    fn from(part: UpstreamPart) -> Self {
        Self {
            cid: part.cid,
            page: part.page,
            title: part.part,
            duration: part.duration,
        }
    }
}

/// Map upstream parts to the public response, keeping upstream order.
pub fn translate(parts: Vec<UpstreamPart>) -> PartsResponse {
    PartsResponse {
        parts: parts.into_iter().map(PublicPart::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn part(cid: i64, page: i64, title: &str, duration: i64) -> UpstreamPart {
        UpstreamPart {
            cid,
            page,
            part: title.into(),
            duration,
        }
    }

    #[test]
    fn test_serialized_shape() {
        let response = translate(vec![part(1, 1, "A", 100)]);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"parts": [{"cid": 1, "page": 1, "title": "A", "duration": 100}]})
        );
    }

    #[test]
    fn test_preserves_upstream_order() {
        // Upstream order is authoritative even when pages are out of sequence.
        let response = translate(vec![
            part(30, 3, "c", 3),
            part(10, 1, "a", 1),
            part(20, 2, "b", 2),
        ]);
        let pages: Vec<i64> = response.parts.iter().map(|p| p.page).collect();
        assert_eq!(pages, vec![3, 1, 2]);
        assert_eq!(response.parts[0].title, "c");
    }

    #[test]
    fn test_empty_input() {
        assert!(translate(Vec::new()).parts.is_empty());
    }
}
