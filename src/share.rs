//! Share helpers: clipboard text and map search links for a result.

/// Default map search endpoint.
pub const DEFAULT_MAP_SEARCH_BASE: &str = "https://map.naver.com/p/search";

/// Text offered for copying to the clipboard.
pub fn share_text(name: &str) -> String {
    format!("오늘 점심 메뉴는 [{name}] 어때요?")
}

/// A map search URL for restaurants serving `name`.
pub fn map_search_url(base: &str, name: &str) -> String {
    let query = format!("{name} 맛집");
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(&query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_text_wraps_name() {
        assert_eq!(share_text("비빔밥"), "오늘 점심 메뉴는 [비빔밥] 어때요?");
    }

    #[test]
    fn map_url_encodes_query() {
        let url = map_search_url(DEFAULT_MAP_SEARCH_BASE, "pad thai");
        assert_eq!(
            url,
            "https://map.naver.com/p/search/pad%20thai%20%EB%A7%9B%EC%A7%91"
        );
    }

    #[test]
    fn map_url_tolerates_trailing_slash() {
        let url = map_search_url("https://maps.example/search/", "x");
        assert!(url.starts_with("https://maps.example/search/x%20"));
    }
}
