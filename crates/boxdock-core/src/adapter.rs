//! Site page adapter.
//!
//! Everything Boxdock knows about the wrapped site's markup and URL scheme
//! lives here: the injected toolbar script, the asset-ID cell pattern, and
//! the item-search URL. The shell itself only talks to the [`PageAdapter`]
//! trait, so pointing the wrapper at a different inventory frontend means
//! swapping the adapter, not touching the shell.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Asset IDs are short digit-hyphen-digit labels printed on physical items:
/// two or three digits, a hyphen, two or three digits (`12-34`, `123-45`,
/// `12-345`, `123-456`). The same pattern drives the injected script.
pub const ASSET_ID_PATTERN: &str = r"^\d{2,3}-\d{2,3}$";

static ASSET_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(ASSET_ID_PATTERN).expect("asset id pattern compiles"));

const TOOLBAR_TEMPLATE: &str = include_str!("../assets/toolbar.js");

/// Hook evaluated after every finished navigation so the toolbar reflects
/// the new location and re-runs asset-ID detection.
pub const REFRESH_SCRIPT: &str = "window.__boxdock && window.__boxdock.refresh();";

pub trait PageAdapter: Send + Sync {
    /// Title for the native window.
    fn window_title(&self) -> String;

    /// Script injected into every loaded document.
    fn toolbar_script(&self) -> String;

    /// Destination for a toolbar search, or `None` when the input is empty.
    fn search_url(&self, input: &str) -> Option<Url>;

    /// Whether a table cell's text is an asset ID.
    fn is_asset_id(&self, text: &str) -> bool;
}

/// Adapter for the Homebox home-inventory frontend.
#[derive(Debug, Clone)]
pub struct HomeboxAdapter {
    base: Url,
}

impl HomeboxAdapter {
    pub fn new(mut base: Url) -> Self {
        // Without a trailing slash, joining a segment would replace the
        // last path component of a sub-path base instead of extending it.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Self { base }
    }

    fn items_url(&self) -> Url {
        // Base URLs come from settings validation, so join cannot fail for
        // the fixed "items" segment; fall back to the base itself if it does.
        self.base.join("items").unwrap_or_else(|_| self.base.clone())
    }
}

impl PageAdapter for HomeboxAdapter {
    fn window_title(&self) -> String {
        "Homebox".to_string()
    }

    fn toolbar_script(&self) -> String {
        // The pattern is spliced into a JS string literal, so backslashes
        // need doubling.
        let js_pattern = ASSET_ID_PATTERN.replace('\\', "\\\\");
        TOOLBAR_TEMPLATE
            .replace("__ITEMS_URL__", self.items_url().as_str())
            .replace("__ASSET_ID_PATTERN__", &js_pattern)
    }

    fn search_url(&self, input: &str) -> Option<Url> {
        let query = input.trim().trim_start_matches('#');
        if query.is_empty() {
            return None;
        }
        let mut url = self.items_url();
        url.query_pairs_mut()
            .append_pair("q", &format!("#{query}"))
            .append_pair("page", "1");
        Some(url)
    }

    fn is_asset_id(&self, text: &str) -> bool {
        ASSET_ID_RE.is_match(text.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> HomeboxAdapter {
        HomeboxAdapter::new(Url::parse("https://homebox.example.com").unwrap())
    }

    #[test]
    fn asset_id_matches_all_digit_group_widths() {
        let a = adapter();
        assert!(a.is_asset_id("12-34"));
        assert!(a.is_asset_id("123-45"));
        assert!(a.is_asset_id("12-345"));
        assert!(a.is_asset_id("123-456"));
        // Whitespace around the cell text is tolerated.
        assert!(a.is_asset_id("  104-027  "));
    }

    #[test]
    fn asset_id_rejects_near_misses() {
        let a = adapter();
        assert!(!a.is_asset_id("1-23"));
        assert!(!a.is_asset_id("1234-56"));
        assert!(!a.is_asset_id("12-3456"));
        assert!(!a.is_asset_id("12-34x"));
        assert!(!a.is_asset_id("12 34"));
        assert!(!a.is_asset_id(""));
    }

    #[test]
    fn search_url_strips_a_leading_hash() {
        let url = adapter().search_url("#104-027").unwrap();
        assert_eq!(
            url.as_str(),
            "https://homebox.example.com/items?q=%23104-027&page=1"
        );
    }

    #[test]
    fn search_url_hash_is_percent_encoded_in_the_query() {
        let url = adapter().search_url("104-027").unwrap();
        assert!(url.query().unwrap().contains("q=%23104-027"));
    }

    #[test]
    fn search_url_keeps_a_sub_path_base() {
        let a = HomeboxAdapter::new(Url::parse("https://host.example.com/homebox").unwrap());
        let url = a.search_url("104-027").unwrap();
        assert_eq!(
            url.as_str(),
            "https://host.example.com/homebox/items?q=%23104-027&page=1"
        );

        // A trailing slash on the configured base behaves identically.
        let b = HomeboxAdapter::new(Url::parse("https://host.example.com/homebox/").unwrap());
        assert_eq!(b.search_url("104-027"), a.search_url("104-027"));
    }

    #[test]
    fn search_url_empty_input_is_none() {
        assert!(adapter().search_url("").is_none());
        assert!(adapter().search_url("   ").is_none());
        assert!(adapter().search_url("#").is_none());
    }

    #[test]
    fn toolbar_script_is_fully_rendered() {
        let script = adapter().toolbar_script();
        assert!(script.contains("https://homebox.example.com/items"));
        assert!(script.contains("d{2,3}-"));
        assert!(!script.contains("__ITEMS_URL__"));
        assert!(!script.contains("__ASSET_ID_PATTERN__"));
    }
}
