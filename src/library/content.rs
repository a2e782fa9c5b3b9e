//! Content fingerprints and the example record itself.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content identifier (lowercase hex SHA256 of the bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(String);

impl ContentId {
    /// Fingerprint raw bytes
    pub fn of(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self(hex::encode(hasher.finalize()))
    }

    /// Fingerprint bytes after trimming surrounding whitespace.
    ///
    /// This is the key the catalog's reverse index uses.
    pub fn of_trimmed(content: &[u8]) -> Self {
        Self::of(trim_space(content))
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned hex string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strip leading and trailing Unicode whitespace from UTF-8 bytes.
///
/// Trimming stops at the first byte sequence that is not valid UTF-8, so
/// binary content is left intact.
pub fn trim_space(content: &[u8]) -> &[u8] {
    let mut start = 0;
    while let Some((c, len)) = first_char(&content[start..]) {
        if !c.is_whitespace() {
            break;
        }
        start += len;
    }

    let mut end = content.len();
    while let Some((c, len)) = last_char(&content[start..end]) {
        if !c.is_whitespace() {
            break;
        }
        end -= len;
    }

    &content[start..end]
}

/// First char of `bytes` and its encoded length, if it decodes
fn first_char(bytes: &[u8]) -> Option<(char, usize)> {
    (1..=bytes.len().min(4)).find_map(|n| {
        std::str::from_utf8(&bytes[..n])
            .ok()
            .and_then(|s| s.chars().next())
            .map(|c| (c, n))
    })
}

/// Last char of `bytes` and its encoded length, if it decodes
fn last_char(bytes: &[u8]) -> Option<(char, usize)> {
    (1..=bytes.len().min(4)).find_map(|n| {
        std::str::from_utf8(&bytes[bytes.len() - n..])
            .ok()
            .and_then(|s| s.chars().next_back())
            .map(|c| (c, n))
    })
}

/// A single example snippet.
///
/// Only `autoRun` is serialized; the front end renders everything else
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    /// Name within its category (empty for saved and stock examples)
    #[serde(skip)]
    pub name: String,

    /// Raw file or stored bytes
    #[serde(skip)]
    pub content: Vec<u8>,

    /// Whether the page runs the example on load
    #[serde(rename = "autoRun")]
    pub auto_run: bool,

    /// Display title
    #[serde(skip)]
    pub title: String,

    /// Canonical URL path
    #[serde(skip)]
    pub url: String,
}

/// Title used for content pulled from the remote store
pub const STORED_TITLE: &str = "Stored Example";

impl Example {
    /// Build a catalog example for `<category>/<name>`
    pub fn cataloged(category: &str, name: impl Into<String>, content: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            title: format!("{} · {}", category, name),
            url: format!("/{}/{}", category, name),
            name,
            content,
            auto_run: true,
        }
    }

    /// Wrap bytes fetched from the remote store
    pub fn stored(url: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: String::new(),
            content,
            auto_run: false,
            title: STORED_TITLE.to_string(),
            url: url.into(),
        }
    }

    /// Fingerprint of the trimmed content
    pub fn content_id(&self) -> ContentId {
        ContentId::of_trimmed(&self.content)
    }
}

/// The stock response for the index page.
///
/// One shared instance for the whole process; never mutated.
pub fn empty_example() -> Arc<Example> {
    static EMPTY: OnceLock<Arc<Example>> = OnceLock::new();
    EMPTY
        .get_or_init(|| {
            Arc::new(Example {
                name: String::new(),
                content: Vec::new(),
                auto_run: true,
                title: "Welcome".to_string(),
                url: "/".to_string(),
            })
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_id_is_deterministic() {
        let id1 = ContentId::of(b"FB.init({appId: 1});");
        let id2 = ContentId::of(b"FB.init({appId: 1});");
        let id3 = ContentId::of(b"FB.init({appId: 2});");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1.as_str().len(), 64);
        assert!(id1
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_content_id_known_digest() {
        // SHA256 of the empty string
        assert_eq!(
            ContentId::of(b"").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_trimmed_ignores_surrounding_whitespace() {
        assert_eq!(
            ContentId::of_trimmed(b"\n\t  alert(1)\n\n"),
            ContentId::of(b"alert(1)")
        );
        assert_ne!(ContentId::of_trimmed(b"a b"), ContentId::of(b"ab"));
    }

    #[test]
    fn test_trimmed_strips_vertical_tab_and_unicode_spaces() {
        let bare = ContentId::of(b"FB.init();");

        assert_eq!(ContentId::of_trimmed(b"\x0bFB.init();\x0b"), bare);
        // U+00A0 NO-BREAK SPACE
        assert_eq!(ContentId::of_trimmed(b"\xc2\xa0FB.init();\xc2\xa0"), bare);
        // U+0085 NEXT LINE
        assert_eq!(ContentId::of_trimmed(b"\xc2\x85FB.init();\xc2\x85"), bare);
        // U+3000 IDEOGRAPHIC SPACE mixed with ASCII
        assert_eq!(
            ContentId::of_trimmed(" \u{3000}\nFB.init();\r\n\u{3000}".as_bytes()),
            bare
        );
    }

    #[test]
    fn test_trim_space_stops_at_invalid_utf8() {
        assert_eq!(trim_space(b"  \xffabc\xfe  "), b"\xffabc\xfe");
        assert_eq!(trim_space(b"\xc2"), b"\xc2");
        assert_eq!(trim_space(b" \t\n"), b"");
        assert_eq!(trim_space(b""), b"");
        // Interior whitespace is kept
        assert_eq!(trim_space("a\u{a0}b".as_bytes()), "a\u{a0}b".as_bytes());
    }

    #[test]
    fn test_cataloged_example_metadata() {
        let example = Example::cataloged("auth", "login", b"FB.login();".to_vec());

        assert_eq!(example.name, "login");
        assert_eq!(example.title, "auth · login");
        assert_eq!(example.url, "/auth/login");
        assert!(example.auto_run);
    }

    #[test]
    fn test_stored_example_metadata() {
        let example = Example::stored("/saved/abc", b"x".to_vec());

        assert!(example.name.is_empty());
        assert_eq!(example.title, STORED_TITLE);
        assert_eq!(example.url, "/saved/abc");
        assert!(!example.auto_run);
    }

    #[test]
    fn test_empty_example_is_shared() {
        let a = empty_example();
        let b = empty_example();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.title, "Welcome");
        assert_eq!(a.url, "/");
        assert!(a.auto_run);
        assert!(a.content.is_empty());
    }

    #[test]
    fn test_example_serializes_auto_run_only() {
        let example = Example::cataloged("auth", "login", b"secret".to_vec());
        let json = serde_json::to_string(&example).unwrap();
        assert_eq!(json, r#"{"autoRun":true}"#);
    }
}
