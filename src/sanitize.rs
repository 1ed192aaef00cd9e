//! URL sanitization and HTML escaping for editor input and page output.
//!
//! `esc_url_raw` is applied before a value is persisted; `esc_url` and
//! `esc_attr` are applied whenever a value is written into markup.

/// Schemes accepted by `esc_url_raw`. Anything else collapses to "".
pub const ALLOWED_PROTOCOLS: [&str; 22] = [
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "irc6", "ircs", "gopher", "nntp",
    "feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

/// Clean a URL for storage.
///
/// Strips characters that may not appear in a URL, removes encoded line
/// breaks, defaults scheme-less hosts to `http://`, and rejects schemes
/// outside [`ALLOWED_PROTOCOLS`]. Does not check that the target exists.
pub fn esc_url_raw(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    let filtered: String = url.chars().filter(|c| is_url_char(*c)).collect();
    let mut cleaned = strip_encoded_newlines(&filtered).replace(";//", "://");
    if cleaned.is_empty() {
        return cleaned;
    }

    if !cleaned.contains(':') && !cleaned.starts_with(['/', '#', '?']) {
        cleaned.insert_str(0, "http://");
    }

    if !has_allowed_protocol(&cleaned) {
        return String::new();
    }

    cleaned
}

/// Clean a URL for display inside an attribute.
pub fn esc_url(url: &str) -> String {
    // A stored `&amp;` is already an encoded `&`.
    esc_url_raw(url)
        .replace("&amp;", "&")
        .replace('&', "&#038;")
        .replace('\'', "&#039;")
}

/// Escape a value for safe inclusion in an HTML attribute.
pub fn esc_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text content. Same rules as attributes.
pub fn esc_html(value: &str) -> String {
    esc_attr(value)
}

fn is_url_char(c: char) -> bool {
    if !c.is_ascii() {
        return !c.is_control();
    }
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '~'
                | '+'
                | '_'
                | '.'
                | '?'
                | '#'
                | '='
                | '!'
                | '&'
                | ';'
                | ','
                | '/'
                | ':'
                | '%'
                | '@'
                | '$'
                | '|'
                | '*'
                | '\''
                | '('
                | ')'
                | '['
                | ']'
        )
}

/// Remove `%0d` / `%0a` until none remain, so nested encodings such as
/// `%0%0dd` cannot reassemble one.
fn strip_encoded_newlines(value: &str) -> String {
    let mut current = value.to_string();
    loop {
        let mut next = current.clone();
        for needle in ["%0d", "%0D", "%0a", "%0A"] {
            next = next.replace(needle, "");
        }
        if next == current {
            return next;
        }
        current = next;
    }
}

fn has_allowed_protocol(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return true;
    };
    // A colon after a path, query or fragment does not start a scheme.
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    ALLOWED_PROTOCOLS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_strips_markup_characters() {
        assert_eq!(
            esc_url_raw(r#"https://example.com/en"><script>"#),
            "https://example.com/enscript"
        );
    }

    #[test]
    fn raw_keeps_well_formed_urls() {
        let url = "https://example.com/en/path?q=1&lang=en#top";
        assert_eq!(esc_url_raw(url), url);
        assert_eq!(esc_url_raw("https://例え.jp/ページ"), "https://例え.jp/ページ");
    }

    #[test]
    fn raw_removes_whitespace_and_encoded_newlines() {
        assert_eq!(esc_url_raw("  https://exa mple.com/\n "), "https://example.com/");
        assert_eq!(
            esc_url_raw("https://example.com/%0%0dda"),
            "https://example.com/a"
        );
    }

    #[test]
    fn raw_defaults_missing_scheme_to_http() {
        assert_eq!(esc_url_raw("example.com/id"), "http://example.com/id");
        assert_eq!(esc_url_raw("/relative/path"), "/relative/path");
        assert_eq!(esc_url_raw("#anchor"), "#anchor");
    }

    #[test]
    fn raw_rejects_disallowed_schemes() {
        assert_eq!(esc_url_raw("javascript:alert(1)"), "");
        assert_eq!(esc_url_raw("data:text/html,hi"), "");
        assert_eq!(esc_url_raw("HTTPS://example.com"), "HTTPS://example.com");
    }

    #[test]
    fn raw_of_blank_input_is_empty() {
        assert_eq!(esc_url_raw(""), "");
        assert_eq!(esc_url_raw("   "), "");
        assert_eq!(esc_url_raw("<>\""), "");
    }

    #[test]
    fn display_url_encodes_ampersands_and_quotes() {
        assert_eq!(
            esc_url("https://example.com/?a=1&b='2'"),
            "https://example.com/?a=1&#038;b=&#039;2&#039;"
        );
    }

    #[test]
    fn display_url_does_not_double_encode_stored_entities() {
        assert_eq!(
            esc_url("https://example.com/?a=1&amp;b=2"),
            "https://example.com/?a=1&#038;b=2"
        );
    }

    #[test]
    fn attr_escapes_html_specials() {
        assert_eq!(
            esc_attr(r#"a"b<c>&'d"#),
            "a&quot;b&lt;c&gt;&amp;&#039;d"
        );
        assert_eq!(esc_attr("plain"), "plain");
    }
}
