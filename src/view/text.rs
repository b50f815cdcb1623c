// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mgnav-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mgnav and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Cow;

/// Escapes text for insertion into HTML content or a quoted attribute.
///
/// Single pass, so `&lt;` in the input becomes `&amp;lt;` and is never double-interpreted.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Replaces control characters so remote labels can't drive the terminal (ESC sequences,
/// carriage returns, ...).
pub fn sanitize_terminal(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|ch| if ch.is_control() { '\u{FFFD}' } else { ch })
            .collect(),
    )
}

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    let len = text_len(text);
    if len <= max_len {
        return text.to_owned();
    }

    if max_len == 1 {
        return "…".to_owned();
    }

    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::{escape_html, sanitize_terminal, text_len, truncate_with_ellipsis};

    #[test]
    fn escape_html_covers_all_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x&'y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;&#39;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn escape_html_handles_repeated_and_existing_entities() {
        assert_eq!(escape_html("<<>>"), "&lt;&lt;&gt;&gt;");
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn sanitize_terminal_replaces_escape_sequences() {
        assert_eq!(sanitize_terminal("a\x1b[2Jb"), "a\u{FFFD}[2Jb");
        assert_eq!(sanitize_terminal("line\r\nnext"), "line\u{FFFD}\u{FFFD}next");
        assert_eq!(sanitize_terminal("<script>"), "<script>");
    }

    #[test]
    fn truncate_with_ellipsis_handles_small_widths() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
        assert_eq!(truncate_with_ellipsis("h", 1), "h");
        assert_eq!(truncate_with_ellipsis("hello", 2), "h…");
    }

    #[test]
    fn truncate_with_ellipsis_counts_chars_not_bytes() {
        assert_eq!(text_len("αβγ"), 3);
        assert_eq!(truncate_with_ellipsis("αβγ", 2), "α…");
    }
}
