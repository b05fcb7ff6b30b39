//! Filtering and highlighting helpers for list views.

use html_escape::decode_html_entities;

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Splits `text` into alternating plain and matched segments, matching
/// `query` literally and case-insensitively.
pub fn highlight_segments<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    if query.is_empty() {
        return vec![Segment {
            text,
            matched: false,
        }];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < text.len() {
        if let Some(len) = match_len_at(&text[pos..], query) {
            if plain_start < pos {
                segments.push(Segment {
                    text: &text[plain_start..pos],
                    matched: false,
                });
            }
            segments.push(Segment {
                text: &text[pos..pos + len],
                matched: true,
            });
            pos += len;
            plain_start = pos;
        } else {
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }

    if plain_start < text.len() {
        segments.push(Segment {
            text: &text[plain_start..],
            matched: false,
        });
    }

    segments
}

/// Wraps every match of `query` in `open`/`close`.
pub fn highlight(text: &str, query: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in highlight_segments(text, query) {
        if segment.matched {
            out.push_str(open);
            out.push_str(segment.text);
            out.push_str(close);
        } else {
            out.push_str(segment.text);
        }
    }
    out
}

/// Byte length of the prefix of `text` equal to `query` ignoring case.
fn match_len_at(text: &str, query: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    let mut consumed = 0;

    for q in query.chars() {
        let (idx, t) = text_chars.next()?;
        if !t.to_lowercase().eq(q.to_lowercase()) {
            return None;
        }
        consumed = idx + t.len_utf8();
    }

    Some(consumed)
}

/// Strips HTML tags and decodes entities in upstream descriptions.
pub fn clean_markup(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;

    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }

    decode_html_entities(&stripped).trim().to_string()
}
