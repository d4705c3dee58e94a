//! Normalization of rasterizer output into stored frame text.
//!
//! Rasterizers may hand back plain text with any line-ending convention, or an HTML fragment (a
//! single table cell whose rows are separated by `<br>` tags and whose characters are
//! entity-encoded). Both become plain text with `\n` row separators.
//!
//! In markup that contains at least one `<br>`, literal CR/LF characters are source formatting
//! and are dropped. Without any `<br>`, they are row separators. One trailing row terminator is
//! removed in either case, so `"ab<br/>cd<br/>"` and `"ab\ncd\n"` both become `"ab\ncd"`.

const MARKUP_TAGS: [&str; 7] = ["br", "td", "tr", "table", "pre", "div", "span"];
const ENTITY_PREFIXES: [&str; 5] = ["&nbsp;", "&amp;", "&lt;", "&gt;", "&#"];

pub(crate) fn normalize_raster_text(raw: &str) -> String {
    let mut out = if is_markup(raw) {
        from_markup(cell_body(raw))
    } else {
        raw.replace("\r\n", "\n").replace('\r', "\n")
    };
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

fn is_markup(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    MARKUP_TAGS
        .iter()
        .any(|name| find_tag(&lower, name).is_some())
        || ENTITY_PREFIXES.iter().any(|p| lower.contains(p))
}

/// Inner content of the first `<td>` element, or the whole input when there is none.
fn cell_body(raw: &str) -> &str {
    let lower = raw.to_ascii_lowercase();
    let Some(open) = find_tag(&lower, "td") else {
        return raw;
    };
    let Some(open_end) = lower[open..].find('>').map(|i| open + i + 1) else {
        return raw;
    };
    let close = lower[open_end..]
        .find("</td")
        .map(|i| open_end + i)
        .unwrap_or(raw.len());
    &raw[open_end..close]
}

/// Byte offset of the next `<name` tag start (followed by `>`, `/` or whitespace).
fn find_tag(lower: &str, name: &str) -> Option<usize> {
    let needle = format!("<{name}");
    let mut at = 0;
    while let Some(i) = lower[at..].find(&needle) {
        let start = at + i;
        let boundary = match lower[start + needle.len()..].chars().next() {
            Some('>' | '/') => true,
            Some(c) => c.is_ascii_whitespace(),
            None => false,
        };
        if boundary {
            return Some(start);
        }
        at = start + needle.len();
    }
    None
}

fn from_markup(body: &str) -> String {
    let has_br = find_tag(&body.to_ascii_lowercase(), "br").is_some();
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(c) = rest.chars().next() {
        match c {
            '<' => match rest.find('>') {
                Some(end) => {
                    if tag_name(&rest[1..end]).eq_ignore_ascii_case("br") {
                        out.push('\n');
                    }
                    rest = &rest[end + 1..];
                }
                None => {
                    out.push('<');
                    rest = &rest[1..];
                }
            },
            '&' => {
                let (decoded, used) = decode_entity(rest);
                out.push(decoded);
                rest = &rest[used..];
            }
            '\r' | '\n' if has_br => {
                rest = &rest[1..];
            }
            '\r' => {
                out.push('\n');
                rest = rest.strip_prefix("\r\n").unwrap_or(&rest[1..]);
            }
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

fn tag_name(inner: &str) -> &str {
    let inner = inner.trim_start_matches('/').trim_start();
    let end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Decode one entity at the start of `s` (which begins with `&`).
///
/// Returns the decoded char and the number of bytes consumed. Unknown or malformed entities decode
/// to a literal `&` consuming one byte. `&nbsp;` decodes to an ordinary space.
fn decode_entity(s: &str) -> (char, usize) {
    const MAX_ENTITY_LEN: usize = 12;

    let Some(semi) = s.char_indices().take(MAX_ENTITY_LEN).find(|&(_, c)| c == ';') else {
        return ('&', 1);
    };
    let name = &s[1..semi.0];
    let used = semi.0 + 1;

    let decoded = match name {
        "nbsp" | "#160" | "#xa0" | "#xA0" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => numeric_entity(name),
    };
    match decoded {
        Some(c) => (c, used),
        None => ('&', 1),
    }
}

fn numeric_entity(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/text.rs"]
mod tests;
