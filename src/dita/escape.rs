//! Pure escaping and cleanup utilities for rendered DITA content.

use memchr::memchr3;

/// Escape `&`, `<`, and `>` for XML text content.
///
/// The function is idempotent: an ampersand that already begins a
/// recognized entity (`&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, or a
/// numeric character reference) passes through unchanged, so escaping
/// text twice never produces `&amp;amp;`. Renderers escape raw text at
/// the leaves and concatenate child output verbatim; idempotence keeps
/// mixed pre-escaped input safe.
///
/// # Examples
///
/// ```
/// use ditagen::dita::escape_xml;
///
/// assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_xml("already &amp; escaped"), "already &amp; escaped");
/// ```
pub fn escape_xml(text: &str) -> String {
    let bytes = text.as_bytes();
    if memchr3(b'&', b'<', b'>', bytes).is_none() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut i = 0;
    while i < bytes.len() {
        let Some(offset) = memchr3(b'&', b'<', b'>', &bytes[i..]) else {
            out.push_str(&text[i..]);
            break;
        };
        let pos = i + offset;
        out.push_str(&text[i..pos]);
        match bytes[pos] {
            b'<' => out.push_str("&lt;"),
            b'>' => out.push_str("&gt;"),
            _ => {
                if let Some(len) = entity_len(&bytes[pos..]) {
                    out.push_str(&text[pos..pos + len]);
                    i = pos + len;
                    continue;
                }
                out.push_str("&amp;");
            }
        }
        i = pos + 1;
    }
    out
}

/// Length of a recognized entity starting at an `&`, or `None` if the
/// ampersand is bare and must be escaped.
fn entity_len(bytes: &[u8]) -> Option<usize> {
    const NAMED: [&[u8]; 5] = [b"&amp;", b"&lt;", b"&gt;", b"&quot;", b"&apos;"];
    for name in NAMED {
        if bytes.starts_with(name) {
            return Some(name.len());
        }
    }

    // Numeric character reference: &#10; or &#x1F600;
    if bytes.len() >= 2 && bytes[1] == b'#' {
        let mut i = 2;
        if i < bytes.len() && (bytes[i] == b'x' || bytes[i] == b'X') {
            i += 1;
        }
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_hexdigit() {
            i += 1;
        }
        if i > digits_start && i < bytes.len() && bytes[i] == b';' {
            return Some(i + 1);
        }
    }

    None
}

/// Strip stray `<<`/`>>` sequences left over from unresolved source
/// reference syntax before the content is wrapped in a topic body.
pub fn sanitize(content: &str) -> String {
    content.replace("<<", "").replace(">>", "")
}

/// Identifier slug derived from a title: spaces become underscores.
///
/// # Examples
///
/// ```
/// use ditagen::dita::slug;
///
/// assert_eq!(slug("Getting Started"), "Getting_Started");
/// ```
pub fn slug(title: &str) -> String {
    title.replace(' ', "_")
}
