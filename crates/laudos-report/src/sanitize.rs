//! Escaping of model output for embedding in markup, tags left intact.

use std::sync::LazyLock;

use regex::Regex;

/// A `<...>` span, or a maximal run of characters that are neither `<` nor `>`.
static RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>|[^<>]+").expect("run pattern is valid"));

/// Escape text runs of `text` while passing tag spans through untouched.
///
/// Stray `<` or `>` that do not form a tag are escaped as well. Character
/// entities already present in a text run are not escaped again, so
/// `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut last = 0;

    for run in RUNS.find_iter(text) {
        if run.start() > last {
            escape_into(&text[last..run.start()], &mut out);
        }
        let s = run.as_str();
        if s.starts_with('<') {
            out.push_str(s);
        } else {
            escape_into(s, &mut out);
        }
        last = run.end();
    }
    if last < text.len() {
        escape_into(&text[last..], &mut out);
    }

    out
}

fn escape_into(text: &str, out: &mut String) {
    for (i, c) in text.char_indices() {
        match c {
            '&' if is_entity(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

/// Whether `s` (starting at `&`) begins with a named or numeric entity.
fn is_entity(s: &str) -> bool {
    let Some(end) = s[1..].find(';') else {
        return false;
    };
    let name = &s[1..1 + end];
    match name {
        "amp" | "lt" | "gt" | "quot" | "apos" => true,
        _ => {
            if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                !hex.is_empty() && hex.len() <= 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
            } else if let Some(dec) = name.strip_prefix('#') {
                !dec.is_empty() && dec.len() <= 7 && dec.chars().all(|c| c.is_ascii_digit())
            } else {
                false
            }
        }
    }
}
