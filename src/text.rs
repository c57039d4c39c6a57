//! String helpers and value emptiness checks.

use serde_json::Value;

/// Whether a value is present and not `null`.
pub fn is_set(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

/// Emptiness: `null`, `false`, zero, `""`, empty arrays and empty objects.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Remove every key of an object or every item of an array.
pub fn clear(value: &mut Value) {
    match value {
        Value::Object(map) => map.clear(),
        Value::Array(items) => items.clear(),
        _ => {}
    }
}

fn strip_set(chars: Option<&str>) -> impl Fn(char) -> bool + '_ {
    move |c| match chars {
        Some(set) => set.contains(c),
        None => c.is_whitespace(),
    }
}

/// Strip leading characters in `chars` (whitespace when `None`).
pub fn trim_left<'a>(s: &'a str, chars: Option<&str>) -> &'a str {
    s.trim_start_matches(strip_set(chars))
}

/// Strip trailing characters in `chars` (whitespace when `None`).
pub fn trim_right<'a>(s: &'a str, chars: Option<&str>) -> &'a str {
    s.trim_end_matches(strip_set(chars))
}

/// Strip leading and trailing characters in `chars`.
pub fn trim<'a>(s: &'a str, chars: Option<&str>) -> &'a str {
    trim_left(trim_right(s, chars), chars)
}

/// Byte offset of `needle` in `haystack`, ASCII-case-insensitively when
/// `case_sensitive` is false.
fn find(haystack: &str, needle: &str, case_sensitive: bool) -> Option<usize> {
    if case_sensitive {
        haystack.find(needle)
    } else {
        haystack
            .to_ascii_lowercase()
            .find(&needle.to_ascii_lowercase())
    }
}

/// Append `word` to a `separator`-delimited list unless it is already there.
pub fn append_sub_string(s: &str, word: &str, separator: &str, case_sensitive: bool) -> String {
    if word.is_empty() {
        return s.to_string();
    }
    let padded = format!("{separator}{s}{separator}");
    let needle = format!("{separator}{word}{separator}");
    if find(&padded, &needle, case_sensitive).is_some() {
        return s.to_string();
    }
    if s.is_empty() {
        word.to_string()
    } else {
        format!("{s}{separator}{word}")
    }
}

/// Remove the first occurrence of `word` from a `separator`-delimited list.
pub fn remove_sub_string(s: &str, word: &str, separator: &str, case_sensitive: bool) -> String {
    if s.is_empty() || word.is_empty() {
        return s.to_string();
    }
    let padded = format!("{separator}{s}{separator}");
    let needle = format!("{separator}{word}{separator}");
    let Some(at) = find(&padded, &needle, case_sensitive) else {
        return s.to_string();
    };
    let mut replaced = String::with_capacity(padded.len());
    replaced.push_str(&padded[..at]);
    replaced.push_str(separator);
    replaced.push_str(&padded[at + needle.len()..]);

    let inner = replaced
        .strip_prefix(separator)
        .and_then(|rest| rest.strip_suffix(separator))
        .unwrap_or("");
    inner.to_string()
}

/// How many times to repeat in [`str_repeat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Exactly this many copies.
    Times(usize),
    /// As many copies as needed to fill this many characters, cut to fit.
    Length(usize),
}

/// Repeat `s`, either a number of times or up to a character length.
pub fn str_repeat(s: &str, repeat: Repeat) -> String {
    match repeat {
        Repeat::Times(n) => s.repeat(n),
        Repeat::Length(len) => {
            if s.is_empty() {
                return String::new();
            }
            s.chars().cycle().take(len).collect()
        }
    }
}

/// Side on which [`str_pad`] adds padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadType {
    Left,
    #[default]
    Right,
    Both,
}

/// Pad `input` to `pad_length` characters with repetitions of `pad`.
///
/// Inputs already at least `pad_length` long are returned unchanged.
pub fn str_pad(input: &str, pad_length: usize, pad: &str, pad_type: PadType) -> String {
    let len = input.chars().count();
    if pad_length <= len || pad.is_empty() {
        return input.to_string();
    }
    let to_go = pad_length - len;
    match pad_type {
        PadType::Left => format!("{}{}", str_repeat(pad, Repeat::Length(to_go)), input),
        PadType::Right => format!("{}{}", input, str_repeat(pad, Repeat::Length(to_go))),
        PadType::Both => {
            let half = str_repeat(pad, Repeat::Length(to_go.div_ceil(2)));
            format!("{half}{input}{half}")
                .chars()
                .take(pad_length)
                .collect()
        }
    }
}

/// Suffix check that is false for empty inputs.
pub fn ends_with(s: &str, suffix: &str) -> bool {
    !s.is_empty() && !suffix.is_empty() && s.ends_with(suffix)
}
