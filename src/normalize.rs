//! Title and description normalization.
//!
//! The feed's titles are free text shaped like
//! `"iOS 17.5.1 (21F90) for iPhone has been released."`. Structure is
//! recovered by a fixed chain of string heuristics: release suffix, device
//! marker, trailing build parenthetical, then platform/version split. Order
//! matters, because each stage consumes the previous stage's output. The
//! chain never fails; anything it cannot place just comes out empty.
//!
//! Descriptions get a deliberately naive treatment: a character-scan tag
//! stripper with no notion of nesting or of `>` inside quoted attribute
//! values. That matches what the feed actually needs, and the limitation is
//! kept on purpose.

/// Trailing release phrases, tried in order; the first match is stripped.
const RELEASE_SUFFIXES: [&str; 4] = [
    " has been released.",
    " has been released",
    " released.",
    " released",
];

/// Phrase that separates a description's boilerplate from its notes.
const RELEASED_PHRASE: &str = "has been released";

/// Structured fields recovered from one raw title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleParts {
    /// First whitespace token of the remaining main part, uncanonicalized.
    pub platform_token: String,
    pub version: String,
    pub build: String,
    pub device: String,
    pub pre_release: bool,
}

/// Run the full title pipeline in its fixed order.
pub fn normalize_title(raw_title: &str) -> TitleParts {
    let title = trim_release_suffix(raw_title);
    let (main, device) = split_device(&title);
    let (base, build) = split_build(&main);
    let (platform_token, version) = split_platform_version(&base);
    let pre_release = detect_pre_release(&title);

    TitleParts {
        platform_token,
        version,
        build,
        device,
        pre_release,
    }
}

/// Stage 1: strip one trailing release phrase, case-insensitively.
///
/// Only the first matching suffix is removed; a title that still ends with
/// another release phrase afterwards keeps it.
pub fn trim_release_suffix(title: &str) -> String {
    let title = title.trim();
    for suffix in RELEASE_SUFFIXES {
        if let Some(stripped) = strip_suffix_ignore_ascii_case(title, suffix) {
            return stripped.trim().to_string();
        }
    }
    title.to_string()
}

/// Stage 2: split on the first case-insensitive `" for "`. Everything after
/// it is the raw device string.
pub fn split_device(title: &str) -> (String, String) {
    const MARKER: &str = " for ";
    match find_ignore_ascii_case(title, MARKER) {
        Some(idx) => (
            title[..idx].trim().to_string(),
            title[idx + MARKER.len()..].trim().to_string(),
        ),
        None => (title.trim().to_string(), String::new()),
    }
}

/// Stage 3: peel a trailing parenthesized build off the main part.
///
/// The last `(` only counts as a build marker when it is not at position 0,
/// the parens hold non-whitespace content, and that content has no nested
/// parens. Anything else (unbalanced, empty, leading parenthetical) leaves
/// the main part untouched.
pub fn split_build(main: &str) -> (String, String) {
    let main = main.trim();
    if main.ends_with(')') {
        if let Some(start) = main.rfind('(') {
            if start > 0 && start < main.len() - 1 {
                let content = main[start + 1..main.len() - 1].trim();
                if !content.is_empty() && !content.contains('(') && !content.contains(')') {
                    return (main[..start].trim().to_string(), content.to_string());
                }
            }
        }
    }
    (main.to_string(), String::new())
}

/// Stage 4: first whitespace token is the platform label, the rest rejoined
/// with single spaces is the version. A blank main part yields the literal
/// platform label "Other".
pub fn split_platform_version(base: &str) -> (String, String) {
    let mut tokens = base.split_whitespace();
    match tokens.next() {
        None => ("Other".to_string(), String::new()),
        Some(platform) => (platform.to_string(), tokens.collect::<Vec<_>>().join(" ")),
    }
}

/// Stage 6: keyword scan on the suffix-stripped title. Plain substring
/// matching, so "rc" inside a longer word also counts.
pub fn detect_pre_release(title: &str) -> bool {
    let lower = title.to_lowercase();
    lower.contains("beta") || lower.contains("rc") || lower.contains("release candidate")
}

/// Full description treatment: strip tags, decode entities, collapse
/// whitespace.
pub fn normalize_description(raw: &str) -> String {
    normalize_space(&decode_entities(&strip_tags(raw)))
}

/// Character-scan tag stripper. Everything from `<` up to the next `>` is
/// swallowed, and the delimiters themselves are never emitted; a stray `>`
/// outside any tag disappears too. No nesting, no quoted-attribute
/// awareness.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Decode the standard XML character entities and numeric references, one
/// occurrence at a time. A candidate the decoder rejects (stray `&`, unknown
/// named entity) keeps its `&` verbatim while scanning continues, so one bad
/// token never blocks the valid entities around it.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match decode_entity_at(tail) {
            Some((decoded, consumed)) => {
                out.push_str(&decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the single `&…;` candidate at the start of `text`, returning the
/// replacement and the byte length consumed. `None` when no terminated
/// candidate exists or the decoder rejects it.
fn decode_entity_at(text: &str) -> Option<(String, usize)> {
    let end = text.find(';')?;
    let candidate = &text[..=end];
    match quick_xml::escape::unescape(candidate) {
        Ok(decoded) => Some((decoded.into_owned(), end + 1)),
        Err(_) => None,
    }
}

/// Collapse every whitespace run (spaces, tabs, newlines) to a single space
/// and trim the ends.
pub fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trailing notes: the normalized text after the first case-insensitive
/// "has been released" in an already-cleaned description, or empty when the
/// phrase is absent. The phrase's own sentence-final period is consumed with
/// it, so notes start at the actual free text.
pub fn notes_from_description(description: &str) -> String {
    match find_ignore_ascii_case(description, RELEASED_PHRASE) {
        Some(idx) => {
            let after = description[idx + RELEASED_PHRASE.len()..].trim_start();
            let after = after.strip_prefix('.').unwrap_or(after);
            normalize_space(after)
        }
        None => String::new(),
    }
}

/// ASCII-case-insensitive suffix strip that never slices mid-character.
///
/// Lowercasing a whole title can change its byte length (e.g. dotted
/// uppercase I), so matching happens on the original bytes instead; the
/// needle is ASCII, which makes the returned boundary safe.
fn strip_suffix_ignore_ascii_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    if text.len() < suffix.len() {
        return None;
    }
    let split = text.len() - suffix.len();
    if !text.is_char_boundary(split) {
        return None;
    }
    if text[split..].eq_ignore_ascii_case(suffix) {
        Some(&text[..split])
    } else {
        None
    }
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
/// Same boundary reasoning as the suffix strip: an ASCII match can only
/// start and end on character boundaries.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if haystack.len() < needle.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
