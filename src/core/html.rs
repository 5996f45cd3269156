// src/core/html.rs
// Tolerant, case-insensitive tag scanning. Good enough for the portal's
// server-rendered tables; not a general HTML parser.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Iterator over complete `<tag …>…</tag>` blocks, lowercasing the source once.
/// Blocks are not nested-aware: a block ends at the first matching close tag.
pub struct TagBlocks<'a> {
    src: &'a str,
    lc: String,
    open: String,
    close: String,
    pos: usize,
}

impl<'a> TagBlocks<'a> {
    /// `tag` is the bare name, e.g. `"tr"`.
    pub fn new(src: &'a str, tag: &str) -> Self {
        let tag = to_lower(tag);
        Self {
            src,
            lc: to_lower(src),
            open: join!("<", &tag),
            close: join!("</", &tag, ">"),
            pos: 0,
        }
    }
}

impl<'a> Iterator for TagBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let start = self.lc.get(self.pos..)?.find(&self.open)? + self.pos;
            // `<tr` must not match `<track`
            let after = start + self.open.len();
            let boundary = self.lc[after..].chars().next();
            if !matches!(boundary, Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/') {
                self.pos = after;
                continue;
            }
            let open_end = self.lc[start..].find('>')? + start + 1;
            let end = self.lc[open_end..].find(&self.close)? + open_end + self.close.len();
            self.pos = end;
            return Some(&self.src[start..end]);
        }
    }
}

/// All `<tag …>…</tag>` blocks in `s`.
pub fn tag_blocks<'a>(s: &'a str, tag: &str) -> TagBlocks<'a> {
    TagBlocks::new(s, tag)
}

/// Opening tags only (`<input …>`), for void elements without a close tag.
pub fn openers<'a>(s: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let open = join!("<", &to_lower(tag));
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(rel) = lc.get(pos..).and_then(|rest| rest.find(&open)) {
        let start = pos + rel;
        let after = start + open.len();
        let Some(gt) = lc[after..].find('>') else { break };
        let boundary = lc[after..].chars().next();
        if matches!(boundary, Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/') {
            out.push(&s[start..after + gt + 1]);
        }
        pos = after;
    }
    out
}

/// The `<tag …>` part of a block.
pub fn opener(block: &str) -> &str {
    match block.find('>') {
        Some(e) => &block[..=e],
        None => block,
    }
}

/// Given a complete tag block like `<td ...>INNER</td>`,
/// return the INNER text without the wrapping tags (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Remove all tags, decode entities, collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&super::sanitize::normalize_entities(&out))
}

/// Visible text of a block: inner content with tags stripped.
pub fn block_text(block: &str) -> String {
    strip_tags(inner_after_open_tag(block))
}

/// Attributes of an opening tag as `(lowercased name, value)` pairs.
/// Handles double, single and unquoted values; bare attributes get `""`.
pub fn attrs(opener: &str) -> Vec<(String, String)> {
    let body = opener.trim_start_matches('<').trim_end_matches('>').trim_end_matches('/');
    // skip the tag name
    let body = match body.find(|c: char| c.is_ascii_whitespace()) {
        Some(i) => &body[i..],
        None => return Vec::new(),
    };

    let b = body.as_bytes();
    let n = b.len();
    let mut i = 0usize;
    let mut out = Vec::new();

    while i < n {
        while i < n && b[i].is_ascii_whitespace() { i += 1; }
        let name_start = i;
        while i < n && !b[i].is_ascii_whitespace() && b[i] != b'=' { i += 1; }
        if name_start == i { i += 1; continue; }
        let name = body[name_start..i].to_ascii_lowercase();

        while i < n && b[i].is_ascii_whitespace() { i += 1; }
        if i >= n || b[i] != b'=' {
            out.push((name, s!()));
            continue;
        }
        i += 1; // '='
        while i < n && b[i].is_ascii_whitespace() { i += 1; }

        let value = match b.get(i) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let start = i + 1;
                let end = body[start..].find(q as char).map(|e| start + e).unwrap_or(n);
                i = (end + 1).min(n);
                &body[start..end]
            }
            _ => {
                let start = i;
                while i < n && !b[i].is_ascii_whitespace() { i += 1; }
                &body[start..i]
            }
        };
        out.push((name, super::sanitize::normalize_entities(value)));
    }
    out
}

/// Value of attribute `name` on an opening tag.
pub fn attr(opener: &str, name: &str) -> Option<String> {
    attrs(opener)
        .into_iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// Whether the opener's class list contains `class` (whole word, case-insensitive).
pub fn has_class(opener: &str, class: &str) -> bool {
    attr(opener, "class")
        .map(|v| v.split_ascii_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}
