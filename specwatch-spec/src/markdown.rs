//! Line-level helpers for the spec markdown dialect.

/// One trimmed line of a spec document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    /// `# subject`
    Title(&'a str),
    /// `## section`
    Section(&'a str),
    /// `### block`
    Subsection(&'a str),
    /// `- text`
    Bullet(&'a str),
    /// `| a | b |`, already split into trimmed cells.
    Row(Vec<&'a str>),
    /// `|---|:--:|`
    Divider,
    Text(&'a str),
}

impl<'a> Line<'a> {
    pub(crate) fn classify(raw: &'a str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            return Self::Blank;
        }
        if let Some(rest) = line.strip_prefix("### ") {
            return Self::Subsection(rest.trim());
        }
        if let Some(rest) = line.strip_prefix("## ") {
            return Self::Section(rest.trim());
        }
        if let Some(rest) = line.strip_prefix("# ") {
            return Self::Title(rest.trim());
        }
        if let Some(rest) = line.strip_prefix("- ") {
            return Self::Bullet(rest.trim());
        }
        if is_table_row(line) {
            if is_table_divider(line) {
                return Self::Divider;
            }
            return Self::Row(table_cells(line));
        }
        Self::Text(line)
    }
}

pub(crate) fn is_table_row(line: &str) -> bool {
    line.starts_with('|') && line.ends_with('|')
}

pub(crate) fn is_table_divider(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

pub(crate) fn table_cells(line: &str) -> Vec<&str> {
    line.trim_matches('|').split('|').map(str::trim).collect()
}

/// Text between the first backtick and the next one; empty if unterminated.
pub(crate) fn backtick_value(s: &str) -> &str {
    let Some(start) = s.find('`') else {
        return "";
    };
    let rest = &s[start + 1..];
    match rest.find('`') {
        Some(end) => &rest[..end],
        None => "",
    }
}

/// The backtick value if present, otherwise the trimmed text.
pub(crate) fn backtick_or_text(s: &str) -> &str {
    match backtick_value(s) {
        "" => s.trim(),
        v => v,
    }
}
