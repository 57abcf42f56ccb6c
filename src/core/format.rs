//! Message template compilation
//!
//! A human-authored format such as `"[${level}] ${labels} ${msg}"` is
//! compiled into a positional template where `%[1]s` is the level name,
//! `%[2]s` the rendered labels and `%[3]s` the message. Literal `%` is
//! escaped as `%%`, so user text can never be mistaken for a slot.

use std::sync::Arc;

pub const DEFAULT_FORMAT: &str = "[${level}] ${labels} ${msg}\n";

pub const LEVEL_PLACEHOLDER: &str = "${level}";
pub const LABELS_PLACEHOLDER: &str = "${labels}";
pub const MESSAGE_PLACEHOLDER: &str = "${msg}";

pub(crate) const LEVEL_SLOT: &str = "%[1]s";
pub(crate) const LABELS_SLOT: &str = "%[2]s";
pub(crate) const MESSAGE_SLOT: &str = "%[3]s";

const NEW_LINE: char = '\n';

/// Escape template control characters so they render literally.
pub(crate) fn escape(raw: &str) -> String {
    raw.replace('%', "%%")
}

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    /// Positional slot, 1-based.
    Slot(usize),
}

/// Split a compiled template into literals and slots.
///
/// `%%` becomes a literal `%`, `%[n]s` becomes slot `n`. Anything else
/// starting with `%` is kept as literal text.
pub(crate) fn parse_segments(compiled: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = compiled;

    while let Some(pos) = rest.find('%') {
        literal.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(after) = rest.strip_prefix("%%") {
            literal.push('%');
            rest = after;
            continue;
        }

        match parse_slot(rest) {
            Some((slot, consumed)) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Slot(slot));
                rest = &rest[consumed..];
            }
            None => {
                literal.push('%');
                rest = &rest[1..];
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Parse `%[n]s` at the start of `s`, returning the slot and bytes consumed.
fn parse_slot(s: &str) -> Option<(usize, usize)> {
    let inner = s.strip_prefix("%[")?;
    let close = inner.find(']')?;
    let slot: usize = inner[..close].parse().ok()?;
    inner[close + 1..].starts_with('s').then_some((slot, close + 4))
}

/// Substitute `args` into `segments`; slot `n` takes `args[n - 1]`.
pub(crate) fn render_segments(segments: &[Segment], args: &[&str], out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Slot(slot) => {
                if let Some(arg) = slot.checked_sub(1).and_then(|i| args.get(i)) {
                    out.push_str(arg);
                }
            }
        }
    }
}

/// A compiled message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    original: String,
    value: String,
    has_labels: bool,
    segments: Vec<Segment>,
}

impl Format {
    /// Compile `raw` knowing whether the logger currently has labels.
    ///
    /// Without labels the `${labels}` placeholder is removed together with
    /// one surrounding space on each side, so `"a ${labels} b"` becomes
    /// `"a b"`. A format without `${msg}` gets the message appended. The
    /// result always ends with exactly one newline.
    pub fn compile(raw: &str, has_labels: bool) -> Self {
        let mut value = escape(raw).replace(LEVEL_PLACEHOLDER, LEVEL_SLOT);

        if has_labels {
            value = value.replace(LABELS_PLACEHOLDER, LABELS_SLOT);
        } else {
            value = value
                .replace(" ${labels} ", " ")
                .replace(LABELS_PLACEHOLDER, "");
        }

        if value.contains(MESSAGE_PLACEHOLDER) {
            value = value.replace(MESSAGE_PLACEHOLDER, MESSAGE_SLOT);
        } else {
            if !value.is_empty() && !value.ends_with([' ', NEW_LINE]) {
                value.push(' ');
            }
            value.push_str(MESSAGE_SLOT);
            value.push(NEW_LINE);
        }

        let mut value = value.trim().to_string();
        if !value.ends_with(NEW_LINE) {
            value.push(NEW_LINE);
        }

        let segments = parse_segments(&value);
        Self {
            original: raw.to_string(),
            value,
            has_labels,
            segments,
        }
    }

    /// Recompile for a different label presence; identity when unchanged.
    #[must_use]
    pub fn with_labels(self: &Arc<Self>, has_labels: bool) -> Arc<Self> {
        if self.has_labels == has_labels {
            return Arc::clone(self);
        }
        Arc::new(Self::compile(&self.original, has_labels))
    }

    #[must_use]
    pub fn clear_labels(self: &Arc<Self>) -> Arc<Self> {
        self.with_labels(false)
    }

    /// The format exactly as the author wrote it.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The compiled positional template.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn has_labels(&self) -> bool {
        self.has_labels
    }

    /// Render one line.
    pub fn render(&self, level: &str, labels: &str, message: &str) -> String {
        let mut line =
            String::with_capacity(self.value.len() + level.len() + labels.len() + message.len());
        render_segments(&self.segments, &[level, labels, message], &mut line);
        line
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::compile(DEFAULT_FORMAT, false)
    }
}
