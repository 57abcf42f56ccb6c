//! Contextual labels attached to a logger
//!
//! Labels are rendered once, when they change, into the string that fills
//! the `${labels}` slot of every line.

use super::format::{self, Segment, LABELS_PLACEHOLDER};
use std::sync::Arc;

const LABELS_FORMAT_SLOT: &str = "%[1]s";

pub const DEFAULT_LABELS_FORMAT: &str = LABELS_PLACEHOLDER;
pub const DEFAULT_LABELS_SEPARATOR: &str = " ";

/// Turn a user label template such as `"(${labels})"` into its compiled
/// form, escaping every other control character.
pub fn parse_labels_format(raw: &str) -> String {
    format::escape(raw).replace(LABELS_PLACEHOLDER, LABELS_FORMAT_SLOT)
}

/// An ordered set of label values with their pre-rendered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    values: Vec<String>,
    separator: String,
    format: String,
    rendered: String,
}

impl Labels {
    /// Build a label set. `format` must already be compiled with
    /// [`parse_labels_format`]; empty values are dropped.
    pub fn new<I, S>(format: impl Into<String>, values: I, separator: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(Into::into)
            .filter(|value| !value.is_empty())
            .collect();
        Self::build(format.into(), values, separator.into())
    }

    fn build(format: String, values: Vec<String>, separator: String) -> Self {
        let rendered = if values.is_empty() {
            String::new()
        } else {
            let segments = format::parse_segments(&format);
            if segments.iter().any(|s| matches!(s, Segment::Slot(1))) {
                let joined = values.join(&separator);
                let mut out = String::with_capacity(format.len() + joined.len());
                format::render_segments(&segments, &[&joined], &mut out);
                out
            } else {
                // No slot: the template text stands in for the values.
                let mut out = String::with_capacity(format.len());
                format::render_segments(&segments, &[], &mut out);
                out
            }
        };

        Self {
            values,
            separator,
            format,
            rendered,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The compiled label template.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The string substituted into the `${labels}` slot.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Append values, skipping empty ones. Returns `self` when nothing was
    /// actually added.
    #[must_use]
    pub fn add<I, S>(self: &Arc<Self>, new_values: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = self.values.clone();
        values.extend(
            new_values
                .into_iter()
                .map(Into::into)
                .filter(|value| !value.is_empty()),
        );
        if values.len() == self.values.len() {
            return Arc::clone(self);
        }
        Arc::new(Self::build(self.format.clone(), values, self.separator.clone()))
    }

    #[must_use]
    pub fn clear(self: &Arc<Self>) -> Arc<Self> {
        if self.is_empty() {
            return Arc::clone(self);
        }
        Arc::new(Self {
            values: Vec::new(),
            separator: self.separator.clone(),
            format: self.format.clone(),
            rendered: String::new(),
        })
    }

    #[must_use]
    pub fn set_separator(self: &Arc<Self>, separator: &str) -> Arc<Self> {
        if self.separator == separator {
            return Arc::clone(self);
        }
        Arc::new(Self::build(
            self.format.clone(),
            self.values.clone(),
            separator.to_string(),
        ))
    }

    /// Replace the compiled label template.
    #[must_use]
    pub fn set_format(self: &Arc<Self>, format: &str) -> Arc<Self> {
        if self.format == format {
            return Arc::clone(self);
        }
        Arc::new(Self::build(
            format.to_string(),
            self.values.clone(),
            self.separator.clone(),
        ))
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::build(
            parse_labels_format(DEFAULT_LABELS_FORMAT),
            Vec::new(),
            DEFAULT_LABELS_SEPARATOR.to_string(),
        )
    }
}
