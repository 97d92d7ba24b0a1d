use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inline role of a text span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum SpanKind {
    PlainText,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SpanKind::PlainText => "plain_text",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        }
    }

    /// Resolve an optional kind name. An absent name is unsupported.
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        match name {
            Some(name) => name.parse(),
            None => Err(Error::UnsupportedSpanKind("<none>".to_string())),
        }
    }
}

impl FromStr for SpanKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plain_text" | "text" => Ok(SpanKind::PlainText),
            "bold" => Ok(SpanKind::Bold),
            "italic" => Ok(SpanKind::Italic),
            "code" => Ok(SpanKind::Code),
            "link" => Ok(SpanKind::Link),
            "image" => Ok(SpanKind::Image),
            other => Err(Error::UnsupportedSpanKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for SpanKind {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inline run of source text awaiting conversion to a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTextSpan")]
pub struct TextSpan {
    pub text: String,
    pub kind: SpanKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
            target: None,
        }
    }

    pub fn with_target(
        text: impl Into<String>,
        kind: SpanKind,
        target: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            kind,
            target: Some(target.into()),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::PlainText)
    }

    /// Build a span from an untyped kind name, as read from external data.
    pub fn from_parts(text: &str, kind: Option<&str>, target: Option<&str>) -> Result<Self> {
        Ok(Self {
            text: text.to_string(),
            kind: SpanKind::from_name(kind)?,
            target: target.map(str::to_string),
        })
    }
}

// Kinds arrive as free-form names so absent or unknown ones report
// UnsupportedSpanKind rather than a generic serde error.
#[derive(Deserialize)]
struct RawTextSpan {
    text: String,
    kind: Option<String>,
    target: Option<String>,
}

impl TryFrom<RawTextSpan> for TextSpan {
    type Error = Error;

    fn try_from(raw: RawTextSpan) -> Result<Self> {
        TextSpan::from_parts(&raw.text, raw.kind.as_deref(), raw.target.as_deref())
    }
}
