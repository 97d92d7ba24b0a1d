use crate::span::SpanKind;

/// Errors produced while building, converting or rendering nodes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("leaf node requires a value")]
    InvalidNode,

    #[error("parent node requires a tag")]
    MissingTag,

    #[error("parent node requires children")]
    MissingChildren,

    #[error("unsupported span kind: {0}")]
    UnsupportedSpanKind(String),

    #[error("{0} span requires a target url")]
    MissingTarget(SpanKind),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
