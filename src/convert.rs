use crate::config::Config;
use crate::error::{Error, Result};
use crate::node::{LeafNode, Node};
use crate::span::{SpanKind, TextSpan};

/// Convert a text span to its HTML node using default config.
pub fn convert(span: &TextSpan) -> Result<Node> {
    convert_with_config(span, &Config::default())
}

/// Convert a text span to its HTML node with custom config.
pub fn convert_with_config(span: &TextSpan, config: &Config) -> Result<Node> {
    log::trace!("converting {} span {:?}", span.kind, span.text);

    let leaf = match span.kind {
        SpanKind::PlainText => LeafNode::text(&span.text),
        SpanKind::Bold => LeafNode::element("b", &span.text),
        SpanKind::Italic => LeafNode::element("i", &span.text),
        SpanKind::Code => LeafNode::element("code", &span.text),
        SpanKind::Link => {
            let mut link = LeafNode::element("a", &span.text).with_attribute("href", target(span)?);
            for (key, value) in config.links.attributes() {
                link = link.with_attribute(key, value);
            }
            link
        }
        // The span text becomes alt, never element content
        SpanKind::Image => LeafNode::element("img", "")
            .with_attribute("src", target(span)?)
            .with_attribute("alt", &span.text),
    };

    Ok(leaf.into())
}

/// Convert a sequence of spans, stopping at the first failure.
pub fn convert_all(spans: &[TextSpan], config: &Config) -> Result<Vec<Node>> {
    spans
        .iter()
        .map(|span| convert_with_config(span, config))
        .collect()
}

fn target(span: &TextSpan) -> Result<&str> {
    span.target
        .as_deref()
        .ok_or(Error::MissingTarget(span.kind))
}
