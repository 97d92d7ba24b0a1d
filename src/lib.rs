mod config;
mod convert;
mod error;
mod node;
mod parser;
mod span;

pub use config::{Config, LinksConfig};
pub use convert::{convert, convert_all, convert_with_config};
pub use error::{Error, Result};
pub use node::{Attributes, LeafNode, Node, ParentNode};
pub use span::{SpanKind, TextSpan};

/// Parse inline markdown into text spans.
pub fn parse_inline(markdown: &str) -> Vec<TextSpan> {
    parser::parse_inline(markdown)
}

/// Convert inline markdown to HTML using default config.
pub fn inline_markdown_to_html(markdown: &str) -> Result<String> {
    inline_markdown_to_html_with_config(markdown, &Config::default())
}

/// Convert inline markdown to HTML with custom config.
pub fn inline_markdown_to_html_with_config(markdown: &str, config: &Config) -> Result<String> {
    let spans = parse_inline(markdown);
    let mut out = String::new();
    for node in convert_all(&spans, config)? {
        out.push_str(&node.render()?);
    }
    Ok(out)
}
