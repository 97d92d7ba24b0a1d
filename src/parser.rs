use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::span::{SpanKind, TextSpan};

/// Parse a run of inline markdown into text spans.
///
/// Span text is HTML: literal `&`, `<` and `>` from the source are escaped,
/// while raw inline HTML passes through untouched.
pub fn parse_inline(markdown: &str) -> Vec<TextSpan> {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut state = ParseState::default();

    for event in parser {
        process_event(event, &mut state);
    }

    log::debug!(
        "parsed {} inline spans from {} bytes",
        state.spans.len(),
        markdown.len()
    );
    state.spans
}

#[derive(Default)]
struct ParseState {
    spans: Vec<TextSpan>,
    // Active emphasis; the innermost entry wins
    format_stack: Vec<SpanKind>,
    // Link or image being collected, with its url and flattened text
    pending: Option<Pending>,
    // A block started or ended since the last content
    block_break: bool,
}

struct Pending {
    kind: SpanKind,
    url: String,
    text: String,
}

impl ParseState {
    fn current_kind(&self) -> SpanKind {
        self.format_stack
            .last()
            .copied()
            .unwrap_or(SpanKind::PlainText)
    }

    /// Emit one newline between the previous block's content and the next.
    fn separate_blocks(&mut self) {
        if std::mem::take(&mut self.block_break) && !self.spans.is_empty() {
            self.append("\n", SpanKind::PlainText);
        }
    }

    fn push_text(&mut self, text: &str, kind: SpanKind) {
        if let Some(pending) = self.pending.as_mut() {
            pending.text.push_str(text);
            return;
        }
        if text.is_empty() {
            return;
        }
        self.separate_blocks();
        self.append(text, kind);
    }

    fn append(&mut self, text: &str, kind: SpanKind) {
        // Adjacent runs of the same formatting are one span
        if let Some(last) = self.spans.last_mut() {
            let mergeable = matches!(
                kind,
                SpanKind::PlainText | SpanKind::Bold | SpanKind::Italic
            );
            if mergeable && last.kind == kind && last.target.is_none() {
                last.text.push_str(text);
                return;
            }
        }
        self.spans.push(TextSpan::new(text, kind));
    }

    fn push_code(&mut self, code: &str) {
        if let Some(pending) = self.pending.as_mut() {
            pending.text.push_str(code);
            return;
        }
        self.separate_blocks();
        self.spans.push(TextSpan::new(code, SpanKind::Code));
    }

    fn start_pending(&mut self, kind: SpanKind, url: String) {
        // A nested link or image keeps the outer collection going
        if self.pending.is_none() {
            self.separate_blocks();
            self.pending = Some(Pending {
                kind,
                url,
                text: String::new(),
            });
        }
    }

    fn finish_pending(&mut self, kind: SpanKind) {
        if let Some(pending) = self.pending.take_if(|p| p.kind == kind) {
            self.spans
                .push(TextSpan::with_target(pending.text, pending.kind, pending.url));
        }
    }
}

fn process_event(event: Event, state: &mut ParseState) {
    match event {
        // Block boundaries become newlines
        Event::Start(
            Tag::Paragraph
            | Tag::Heading { .. }
            | Tag::Item
            | Tag::BlockQuote(_)
            | Tag::CodeBlock(_),
        )
        | Event::End(
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Item
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock,
        ) => {
            state.block_break = true;
        }

        // Text content
        Event::Text(text) => {
            let kind = state.current_kind();
            state.push_text(&html_escape::encode_text(&text), kind);
        }

        // Inline code
        Event::Code(code) => {
            state.push_code(&html_escape::encode_text(&code));
        }

        // Raw HTML is kept as written
        Event::InlineHtml(html) | Event::Html(html) => {
            state.push_text(&html, SpanKind::PlainText);
        }

        // Bold
        Event::Start(Tag::Strong) => {
            state.format_stack.push(SpanKind::Bold);
        }
        Event::End(TagEnd::Strong) => {
            state.format_stack.pop();
        }

        // Italic
        Event::Start(Tag::Emphasis) => {
            state.format_stack.push(SpanKind::Italic);
        }
        Event::End(TagEnd::Emphasis) => {
            state.format_stack.pop();
        }

        // Links
        Event::Start(Tag::Link { dest_url, .. }) => {
            state.start_pending(SpanKind::Link, dest_url.into_string());
        }
        Event::End(TagEnd::Link) => {
            state.finish_pending(SpanKind::Link);
        }

        // Images
        Event::Start(Tag::Image { dest_url, .. }) => {
            state.start_pending(SpanKind::Image, dest_url.into_string());
        }
        Event::End(TagEnd::Image) => {
            state.finish_pending(SpanKind::Image);
        }

        // Soft/hard breaks
        Event::SoftBreak => {
            let kind = state.current_kind();
            state.push_text(" ", kind);
        }
        Event::HardBreak => {
            state.push_text("\n", SpanKind::PlainText);
        }

        // Footnotes, task lists and math only appear with extensions,
        // which are not enabled
        Event::FootnoteReference(_)
        | Event::TaskListMarker(_)
        | Event::InlineMath(_)
        | Event::DisplayMath(_) => {}

        // Rules and list/table/html-block containers carry no inline text
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_paragraph() {
        assert_eq!(parse_inline("Hello world"), vec![TextSpan::plain("Hello world")]);
    }

    #[test]
    fn empty_input() {
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn bold_italic_and_code() {
        assert_eq!(
            parse_inline("This is **bold** and *italic* with `code`"),
            vec![
                TextSpan::plain("This is "),
                TextSpan::new("bold", SpanKind::Bold),
                TextSpan::plain(" and "),
                TextSpan::new("italic", SpanKind::Italic),
                TextSpan::plain(" with "),
                TextSpan::new("code", SpanKind::Code),
            ]
        );
    }

    #[test]
    fn underscore_italic() {
        assert_eq!(
            parse_inline("_word_"),
            vec![TextSpan::new("word", SpanKind::Italic)]
        );
    }

    #[test]
    fn innermost_emphasis_wins() {
        assert_eq!(
            parse_inline("*outer **inner** outer*"),
            vec![
                TextSpan::new("outer ", SpanKind::Italic),
                TextSpan::new("inner", SpanKind::Bold),
                TextSpan::new(" outer", SpanKind::Italic),
            ]
        );
    }

    #[test]
    fn link() {
        assert_eq!(
            parse_inline("Go to [boot dev](https://www.boot.dev) now"),
            vec![
                TextSpan::plain("Go to "),
                TextSpan::with_target("boot dev", SpanKind::Link, "https://www.boot.dev"),
                TextSpan::plain(" now"),
            ]
        );
    }

    #[test]
    fn link_text_is_flattened() {
        assert_eq!(
            parse_inline("[the **docs**](https://docs.rs)"),
            vec![TextSpan::with_target(
                "the docs",
                SpanKind::Link,
                "https://docs.rs"
            )]
        );
    }

    #[test]
    fn image() {
        assert_eq!(
            parse_inline("![Alt](http://x/i.png)"),
            vec![TextSpan::with_target("Alt", SpanKind::Image, "http://x/i.png")]
        );
    }

    #[test]
    fn soft_break_becomes_space() {
        assert_eq!(
            parse_inline("line one\nline two"),
            vec![TextSpan::plain("line one line two")]
        );
    }

    #[test]
    fn hard_break_becomes_newline() {
        assert_eq!(
            parse_inline("line one  \nline two"),
            vec![TextSpan::plain("line one\nline two")]
        );
    }

    #[test]
    fn escaped_markup_stays_escaped() {
        assert_eq!(
            parse_inline("a &lt;b&gt;x&lt;/b&gt; & `<i>`"),
            vec![
                TextSpan::plain("a &lt;b&gt;x&lt;/b&gt; &amp; "),
                TextSpan::new("&lt;i&gt;", SpanKind::Code),
            ]
        );
    }

    #[test]
    fn link_and_image_text_is_escaped() {
        assert_eq!(
            parse_inline("[a < b](x) ![1 & 2](y.png)"),
            vec![
                TextSpan::with_target("a &lt; b", SpanKind::Link, "x"),
                TextSpan::plain(" "),
                TextSpan::with_target("1 &amp; 2", SpanKind::Image, "y.png"),
            ]
        );
    }

    #[test]
    fn inline_html_passes_through() {
        assert_eq!(
            parse_inline("keep <span>this</span> text"),
            vec![TextSpan::plain("keep <span>this</span> text")]
        );
    }

    #[test]
    fn list_items_are_separated() {
        assert_eq!(parse_inline("- a\n- b"), vec![TextSpan::plain("a\nb")]);
    }

    #[test]
    fn nested_list_items_are_separated() {
        assert_eq!(
            parse_inline("- a\n  - b"),
            vec![TextSpan::plain("a\nb")]
        );
    }

    #[test]
    fn heading_is_separated_from_paragraph() {
        assert_eq!(
            parse_inline("# H\n\npara"),
            vec![TextSpan::plain("H\npara")]
        );
    }

    #[test]
    fn separator_before_formatted_span() {
        assert_eq!(
            parse_inline("one\n\n**two**"),
            vec![
                TextSpan::plain("one\n"),
                TextSpan::new("two", SpanKind::Bold),
            ]
        );
    }

    #[test]
    fn paragraphs_are_joined_by_newline() {
        assert_eq!(
            parse_inline("first\n\nsecond"),
            vec![TextSpan::plain("first\nsecond")]
        );
    }
}
