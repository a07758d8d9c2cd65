//! Minimal reply formatting.
//!
//! Replies are plain text with a little markdown. Only three things are
//! translated: line breaks, `**strong**` and `*emphasis*`. Everything else
//! (list markers, headings, links, code spans, quotes, escapes, entities,
//! inline HTML) is kept byte for byte as literal text.

use std::fmt::Write;
use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

/// One run of uniformly styled text, or a line break.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    Text { text: String, strong: bool, emphasis: bool },
    Break,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RichText {
    spans: Vec<Span>,
}

impl RichText {
    /// Unformatted text; newlines still become breaks.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        let mut rich = Self::default();
        rich.push_text(text, false, false);
        rich
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// True when some strong or emphasized run contains `needle`.
    #[must_use]
    pub fn is_emphasized(&self, needle: &str) -> bool {
        self.spans.iter().any(|span| match span {
            Span::Text { text, strong, emphasis } => (*strong || *emphasis) && text.contains(needle),
            Span::Break => false,
        })
    }

    /// Text with styling dropped and breaks as `\n`.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span {
                Span::Text { text, .. } => out.push_str(text),
                Span::Break => out.push('\n'),
            }
        }
        out
    }

    /// HTML fragment: `<br>`, `<strong>`, `<em>`; all text escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span {
                Span::Text { text, strong, emphasis } => {
                    if *strong {
                        out.push_str("<strong>");
                    }
                    if *emphasis {
                        out.push_str("<em>");
                    }
                    push_escaped(&mut out, text);
                    if *emphasis {
                        out.push_str("</em>");
                    }
                    if *strong {
                        out.push_str("</strong>");
                    }
                }
                Span::Break => out.push_str("<br>"),
            }
        }
        out
    }

    /// Terminal rendering with SGR bold/italic.
    #[must_use]
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span {
                Span::Text { text, strong, emphasis } => {
                    let mut codes = Vec::new();
                    if *strong {
                        codes.push("1");
                    }
                    if *emphasis {
                        codes.push("3");
                    }
                    if codes.is_empty() {
                        out.push_str(text);
                    } else {
                        let _ = write!(out, "\x1b[{}m{text}\x1b[0m", codes.join(";"));
                    }
                }
                Span::Break => out.push('\n'),
            }
        }
        out
    }

    fn push_break(&mut self) {
        self.spans.push(Span::Break);
    }

    fn push_text(&mut self, text: &str, strong: bool, emphasis: bool) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.push_break();
            }
            if line.is_empty() {
                continue;
            }
            if let Some(Span::Text { text: last, strong: s, emphasis: e }) = self.spans.last_mut() {
                if *s == strong && *e == emphasis {
                    last.push_str(line);
                    continue;
                }
            }
            self.spans.push(Span::Text { text: line.to_owned(), strong, emphasis });
        }
    }

    fn trim_trailing_breaks(&mut self) {
        while matches!(self.spans.last(), Some(Span::Break)) {
            self.spans.pop();
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

/// Translate a model reply into [`RichText`].
///
/// pulldown-cmark only locates `**strong**` and `*emphasis*` runs. Their
/// delimiters are dropped and every other byte of the reply is copied as
/// written. Newlines become breaks, with blank-line runs collapsed to one
/// empty line.
#[must_use]
pub fn render_reply(reply: &str) -> RichText {
    let mut strong: Vec<Range<usize>> = Vec::new();
    let mut emphasis: Vec<Range<usize>> = Vec::new();
    let mut delimiters: Vec<Range<usize>> = Vec::new();

    for (event, range) in Parser::new_ext(reply, Options::empty()).into_offset_iter() {
        let (width, styled) = match event {
            Event::Start(Tag::Strong) => (2, &mut strong),
            Event::Start(Tag::Emphasis) => (1, &mut emphasis),
            _ => continue,
        };
        if range.len() <= 2 * width {
            continue;
        }
        delimiters.push(range.start..range.start + width);
        delimiters.push(range.end - width..range.end);
        styled.push(range.start + width..range.end - width);
    }

    let covers = |ranges: &[Range<usize>], at: usize| ranges.iter().any(|r| r.contains(&at));
    let mut rich = RichText::default();
    let mut newlines = 0usize;

    for (at, ch) in reply.char_indices() {
        if ch == '\r' || covers(&delimiters, at) {
            continue;
        }
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 && !rich.is_empty() {
                rich.push_break();
            }
            continue;
        }
        newlines = 0;
        rich.push_text(&reply[at..at + ch.len_utf8()], covers(&strong, at), covers(&emphasis, at));
    }

    rich.trim_trailing_breaks();
    rich
}

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;
