use super::*;

fn text(t: &str) -> Span {
    Span::Text { text: t.to_owned(), strong: false, emphasis: false }
}

fn strong(t: &str) -> Span {
    Span::Text { text: t.to_owned(), strong: true, emphasis: false }
}

fn em(t: &str) -> Span {
    Span::Text { text: t.to_owned(), strong: false, emphasis: true }
}

// =============================================================
// render_reply
// =============================================================

#[test]
fn bold_marker_becomes_strong() {
    let rich = render_reply("**4**");
    assert_eq!(rich.spans(), &[strong("4")]);
    assert!(rich.is_emphasized("4"));
}

#[test]
fn single_star_becomes_emphasis() {
    let rich = render_reply("this is *important* stuff");
    assert_eq!(rich.spans(), &[text("this is "), em("important"), text(" stuff")]);
}

#[test]
fn newline_becomes_break() {
    let rich = render_reply("line one\nline two");
    assert_eq!(rich.spans(), &[text("line one"), Span::Break, text("line two")]);
}

#[test]
fn blank_line_becomes_double_break() {
    let rich = render_reply("first\n\nsecond");
    assert_eq!(rich.spans(), &[text("first"), Span::Break, Span::Break, text("second")]);
}

#[test]
fn trailing_breaks_trimmed() {
    let rich = render_reply("answer\n\n");
    assert_eq!(rich.spans(), &[text("answer")]);
}

#[test]
fn list_markers_kept_as_text() {
    let rich = render_reply("- EUR\n- GBP");
    assert_eq!(rich.to_plain(), "- EUR\n- GBP");
}

#[test]
fn ordered_list_keeps_numbers() {
    let rich = render_reply("3. three\n4. four");
    assert_eq!(rich.to_plain(), "3. three\n4. four");
}

#[test]
fn inline_html_is_literal_text() {
    let rich = render_reply("a <script>x</script> b");
    assert!(rich.to_plain().contains("<script>"));
    assert!(!rich.to_html().contains("<script>"));
    assert!(rich.to_html().contains("&lt;script&gt;"));
}

#[test]
fn link_keeps_url() {
    let reply = "see [docs](https://example.com/x)";
    assert_eq!(render_reply(reply).to_plain(), reply);
}

#[test]
fn code_span_keeps_backticks_and_stars() {
    let rich = render_reply("run `cargo test` and `a*b*c` now");
    assert_eq!(rich.to_plain(), "run `cargo test` and `a*b*c` now");
    assert!(!rich.is_emphasized("b"));
}

#[test]
fn quote_marker_kept() {
    assert_eq!(render_reply("> quoted line").to_plain(), "> quoted line");
}

#[test]
fn escapes_and_entities_are_not_decoded() {
    assert_eq!(render_reply(r"a \*literal\* star").to_plain(), r"a \*literal\* star");
    assert_eq!(render_reply("AT&amp;T").to_plain(), "AT&amp;T");
}

#[test]
fn setext_heading_kept_as_written() {
    assert_eq!(render_reply("Total\n=====").to_plain(), "Total\n=====");
}

#[test]
fn paren_list_marker_kept() {
    assert_eq!(render_reply("1) first\n2) second").to_plain(), "1) first\n2) second");
}

#[test]
fn strong_inside_link_text() {
    let rich = render_reply("[**docs**](https://example.com)");
    assert_eq!(rich.to_plain(), "[docs](https://example.com)");
    assert!(rich.is_emphasized("docs"));
}

#[test]
fn triple_star_is_strong_and_emphasis() {
    let rich = render_reply("***x***");
    assert_eq!(rich.spans(), &[Span::Text { text: "x".to_owned(), strong: true, emphasis: true }]);
}

#[test]
fn crlf_and_long_blank_runs_collapse() {
    let rich = render_reply("a\r\n\r\n\r\n\r\nb");
    assert_eq!(rich.spans(), &[text("a"), Span::Break, Span::Break, text("b")]);
}

#[test]
fn empty_reply_renders_nothing() {
    assert!(render_reply("").is_empty());
}

// =============================================================
// Output formats
// =============================================================

#[test]
fn to_html_wraps_styles_and_breaks() {
    let rich = render_reply("**4**\nis *the* answer");
    assert_eq!(rich.to_html(), "<strong>4</strong><br>is <em>the</em> answer");
}

#[test]
fn to_ansi_uses_sgr_codes() {
    let rich = render_reply("**4**");
    assert_eq!(rich.to_ansi(), "\x1b[1m4\x1b[0m");
}

#[test]
fn plain_splits_newlines_without_styling() {
    let rich = RichText::plain("a\nb");
    assert_eq!(rich.spans(), &[text("a"), Span::Break, text("b")]);
    assert!(!rich.is_emphasized("a"));
}
