use std::time::Duration;

use super::*;
use crate::ui::NoticeKind;

fn notice(message: &str, ttl_ms: u64) -> Notice {
    Notice { message: message.to_owned(), kind: NoticeKind::Info, ttl: Duration::from_millis(ttl_ms) }
}

// =============================================================
// Slot defaults and writes
// =============================================================

#[test]
fn fresh_slots_show_default_labels() {
    let surface = MemorySurface::new();
    assert_eq!(surface.text(Slot::AskButton), "Ask AI");
    assert_eq!(surface.text(Slot::AnswerArea), "");
    assert!(surface.is_visible(Slot::LoginModal));
    assert!(surface.is_enabled(Slot::LoginButton));
    assert_eq!(surface.tone(Slot::ContextMeter), Tone::Neutral);
}

#[test]
fn set_text_clears_rich_content() {
    let surface = MemorySurface::new();
    surface.set_rich_text(Slot::AnswerArea, &RichText::plain("formatted"));
    assert!(surface.rich(Slot::AnswerArea).is_some());

    surface.set_text(Slot::AnswerArea, "plain");
    assert_eq!(surface.text(Slot::AnswerArea), "plain");
    assert!(surface.rich(Slot::AnswerArea).is_none());
}

#[test]
fn set_rich_text_mirrors_plain_text() {
    let surface = MemorySurface::new();
    surface.set_rich_text(Slot::AnswerArea, &RichText::plain("hello"));
    assert_eq!(surface.read_text(Slot::AnswerArea), "hello");
}

#[test]
fn visibility_enabled_tone_and_focus_recorded() {
    let surface = MemorySurface::new();
    surface.set_visible(Slot::AiSection, false);
    surface.set_enabled(Slot::AskButton, false);
    surface.set_tone(Slot::ContextMeter, Tone::Critical);
    surface.focus(Slot::QuestionInput);

    assert!(!surface.is_visible(Slot::AiSection));
    assert!(!surface.is_enabled(Slot::AskButton));
    assert_eq!(surface.tone(Slot::ContextMeter), Tone::Critical);
    assert_eq!(surface.focused(), Some(Slot::QuestionInput));
}

// =============================================================
// Notices
// =============================================================

#[test]
fn notices_expire_after_ttl() {
    let surface = MemorySurface::new();
    surface.notify(notice("short", 500));
    surface.notify(notice("long", 60_000));

    let later = Instant::now() + Duration::from_secs(1);
    let active: Vec<String> = surface.active_notices(later).into_iter().map(|n| n.message).collect();
    assert_eq!(active, vec!["long".to_owned()]);
    assert_eq!(surface.notices().len(), 2);
}

#[test]
fn expired_notices_are_dropped_on_next_notify() {
    let surface = MemorySurface::new();
    surface.notify(notice("gone", 0));
    surface.notify(notice("kept", 60_000));
    surface.notify(notice("latest", 60_000));

    let messages: Vec<String> = surface.notices().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["kept".to_owned(), "latest".to_owned()]);
}

// =============================================================
// Confirmations
// =============================================================

#[test]
fn confirm_uses_script_then_default() {
    let surface = MemorySurface::new().with_confirm_default(false);
    surface.script_confirm(true);

    assert!(surface.confirm("first?"));
    assert!(!surface.confirm("second?"));
    assert_eq!(surface.prompts(), vec!["first?".to_owned(), "second?".to_owned()]);
}
