//! Line-oriented terminal surface.
//!
//! Slot state lives in a [`MemorySurface`]; the slots a reader cares about
//! (answer, login error, meter, warning, notices) are echoed to the output as
//! they change. The same input stream serves both command lines and
//! confirmation prompts so nothing is buffered twice.

use std::io::{self, BufRead, Write};
use std::sync::{Mutex, MutexGuard};

use super::memory::MemorySurface;
use super::{Notice, NoticeKind, RichText, Slot, Surface, Tone};

pub struct TerminalSurface<W, R> {
    store: MemorySurface,
    out: Mutex<W>,
    input: Mutex<R>,
}

impl TerminalSurface<io::Stdout, io::BufReader<io::Stdin>> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::BufReader::new(io::stdin()))
    }
}

impl<W: Write + Send, R: BufRead + Send> TerminalSurface<W, R> {
    pub fn new(out: W, input: R) -> Self {
        Self { store: MemorySurface::new(), out: Mutex::new(out), input: Mutex::new(input) }
    }

    /// Backing slot store.
    #[must_use]
    pub fn store(&self) -> &MemorySurface {
        &self.store
    }

    fn out(&self) -> MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn line(&self, text: &str) {
        let mut out = self.out();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }

    /// Print `prompt` and read one line, without its line ending.
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be flushed or the input read.
    pub fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut out = self.out();
            write!(out, "{prompt}")?;
            out.flush()?;
        }
        let mut buf = String::new();
        let read = self
            .input
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .read_line(&mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn echo_meter(&self) {
        let meter = self.store.text(Slot::ContextMeter);
        let detail = self.store.text(Slot::ContextDetail);
        let marker = match self.store.tone(Slot::ContextMeter) {
            Tone::Critical => " (!)",
            Tone::Warning => " (~)",
            Tone::Neutral | Tone::Success => "",
        };
        self.line(&format!("[context] {meter} used ({detail}){marker}"));
    }
}

impl<W: Write + Send, R: BufRead + Send> Surface for TerminalSurface<W, R> {
    fn read_text(&self, slot: Slot) -> String {
        self.store.read_text(slot)
    }

    fn set_text(&self, slot: Slot, text: &str) {
        self.store.set_text(slot, text);
        match slot {
            Slot::AnswerArea if !text.is_empty() => self.line(text),
            Slot::LoginError if !text.is_empty() => self.line(&format!("[login] {text}")),
            _ => {}
        }
    }

    fn set_rich_text(&self, slot: Slot, text: &RichText) {
        self.store.set_rich_text(slot, text);
        if slot == Slot::AnswerArea {
            self.line(&text.to_ansi());
        }
    }

    fn set_visible(&self, slot: Slot, visible: bool) {
        let was_visible = self.store.is_visible(slot);
        self.store.set_visible(slot, visible);
        if !visible || was_visible {
            return;
        }
        match slot {
            Slot::LoginModal => self.line("Sign in with: /login <username> <password>"),
            Slot::ContextWarning => self.line(&format!("[warning] {}", self.store.text(Slot::ContextWarning))),
            Slot::AiSection => self.line("AI assistant ready. Type a question, or /help."),
            _ => {}
        }
    }

    fn set_enabled(&self, slot: Slot, enabled: bool) {
        self.store.set_enabled(slot, enabled);
    }

    fn set_tone(&self, slot: Slot, tone: Tone) {
        self.store.set_tone(slot, tone);
        if slot == Slot::ContextMeter {
            self.echo_meter();
        }
    }

    fn focus(&self, slot: Slot) {
        self.store.focus(slot);
    }

    fn notify(&self, notice: Notice) {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        self.line(&format!("[{tag}] {}", notice.message));
        self.store.notify(notice);
    }

    fn confirm(&self, prompt: &str) -> bool {
        // Called from inside async controller code; stdin blocks the worker.
        let answer = tokio::task::block_in_place(|| self.read_line(&format!("{prompt} [y/N] ")));
        match answer {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) | Err(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;
