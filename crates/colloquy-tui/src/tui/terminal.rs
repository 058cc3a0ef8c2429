//! Terminal mode management
//!
//! Each mode enabled during setup is recorded in a global flag, so teardown
//! from the normal exit path, a panic hook, or an early return only undoes
//! what was actually turned on, and only once.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use ratatui::crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};

#[derive(Debug, Clone, Copy)]
enum Mode {
    Raw = 0,
    AltScreen = 1,
    BracketedPaste = 2,
    KeyboardFlags = 3,
}

static ENABLED: [AtomicBool; 4] = [
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
    AtomicBool::new(false),
];

fn mark(mode: Mode) {
    ENABLED[mode as usize].store(true, Ordering::Relaxed);
}

/// Clears the flag and reports whether the mode was on.
fn take(mode: Mode) -> bool {
    ENABLED[mode as usize].swap(false, Ordering::Relaxed)
}

/// Enter raw mode and the alternate screen. A flag is set only after its
/// step succeeded.
pub fn setup<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    enable_raw_mode()?;
    mark(Mode::Raw);

    execute!(w, EnterAlternateScreen, SetTitle(title))?;
    mark(Mode::AltScreen);

    execute!(w, EnableBracketedPaste)?;
    mark(Mode::BracketedPaste);

    // Needed to tell Shift+Enter apart from Enter; not every terminal supports it
    if execute!(
        w,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok()
    {
        mark(Mode::KeyboardFlags);
    }

    Ok(())
}

pub fn cleanup_with_writer<W: Write>(w: &mut W) {
    if take(Mode::KeyboardFlags) {
        let _ = execute!(w, PopKeyboardEnhancementFlags);
    }
    if take(Mode::BracketedPaste) {
        let _ = execute!(w, DisableBracketedPaste);
    }
    if take(Mode::AltScreen) {
        let _ = execute!(w, LeaveAlternateScreen);
    }
    if take(Mode::Raw) {
        let _ = disable_raw_mode();
    }
    let _ = w.flush();
}

/// Best-effort restore of the terminal on stdout.
pub fn cleanup() {
    cleanup_with_writer(&mut io::stdout());
}

/// Restores the terminal on drop unless disarmed.
pub struct SetupGuard {
    armed: bool,
}

impl SetupGuard {
    pub fn new() -> Self {
        Self { armed: true }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Default for SetupGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SetupGuard {
    fn drop(&mut self) {
        if self.armed {
            cleanup();
        }
    }
}
