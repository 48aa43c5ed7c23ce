use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use macrobudget_core::{Notification, Notifier, Permission};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyMode {
    /// Write to stdout with a bell.
    Print,
    /// Keep for the TUI to show in its status line.
    Collect,
}

/// Notifications shown in the terminal. One notification per tag is kept;
/// a re-fire with the same tag replaces it quietly.
pub struct TerminalNotifier {
    mode: NotifyMode,
    enabled: bool,
    terminal: bool,
    shown: Vec<Notification>,
}

impl TerminalNotifier {
    pub fn new(mode: NotifyMode, enabled: bool) -> Self {
        Self::with_terminal(mode, enabled, io::stdout().is_terminal())
    }

    /// `terminal` decides whether permission is granted when enabled.
    pub fn with_terminal(mode: NotifyMode, enabled: bool, terminal: bool) -> Self {
        Self {
            mode,
            enabled,
            terminal,
            shown: Vec::new(),
        }
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.shown.last()
    }

    pub fn dismiss(&mut self) {
        self.shown.clear();
    }
}

impl Notifier for TerminalNotifier {
    fn request_permission(&mut self) -> Permission {
        if !self.enabled {
            Permission::Denied
        } else if self.terminal {
            Permission::Granted
        } else {
            Permission::Unsupported
        }
    }

    fn notify(&mut self, notification: &Notification) -> Result<()> {
        if let Some(existing) = self.shown.iter_mut().find(|n| n.tag == notification.tag) {
            *existing = notification.clone();
            return Ok(());
        }

        self.shown.push(notification.clone());
        if self.mode == NotifyMode::Print {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "\x07{}: {}", notification.title, notification.body)?;
            stdout.flush()?;
        }
        Ok(())
    }
}
