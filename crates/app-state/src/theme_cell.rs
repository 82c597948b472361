//! Session theme cell
//!
//! Owns the session [`ThemeColor`] and the [`Theme`] derived from it. The cell
//! has exactly one writer, and that writer can commit exactly once: committing
//! consumes it. Readers hold cheap, cloneable [`ThemeHandle`]s and can await
//! changes. Once every handle is dropped the cell is torn down and a late
//! commit is a no-op.

use app_ui::theme::{compute_theme, Theme, ThemeColor};
use serde::Serialize;
use tokio::sync::watch;

/// Theme as seen by readers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionTheme {
    /// Derived theme record
    pub theme: Theme,
    /// Whether the sampled color has replaced the default
    pub sampled: bool,
}

impl Default for SessionTheme {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            sampled: false,
        }
    }
}

/// Create a theme cell holding the default color
pub fn theme_cell() -> (ThemeWriter, ThemeHandle) {
    let (tx, rx) = watch::channel(SessionTheme::default());
    (ThemeWriter { tx }, ThemeHandle { rx })
}

/// The single writer of a theme cell
#[derive(Debug)]
pub struct ThemeWriter {
    tx: watch::Sender<SessionTheme>,
}

impl ThemeWriter {
    /// Replace the default color, consuming the writer.
    ///
    /// Returns `false` (and writes nothing) when the cell has been torn down.
    pub fn commit(self, color: ThemeColor) -> bool {
        let next = SessionTheme {
            theme: compute_theme(color),
            sampled: true,
        };
        match self.tx.send(next) {
            Ok(()) => {
                tracing::debug!(color = %color, "theme color committed");
                true
            }
            Err(_) => {
                tracing::debug!(color = %color, "theme cell torn down; commit dropped");
                false
            }
        }
    }

    /// Whether every reader is gone
    pub fn is_detached(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Read-only view of a theme cell
#[derive(Debug, Clone)]
pub struct ThemeHandle {
    rx: watch::Receiver<SessionTheme>,
}

impl ThemeHandle {
    /// Snapshot of the current theme
    pub fn snapshot(&self) -> SessionTheme {
        self.rx.borrow().clone()
    }

    /// Current derived theme
    pub fn theme(&self) -> Theme {
        self.rx.borrow().theme.clone()
    }

    /// Current accent color
    pub fn color(&self) -> ThemeColor {
        self.rx.borrow().theme.color
    }

    /// Whether the sampled color has been adopted
    pub fn is_sampled(&self) -> bool {
        self.rx.borrow().sampled
    }

    /// Wait for the next commit. Returns `false` if the writer went away
    /// without committing.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
