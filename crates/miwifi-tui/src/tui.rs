//! Terminal ownership: raw mode and the alternate screen for as long as a
//! [`Tui`] lives, restored on drop and from the panic hook.

use std::io::{self, Stdout};

use color_eyre::eyre::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl Tui {
    /// Switch the terminal into full-screen mode.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            restore();
            return Err(e.into());
        }
        let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore();
                return Err(e.into());
            }
        };
        let mut tui = Self {
            terminal,
            restored: false,
        };
        tui.terminal.clear()?;
        Ok(tui)
    }

    /// Give the terminal back to the shell. Idempotent.
    pub fn exit(&mut self) {
        if !self.restored {
            self.restored = true;
            restore();
        }
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Current drawable area.
    pub fn area(&self) -> Result<Rect> {
        let size = self.terminal.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.exit();
    }
}

// Errors are ignored: this also runs from the panic hook.
fn restore() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

/// Install color-eyre's report and panic hooks, restoring the terminal
/// before a main-thread panic is printed.
///
/// Call before [`Tui::enter`].
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Worker-thread panics are logged by the task supervisor; printing
        // them here would scribble over the live screen.
        if !reports_panic(std::thread::current().name()) {
            return;
        }
        restore();
        panic_hook(info);
    }));
    Ok(())
}

fn reports_panic(thread: Option<&str>) -> bool {
    thread == Some("main")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn only_main_thread_panics_are_reported() {
        assert!(reports_panic(Some("main")));
        assert!(!reports_panic(Some("tokio-runtime-worker")));
        assert!(!reports_panic(None));
    }

    #[test]
    fn worker_panic_is_silent_under_installed_hooks() {
        install_hooks().unwrap();
        let result = std::thread::Builder::new()
            .name("tokio-runtime-worker".into())
            .spawn(|| panic!("status poller fault"))
            .unwrap()
            .join();
        drop(std::panic::take_hook());
        assert!(result.is_err());
    }
}
