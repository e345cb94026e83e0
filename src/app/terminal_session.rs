use std::io::{self, Stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Size;

use crate::error::{AppError, AppResult};

/// What the page loop draws on; tests swap in a `TestBackend`.
pub(crate) trait TerminalSurface {
    fn size(&self) -> io::Result<Size>;

    fn clear(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>);
}

/// Full-screen page view. Leaving it, explicitly or on drop, hands the
/// terminal back in cooked mode.
pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    on_screen: bool,
}

impl TerminalSession {
    pub(crate) fn enter() -> AppResult<Self> {
        enable_raw_mode()
            .map_err(|source| AppError::io_with_context(source, "failed to enable raw mode"))?;
        match open_page_screen() {
            Ok(terminal) => Ok(Self {
                terminal,
                on_screen: true,
            }),
            Err(err) => {
                let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(err)
            }
        }
    }

    pub(crate) fn restore(&mut self) -> AppResult<()> {
        if !self.on_screen {
            return Ok(());
        }
        self.on_screen = false;
        tracing::debug!("leaving page screen");
        disable_raw_mode()
            .map_err(|source| AppError::io_with_context(source, "failed to disable raw mode"))?;
        execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen).map_err(|source| {
            AppError::io_with_context(source, "failed to leave alternate screen")
        })
    }
}

fn open_page_screen() -> AppResult<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|source| AppError::io_with_context(source, "failed to enter alternate screen"))?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|source| AppError::io_with_context(source, "failed to open terminal"))?;
    terminal
        .clear()
        .map_err(|source| AppError::io_with_context(source, "failed to clear terminal"))?;
    Ok(terminal)
}

impl TerminalSurface for TerminalSession {
    fn size(&self) -> io::Result<Size> {
        self.terminal.size()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal.draw(render).map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(error = %err, "terminal was not restored");
        }
    }
}
