//! UI module for the terminal graph viewer
//!
//! This module provides the terminal user interface that displays the
//! laid-out course graph until the user quits.

mod app;

pub use app::{run_app, App};

use std::io;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::graph::CourseGraph;
use crate::layout::Layout;

/// Display the graph in the terminal, blocking until the user quits.
///
/// Once raw mode is on, the terminal is restored on every exit path,
/// including a failed screen switch or backend setup.
pub fn show(graph: &CourseGraph, layout: &Layout) -> io::Result<()> {
    enable_raw_mode()?;

    run_restoring(
        || {
            execute!(io::stdout(), EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            let mut app = App::new(graph, layout);
            run_app(&mut terminal, &mut app)
        },
        restore_terminal,
    )
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Runs `body`, then always runs `restore`.
///
/// An error from `body` takes precedence over one from `restore`.
fn run_restoring<T>(
    body: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}
