//! Application state and TUI event loop
//!
//! Draws the laid-out course graph on a ratatui canvas and lets the user
//! step a read-only selection through the courses.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout as Split, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Circle, Line as Segment},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::graph::{CourseGraph, CourseNode};
use crate::layout::Layout;

/// Application state
pub struct App<'a> {
    graph: &'a CourseGraph,
    layout: &'a Layout,
    /// Currently selected vertex id
    pub selected: Option<usize>,
    /// Whether the application should quit
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Create a viewer for a graph and its layout
    pub fn new(graph: &'a CourseGraph, layout: &'a Layout) -> Self {
        Self {
            graph,
            layout,
            selected: None,
            should_quit: false,
        }
    }

    /// Select the next course, starting from the first
    pub fn select_next(&mut self) {
        let count = self.graph.node_count();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < count => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    /// Select the previous course
    pub fn select_previous(&mut self) {
        if self.graph.node_count() == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    /// Jump to the first course
    pub fn select_first(&mut self) {
        if self.graph.node_count() > 0 {
            self.selected = Some(0);
        }
    }

    /// Jump to the last course
    pub fn select_last(&mut self) {
        let count = self.graph.node_count();
        if count > 0 {
            self.selected = Some(count - 1);
        }
    }

    /// Drop the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// The selected course, if any
    pub fn selected_course(&self) -> Option<&'a CourseNode> {
        self.selected.and_then(|id| self.graph.node(id))
    }

    /// Apply a key press
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => {
                if self.selected.is_some() {
                    self.clear_selection();
                } else {
                    self.quit();
                }
            }
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Right | KeyCode::Tab => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::Left | KeyCode::BackTab => self.select_previous(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            _ => {}
        }
    }

    fn is_selected(&self, id: usize) -> bool {
        self.selected == Some(id)
    }
}

/// Run the TUI application
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Render the application UI
fn render(frame: &mut Frame, app: &App) {
    let chunks = Split::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Graph
            Constraint::Length(4), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_graph(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Render the header
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(app.graph.title().to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the graph canvas
///
/// Layout rows grow downwards while canvas y grows upwards, so every y
/// coordinate is negated.
fn render_graph(frame: &mut Frame, app: &App, area: Rect) {
    let bounds = app.layout.bounds().unwrap_or_default();
    let edges = app.graph.edges();

    let title = format!(
        "Courses ({} vertices, {} edges)",
        app.graph.node_count(),
        app.graph.edge_count()
    );

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .marker(Marker::Braille)
        .x_bounds([bounds.min_x - 1.0, bounds.max_x + 1.0])
        .y_bounds([-bounds.max_y - 1.0, -bounds.min_y + 1.0])
        .paint(|ctx| {
            for &(from, to) in &edges {
                let (Some(a), Some(b)) = (app.layout.position(from), app.layout.position(to)) else {
                    continue;
                };
                let color = if app.is_selected(from) || app.is_selected(to) {
                    Color::Yellow
                } else {
                    Color::DarkGray
                };
                ctx.draw(&Segment {
                    x1: a.x,
                    y1: -a.y,
                    x2: b.x,
                    y2: -b.y,
                    color,
                });
            }

            ctx.layer();
            for node in app.graph.nodes() {
                let Some(p) = app.layout.position(node.id) else {
                    continue;
                };
                let color = if app.is_selected(node.id) {
                    Color::Yellow
                } else {
                    Color::White
                };
                ctx.draw(&Circle {
                    x: p.x,
                    y: -p.y,
                    radius: node.size / 2.0,
                    color,
                });
            }

            ctx.layer();
            for node in app.graph.nodes() {
                let Some(p) = app.layout.position(node.id) else {
                    continue;
                };
                let style = if app.is_selected(node.id) {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ctx.print(p.x, -p.y, Span::styled(node.name.clone(), style));
            }
        });

    frame.render_widget(canvas, area);
}

fn join_names(nodes: &[&CourseNode]) -> String {
    if nodes.is_empty() {
        "none".to_string()
    } else {
        nodes.iter().map(|n| n.name.as_str()).collect::<Vec<_>>().join(", ")
    }
}

/// Render the footer with the selection details and help text
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let details = match app.selected_course() {
        Some(course) => Line::from(vec![
            Span::styled(
                course.name.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  prerequisites: "),
            Span::styled(
                join_names(&app.graph.prerequisites_of(course.id)),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  required by: "),
            Span::styled(
                join_names(&app.graph.dependents_of(course.id)),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        None => Line::from(Span::styled(
            "No course selected",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let help = Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(" Select  "),
        Span::styled("g/G", Style::default().fg(Color::Yellow)),
        Span::raw(" First/Last  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Clear/Quit  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);

    let footer = Paragraph::new(vec![details, help])
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
