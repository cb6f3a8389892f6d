//! TUI rendering — orchestrates all panes.

pub mod patient_form;
pub mod patient_table;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::PatientTable => patient_table::draw(f, rows[1], app),
    Screen::PatientForm => patient_form::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let hints = match app.screen {
    Screen::PatientTable => {
      " ward  [/] search  [s] status  [g] gender  [n] new  [e] edit  [d] delete  [r] reload  [q] quit"
    }
    Screen::PatientForm => {
      " ward  [Tab] next field  [←/→] cycle choice  [Enter] submit  [Esc] cancel"
    }
  };

  let line = Line::from(Span::styled(
    hints,
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  ));

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let style = if app.status_msg.starts_with("Error") {
    Style::default().fg(Color::Red)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  f.render_widget(Paragraph::new(app.status_msg.as_str()).style(style), area);
}
