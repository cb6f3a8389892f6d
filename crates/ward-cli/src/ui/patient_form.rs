//! Registration / edit form pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use ward_core::patient::{Gender, PatientStatus};

use crate::app::{App, FormState};

/// Render the form into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(form) = app.form.as_ref() else { return };

  let title = match &form.editing {
    Some(p) => format!(" Edit patient {} ", p.id),
    None => " New patient ".to_string(),
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines = vec![
    text_line("Name", &form.name, form.focus == 0),
    text_line("DOB (YYYY-MM-DD)", &form.dob, form.focus == 1),
    choice_line("Gender", gender_label(form.gender), form.focus == 2),
    text_line("Phone", &form.phone, form.focus == 3),
    text_line("Email (optional)", &form.email, form.focus == 4),
    choice_line("Status", status_label(form.status), form.focus == 5),
    Line::raw(""),
    Line::from(Span::styled(
      hint(form),
      Style::default().fg(Color::DarkGray),
    )),
  ];

  f.render_widget(Paragraph::new(lines), pad(inner));
}

fn text_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
  let cursor = if focused { "_" } else { "" };
  Line::from(vec![
    Span::styled(format!("{label:<18}"), label_style(focused)),
    Span::styled(format!("{value}{cursor}"), value_style(focused)),
  ])
}

fn choice_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
  Line::from(vec![
    Span::styled(format!("{label:<18}"), label_style(focused)),
    Span::styled(format!("‹ {value} ›"), value_style(focused)),
  ])
}

fn label_style(focused: bool) -> Style {
  if focused {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Gray)
  }
}

fn value_style(focused: bool) -> Style {
  if focused {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
  } else {
    Style::default()
  }
}

fn gender_label(g: Gender) -> &'static str {
  match g {
    Gender::Male => "Male",
    Gender::Female => "Female",
    Gender::Other => "Other",
  }
}

fn status_label(s: PatientStatus) -> &'static str {
  match s {
    PatientStatus::Active => "Active",
    PatientStatus::Discharged => "Discharged",
  }
}

fn hint(form: &FormState) -> &'static str {
  match form.editing {
    Some(_) => "Only changed fields are sent; clearing Email removes it.",
    None => "Name and Phone are required; Email may be left blank.",
  }
}

/// Inset the form one cell from the block border.
fn pad(r: Rect) -> Rect {
  Rect {
    x:      r.x + 1,
    y:      r.y + 1,
    width:  r.width.saturating_sub(2),
    height: r.height.saturating_sub(2),
  }
}
