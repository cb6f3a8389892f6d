//! Patient table — the main browsing pane.

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use ward_core::patient::{Gender, Patient, PatientStatus};

use crate::app::App;

/// Render the patient table into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let title = format!(" Patients ({}){} ", app.patients.len(), filter_summary(app));

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner = block.inner(area);
  f.render_widget(block, area);

  // Search bar at the bottom of the inner area while a query is set.
  if (app.filter_active || !app.filter_name.is_empty()) && inner.height > 2 {
    let search_area = Rect {
      x:      inner.x,
      y:      inner.y + inner.height - 1,
      width:  inner.width,
      height: 1,
    };
    inner.height = inner.height.saturating_sub(1);

    let text = if app.filter_active {
      format!("/{}_", app.filter_name)
    } else {
      format!("/{}", app.filter_name)
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  let header = Row::new(["ID", "Name", "Age", "Gender", "Phone", "Email", "Status"])
    .style(Style::default().add_modifier(Modifier::BOLD));

  let today = Local::now().date_naive();
  let rows: Vec<Row> = app
    .patients
    .iter()
    .map(|p| {
      let age = today
        .years_since(p.dob)
        .map(|y| y.to_string())
        .unwrap_or_else(|| "—".into());
      Row::new(vec![
        Cell::from(p.id.to_string()),
        Cell::from(p.name.clone()),
        Cell::from(age),
        Cell::from(gender_label(p.gender)),
        Cell::from(p.phone.clone()),
        Cell::from(p.email.clone().unwrap_or_else(|| "—".into())),
        Cell::from(status_cell(p)),
      ])
    })
    .collect();

  let table = Table::new(
    rows,
    [
      Constraint::Length(6),
      Constraint::Min(20),
      Constraint::Length(5),
      Constraint::Length(8),
      Constraint::Length(17),
      Constraint::Min(20),
      Constraint::Length(12),
    ],
  )
  .header(header)
  .row_highlight_style(
    Style::default()
      .bg(Color::Blue)
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  let mut state = TableState::default();
  state.select(if app.patients.is_empty() {
    None
  } else {
    Some(app.table_cursor)
  });

  f.render_stateful_widget(table, inner, &mut state);
}

fn gender_label(g: Gender) -> &'static str {
  match g {
    Gender::Male => "Male",
    Gender::Female => "Female",
    Gender::Other => "Other",
  }
}

fn status_cell(p: &Patient) -> Cell<'static> {
  match p.status {
    PatientStatus::Active => {
      Cell::from("Active").style(Style::default().fg(Color::Green))
    }
    PatientStatus::Discharged => {
      Cell::from("Discharged").style(Style::default().fg(Color::DarkGray))
    }
  }
}

/// One-line summary of the cycled filters for the table title.
fn filter_summary(app: &App) -> String {
  let mut parts = Vec::new();
  if let Some(s) = app.status_filter {
    parts.push(match s {
      PatientStatus::Active => "status: Active",
      PatientStatus::Discharged => "status: Discharged",
    });
  }
  if let Some(g) = app.gender_filter {
    parts.push(match g {
      Gender::Male => "gender: Male",
      Gender::Female => "gender: Female",
      Gender::Other => "gender: Other",
    });
  }
  if parts.is_empty() {
    String::new()
  } else {
    format!(" [{}]", parts.join(", "))
  }
}
