//! Application state machine and event dispatcher.

use std::sync::Arc;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ward_core::{
  patient::{Gender, NewPatient, Patient, PatientId, PatientPatch, PatientStatus},
  store::PatientFilter,
};

use crate::client::ApiClient;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The filterable patient table.
  PatientTable,
  /// The registration / edit form.
  PatientForm,
}

// ─── Form ─────────────────────────────────────────────────────────────────────

/// Number of focusable form fields: name, dob, gender, phone, email, status.
pub const FORM_FIELDS: usize = 6;

/// Field-by-field state of the registration / edit form.
pub struct FormState {
  /// `Some` when editing an existing record; the original is kept so submit
  /// can send only the changed fields as a patch.
  pub editing: Option<Patient>,
  pub name:    String,
  pub dob:     String,
  pub gender:  Gender,
  pub phone:   String,
  pub email:   String,
  pub status:  PatientStatus,
  /// Index of the focused field, 0-based in declaration order.
  pub focus:   usize,
}

impl FormState {
  fn blank() -> Self {
    Self {
      editing: None,
      name:    String::new(),
      dob:     String::new(),
      gender:  Gender::Male,
      phone:   String::new(),
      email:   String::new(),
      status:  PatientStatus::Active,
      focus:   0,
    }
  }

  fn prefilled(patient: &Patient) -> Self {
    Self {
      editing: Some(patient.clone()),
      name:    patient.name.clone(),
      dob:     patient.dob.format("%Y-%m-%d").to_string(),
      gender:  patient.gender,
      phone:   patient.phone.clone(),
      email:   patient.email.clone().unwrap_or_default(),
      status:  patient.status,
      focus:   0,
    }
  }
}

// ─── Cycling helpers ──────────────────────────────────────────────────────────

fn cycle_gender(g: Gender) -> Gender {
  match g {
    Gender::Male => Gender::Female,
    Gender::Female => Gender::Other,
    Gender::Other => Gender::Male,
  }
}

fn cycle_status(s: PatientStatus) -> PatientStatus {
  match s {
    PatientStatus::Active => PatientStatus::Discharged,
    PatientStatus::Discharged => PatientStatus::Active,
  }
}

fn cycle_status_filter(f: Option<PatientStatus>) -> Option<PatientStatus> {
  match f {
    None => Some(PatientStatus::Active),
    Some(PatientStatus::Active) => Some(PatientStatus::Discharged),
    Some(PatientStatus::Discharged) => None,
  }
}

fn cycle_gender_filter(f: Option<Gender>) -> Option<Gender> {
  match f {
    None => Some(Gender::Male),
    Some(Gender::Male) => Some(Gender::Female),
    Some(Gender::Female) => Some(Gender::Other),
    Some(Gender::Other) => None,
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Records returned by the last list call, already server-filtered.
  pub patients: Vec<Patient>,

  /// Current name-search string (sent to the server as the `name` filter).
  pub filter_name: String,

  /// Whether the user is typing a search query.
  pub filter_active: bool,

  /// Status filter cycled with `s`.
  pub status_filter: Option<PatientStatus>,

  /// Gender filter cycled with `g`.
  pub gender_filter: Option<Gender>,

  /// Cursor position within the patient table.
  pub table_cursor: usize,

  /// Form state while `screen == PatientForm`.
  pub form: Option<FormState>,

  /// Set while a delete awaits its `y` confirmation.
  pub confirm_delete: Option<PatientId>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with an empty patient table.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::PatientTable,
      patients: Vec::new(),
      filter_name: String::new(),
      filter_active: false,
      status_filter: None,
      gender_filter: None,
      table_cursor: 0,
      form: None,
      confirm_delete: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  fn current_filter(&self) -> PatientFilter {
    PatientFilter {
      status: self.status_filter,
      gender: self.gender_filter,
      name:   (!self.filter_name.is_empty()).then(|| self.filter_name.clone()),
    }
  }

  /// Fetch the (server-filtered) patient list and populate the table.
  pub async fn reload(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading patients…".into();
    match self.client.list_patients(&self.current_filter()).await {
      Ok(patients) => {
        self.patients = patients;
        if self.table_cursor >= self.patients.len() {
          self.table_cursor = self.patients.len().saturating_sub(1);
        }
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// The patient under the table cursor, if any.
  pub fn cursor_patient(&self) -> Option<&Patient> {
    self.patients.get(self.table_cursor)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.screen == Screen::PatientForm {
      self.handle_form_key(key).await?;
      return Ok(true);
    }

    // Search input mode: printable keys go into the query string.
    if self.filter_active {
      self.handle_filter_key(key).await?;
      return Ok(true);
    }

    // A pending delete consumes the next key.
    if let Some(id) = self.confirm_delete.take() {
      if key.code == KeyCode::Char('y') {
        match self.client.delete_patient(id).await {
          Ok(()) => {
            self.status_msg = format!("Deleted patient {id}");
            let _ = self.reload().await;
          }
          Err(e) => self.status_msg = format!("Error: {e}"),
        }
      } else {
        self.status_msg = "Delete cancelled".into();
      }
      return Ok(true);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Char('j') | KeyCode::Down => {
        if self.table_cursor + 1 < self.patients.len() {
          self.table_cursor += 1;
        }
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.table_cursor = self.table_cursor.saturating_sub(1);
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
      }
      KeyCode::Char('s') => {
        self.status_filter = cycle_status_filter(self.status_filter);
        let _ = self.reload().await;
      }
      KeyCode::Char('g') => {
        self.gender_filter = cycle_gender_filter(self.gender_filter);
        let _ = self.reload().await;
      }
      KeyCode::Char('r') => {
        let _ = self.reload().await;
      }

      KeyCode::Char('n') => {
        self.form = Some(FormState::blank());
        self.screen = Screen::PatientForm;
        self.status_msg = String::new();
      }
      KeyCode::Char('e') => {
        if let Some(patient) = self.cursor_patient().cloned() {
          self.form = Some(FormState::prefilled(&patient));
          self.screen = Screen::PatientForm;
          self.status_msg = String::new();
        }
      }
      KeyCode::Char('d') => {
        if let Some(patient) = self.cursor_patient().cloned() {
          self.confirm_delete = Some(patient.id);
          self.status_msg =
            format!("Delete patient {} ({})? press y to confirm", patient.id, patient.name);
        }
      }

      _ => {}
    }

    Ok(true)
  }

  async fn handle_filter_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter_name.clear();
        let _ = self.reload().await;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        let _ = self.reload().await;
      }
      KeyCode::Backspace => {
        self.filter_name.pop();
      }
      KeyCode::Char(c) => {
        self.filter_name.push(c);
      }
      _ => {}
    }
    Ok(())
  }

  // ── Form ──────────────────────────────────────────────────────────────────

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
    let Some(form) = self.form.as_mut() else {
      self.screen = Screen::PatientTable;
      return Ok(());
    };

    match key.code {
      KeyCode::Esc => {
        self.form = None;
        self.screen = Screen::PatientTable;
        self.status_msg = String::new();
      }
      KeyCode::Tab | KeyCode::Down => {
        form.focus = (form.focus + 1) % FORM_FIELDS;
      }
      KeyCode::BackTab | KeyCode::Up => {
        form.focus = (form.focus + FORM_FIELDS - 1) % FORM_FIELDS;
      }
      KeyCode::Enter => {
        self.submit_form().await;
      }
      // Gender (2) and status (5) cycle; text fields take input.
      KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
        if form.focus == 2 || form.focus == 5 =>
      {
        if form.focus == 2 {
          form.gender = cycle_gender(form.gender);
        } else {
          form.status = cycle_status(form.status);
        }
      }
      KeyCode::Backspace => {
        match form.focus {
          0 => form.name.pop(),
          1 => form.dob.pop(),
          3 => form.phone.pop(),
          4 => form.email.pop(),
          _ => None,
        };
      }
      KeyCode::Char(c) => {
        match form.focus {
          0 => form.name.push(c),
          1 => form.dob.push(c),
          3 => form.phone.push(c),
          4 => form.email.push(c),
          _ => {}
        };
      }
      _ => {}
    }
    Ok(())
  }

  async fn submit_form(&mut self) {
    let Some(form) = self.form.as_ref() else { return };

    let dob = match NaiveDate::parse_from_str(form.dob.trim(), "%Y-%m-%d") {
      Ok(d) => d,
      Err(_) => {
        self.status_msg = format!("Invalid date of birth {:?} (use YYYY-MM-DD)", form.dob);
        return;
      }
    };

    let result = match &form.editing {
      Some(orig) => {
        let patch = PatientPatch {
          name:   (form.name != orig.name).then(|| form.name.clone()),
          dob:    (dob != orig.dob).then_some(dob),
          gender: (form.gender != orig.gender).then_some(form.gender),
          phone:  (form.phone != orig.phone).then(|| form.phone.clone()),
          email:  {
            let new = (!form.email.is_empty()).then(|| form.email.clone());
            (new != orig.email).then_some(new)
          },
          status: (form.status != orig.status).then_some(form.status),
        };
        self
          .client
          .update_patient(orig.id, &patch)
          .await
          .map(|p| format!("Updated patient {}", p.id))
      }
      None => {
        let new = NewPatient {
          name:   form.name.clone(),
          dob,
          gender: form.gender,
          phone:  form.phone.clone(),
          email:  (!form.email.is_empty()).then(|| form.email.clone()),
          status: form.status,
        };
        self
          .client
          .create_patient(&new)
          .await
          .map(|p| format!("Registered patient {}", p.id))
      }
    };

    match result {
      Ok(msg) => {
        self.status_msg = msg;
        self.form = None;
        self.screen = Screen::PatientTable;
        let _ = self.reload().await;
      }
      // Stay in the form so the input can be corrected.
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }
}
