//! Modal state: create/edit form and delete confirmation

use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::validation::FieldError;
use tui_input::Input;

/// Whether the form creates a new employee or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Focusable form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Position,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Position,
            FormField::Position => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Position,
            FormField::Email => FormField::Name,
            FormField::Position => FormField::Email,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Position => "Position",
        }
    }

    fn wire_name(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Position => "position",
        }
    }
}

/// Create/edit form state
#[derive(Debug)]
pub struct FormState {
    pub mode: FormMode,
    pub name: Input,
    pub email: Input,
    pub position: Input,
    pub focus: FormField,
    /// Server-reported field errors from the last submit
    pub errors: Vec<FieldError>,
    /// Submit in flight; further submits are ignored until it resolves
    pub submitting: bool,
}

impl FormState {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            name: Input::default(),
            email: Input::default(),
            position: Input::default(),
            focus: FormField::Name,
            errors: Vec::new(),
            submitting: false,
        }
    }

    /// Form pre-filled with the employee being edited
    pub fn edit(employee: &Employee) -> Self {
        Self {
            mode: FormMode::Edit(employee.id),
            name: Input::new(employee.name.clone()),
            email: Input::new(employee.email.clone()),
            position: Input::new(employee.position.clone()),
            focus: FormField::Name,
            errors: Vec::new(),
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => " Add Employee ",
            FormMode::Edit(_) => " Edit Employee ",
        }
    }

    pub fn focused_input(&self) -> &Input {
        match self.focus {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Position => &self.position,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut Input {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Position => &mut self.position,
        }
    }

    /// Error message for a field, if the last submit reported one
    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field.wire_name())
            .map(|e| e.message.as_str())
    }

    pub fn create_payload(&self) -> EmployeeCreate {
        EmployeeCreate {
            name: self.name.value().to_string(),
            email: self.email.value().to_string(),
            position: self.position.value().to_string(),
        }
    }

    /// Edit always resubmits all three fields; the server treats a full
    /// update the same as a partial one.
    pub fn update_payload(&self) -> EmployeeUpdate {
        EmployeeUpdate {
            name: Some(self.name.value().to_string()),
            email: Some(self.email.value().to_string()),
            position: Some(self.position.value().to_string()),
        }
    }
}

/// Delete confirmation dialog state
#[derive(Debug)]
pub struct DeleteState {
    pub target: Employee,
    /// Delete request in flight
    pub deleting: bool,
}

impl DeleteState {
    pub fn new(target: Employee) -> Self {
        Self {
            target,
            deleting: false,
        }
    }
}

/// Active modal, if any
#[derive(Debug, Default)]
pub enum Modal {
    #[default]
    None,
    Form(FormState),
    ConfirmDelete(DeleteState),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }
}
