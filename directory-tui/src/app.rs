//! Application state and event handling
//!
//! All mutation happens here: key events and completed API calls come in,
//! the UI renders whatever state they leave behind. API calls run on spawned
//! tasks and report back through an mpsc channel, so the draw loop never
//! blocks on the network.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use directory_client::{ClientError, DirectoryClient};
use shared::models::Employee;
use tokio::sync::mpsc;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::TuiWidgetState;

use crate::form::{DeleteState, FormMode, FormState, Modal};
use crate::table::{SortField, TableQuery, visible};

/// Search keystrokes settle for this long before a fetch fires
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Completed API call, delivered from a spawned task
#[derive(Debug)]
pub enum AppEvent {
    Loaded(Result<Vec<Employee>, ClientError>),
    Created(Result<Employee, ClientError>),
    Updated(Result<Employee, ClientError>),
    Deleted(Result<(), ClientError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

pub struct App {
    client: DirectoryClient,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    pub employees: Vec<Employee>,
    pub query: TableQuery,
    pub search_input: Input,
    /// Keyboard focus is in the search box
    pub searching: bool,
    /// Deadline for the debounced search fetch
    pending_search_at: Option<Instant>,
    pub modal: Modal,
    pub toasts: Vec<Toast>,
    pub loading: bool,
    /// Row index into the current page
    pub selected: usize,
    pub show_logs: bool,
    pub logger_state: TuiWidgetState,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: DirectoryClient, events_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            client,
            events_tx,
            employees: Vec::new(),
            query: TableQuery::default(),
            search_input: Input::default(),
            searching: false,
            pending_search_at: None,
            modal: Modal::default(),
            toasts: Vec::new(),
            loading: true,
            selected: 0,
            show_logs: false,
            logger_state: TuiWidgetState::new(),
            should_quit: false,
        }
    }

    /// Employee currently under the cursor
    pub fn selected_employee(&self) -> Option<Employee> {
        let page = visible(&self.employees, &self.query);
        page.rows.get(self.selected).map(|e| (*e).clone())
    }

    fn toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        self.toasts.push(Toast {
            text: text.into(),
            kind,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    /// Fetch the employee list in the background
    pub fn refetch(&mut self) {
        self.loading = true;
        let client = self.client.clone();
        let search = self.query.search.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let term = (!search.trim().is_empty()).then(|| search.trim().to_string());
            let result = client.list(term.as_deref()).await;
            let _ = tx.send(AppEvent::Loaded(result));
        });
    }

    fn submit_form(&mut self) {
        let Modal::Form(form) = &mut self.modal else {
            return;
        };
        if form.submitting {
            return;
        }
        form.submitting = true;
        form.errors.clear();

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        match form.mode {
            FormMode::Create => {
                let payload = form.create_payload();
                tokio::spawn(async move {
                    let result = client.create(&payload).await;
                    let _ = tx.send(AppEvent::Created(result));
                });
            }
            FormMode::Edit(id) => {
                let payload = form.update_payload();
                tokio::spawn(async move {
                    let result = client.update(id, &payload).await;
                    let _ = tx.send(AppEvent::Updated(result));
                });
            }
        }
    }

    fn confirm_delete(&mut self) {
        let Modal::ConfirmDelete(dialog) = &mut self.modal else {
            return;
        };
        if dialog.deleting {
            return;
        }
        dialog.deleting = true;

        let id = dialog.target.id;
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.delete(id).await;
            let _ = tx.send(AppEvent::Deleted(result));
        });
    }

    /// Apply a completed API call
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Loaded(Ok(employees)) => {
                tracing::debug!(count = employees.len(), "employee list refreshed");
                self.employees = employees;
                self.loading = false;
                let page = visible(&self.employees, &self.query);
                if !page.rows.is_empty() && self.selected >= page.rows.len() {
                    self.selected = page.rows.len() - 1;
                }
            }
            AppEvent::Loaded(Err(err)) => {
                tracing::warn!(error = %err, "list fetch failed");
                self.loading = false;
                self.toast(ToastKind::Error, err.user_message());
            }
            AppEvent::Created(Ok(employee)) => {
                tracing::info!(id = employee.id, "employee created");
                self.modal = Modal::None;
                self.toast(ToastKind::Success, "Employee created successfully");
                self.refetch();
            }
            AppEvent::Updated(Ok(employee)) => {
                tracing::info!(id = employee.id, "employee updated");
                self.modal = Modal::None;
                self.toast(ToastKind::Success, "Employee updated successfully");
                self.refetch();
            }
            AppEvent::Created(Err(err)) | AppEvent::Updated(Err(err)) => {
                tracing::warn!(error = %err, "save failed");
                if let Modal::Form(form) = &mut self.modal {
                    form.submitting = false;
                    let field_errors = err.field_errors();
                    if field_errors.is_empty() {
                        self.toast(ToastKind::Error, err.user_message());
                    } else {
                        form.errors = field_errors.to_vec();
                    }
                } else {
                    self.toast(ToastKind::Error, err.user_message());
                }
            }
            AppEvent::Deleted(Ok(())) => {
                tracing::info!("employee deleted");
                self.modal = Modal::None;
                self.toast(ToastKind::Success, "Employee deleted successfully");
                self.refetch();
            }
            AppEvent::Deleted(Err(err)) => {
                tracing::warn!(error = %err, "delete failed");
                self.modal = Modal::None;
                self.toast(ToastKind::Error, err.user_message());
            }
        }
    }

    /// Periodic housekeeping: expire toasts, fire the debounced search
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires_at > now);

        if let Some(deadline) = self.pending_search_at
            && now >= deadline
        {
            self.pending_search_at = None;
            self.query.search = self.search_input.value().to_string();
            self.query.page = 1;
            self.selected = 0;
            self.refetch();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl-C quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.modal.is_open() {
            self.handle_modal_key(key);
        } else if self.searching {
            self.handle_search_key(key);
        } else {
            self.handle_table_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.searching = false;
                self.search_input.reset();
                if !self.query.search.is_empty() {
                    self.query.search.clear();
                    self.query.page = 1;
                    self.refetch();
                }
                self.pending_search_at = None;
            }
            KeyCode::Enter => {
                self.searching = false;
                // Apply immediately instead of waiting out the debounce
                self.pending_search_at = Some(Instant::now());
                self.on_tick();
            }
            _ => {
                if self
                    .search_input
                    .handle_event(&Event::Key(key))
                    .is_some()
                {
                    self.pending_search_at = Some(Instant::now() + SEARCH_DEBOUNCE);
                }
            }
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => {
                self.searching = true;
                self.search_input = Input::new(self.query.search.clone());
            }
            KeyCode::Char('a') => self.modal = Modal::Form(FormState::create()),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(employee) = self.selected_employee() {
                    self.modal = Modal::Form(FormState::edit(&employee));
                }
            }
            KeyCode::Char('d') => {
                if let Some(employee) = self.selected_employee() {
                    self.modal = Modal::ConfirmDelete(DeleteState::new(employee));
                }
            }
            KeyCode::Char('r') => self.refetch(),
            KeyCode::Char('1') => self.sort_by(SortField::Name),
            KeyCode::Char('2') => self.sort_by(SortField::Email),
            KeyCode::Char('3') => self.sort_by(SortField::Position),
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('l') | KeyCode::Right => self.change_page(1),
            KeyCode::Char('h') | KeyCode::Left => self.change_page(-1),
            KeyCode::Char('L') => self.show_logs = !self.show_logs,
            KeyCode::PageUp => self
                .logger_state
                .transition(tui_logger::TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => self
                .logger_state
                .transition(tui_logger::TuiWidgetEvent::NextPageKey),
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match &mut self.modal {
            Modal::Form(form) => match key.code {
                KeyCode::Esc => self.modal = Modal::None,
                KeyCode::Enter => self.submit_form(),
                KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
                KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
                _ => {
                    form.focused_input_mut().handle_event(&Event::Key(key));
                }
            },
            Modal::ConfirmDelete(_) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Esc => self.modal = Modal::None,
                _ => {}
            },
            Modal::None => {}
        }
    }

    fn sort_by(&mut self, field: SortField) {
        self.query.toggle_sort(field);
        self.selected = 0;
    }

    fn move_selection(&mut self, delta: i64) {
        let page = visible(&self.employees, &self.query);
        if page.rows.is_empty() {
            self.selected = 0;
            return;
        }
        let max = page.rows.len() as i64 - 1;
        self.selected = (self.selected as i64 + delta).clamp(0, max) as usize;
    }

    fn change_page(&mut self, delta: i64) {
        let page = visible(&self.employees, &self.query);
        let next = (page.page as i64 + delta).clamp(1, page.total_pages as i64) as usize;
        if next != page.page {
            self.query.page = next;
            self.selected = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let client = DirectoryClient::new("http://127.0.0.1:1").unwrap();
        App::new(client, tx)
    }

    fn employee(id: i64, name: &str) -> Employee {
        let now = Utc::now();
        Employee {
            id,
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            position: "Engineer".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn loaded_list_replaces_rows_and_clears_loading() {
        let mut app = test_app();
        app.handle_event(AppEvent::Loaded(Ok(vec![
            employee(1, "Alice"),
            employee(2, "Bob"),
        ])));
        assert_eq!(app.employees.len(), 2);
        assert!(!app.loading);
    }

    #[tokio::test]
    async fn validation_failure_keeps_form_open_with_field_errors() {
        let mut app = test_app();
        app.modal = Modal::Form(FormState::create());
        if let Modal::Form(form) = &mut app.modal {
            form.submitting = true;
        }

        app.handle_event(AppEvent::Created(Err(ClientError::Validation(vec![
            shared::validation::FieldError::new("email", "Invalid email format"),
        ]))));

        let Modal::Form(form) = &app.modal else {
            panic!("form should stay open");
        };
        assert!(!form.submitting);
        assert_eq!(form.errors.len(), 1);
        assert!(app.toasts.is_empty());
    }

    #[tokio::test]
    async fn rejected_save_surfaces_a_toast() {
        let mut app = test_app();
        app.modal = Modal::Form(FormState::create());

        app.handle_event(AppEvent::Created(Err(ClientError::Rejected(
            "Email already exists".into(),
        ))));

        assert!(matches!(app.modal, Modal::Form(_)));
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.toasts[0].kind, ToastKind::Error);
        assert_eq!(app.toasts[0].text, "Email already exists");
    }

    #[tokio::test]
    async fn delete_success_closes_dialog_and_toasts() {
        let mut app = test_app();
        app.modal = Modal::ConfirmDelete(DeleteState::new(employee(1, "Alice")));

        app.handle_event(AppEvent::Deleted(Ok(())));

        assert!(!app.modal.is_open());
        assert_eq!(app.toasts[0].text, "Employee deleted successfully");
        assert_eq!(app.toasts[0].kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn debounce_applies_search_after_deadline() {
        let mut app = test_app();
        app.employees = vec![employee(1, "Alice"), employee(2, "Bob")];
        app.search_input = Input::new("ali".into());
        app.pending_search_at = Some(Instant::now() - Duration::from_millis(1));

        app.on_tick();

        assert!(app.pending_search_at.is_none());
        assert_eq!(app.query.search, "ali");
        assert_eq!(app.query.page, 1);
    }

    #[tokio::test]
    async fn pending_search_waits_for_its_deadline() {
        let mut app = test_app();
        app.search_input = Input::new("bo".into());
        app.pending_search_at = Some(Instant::now() + SEARCH_DEBOUNCE);

        app.on_tick();

        assert!(app.pending_search_at.is_some());
        assert_eq!(app.query.search, "");
    }

    #[tokio::test]
    async fn selection_is_clamped_to_page_rows() {
        let mut app = test_app();
        app.employees = vec![employee(1, "Alice"), employee(2, "Bob")];
        app.move_selection(5);
        assert_eq!(app.selected, 1);
        app.move_selection(-5);
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn toasts_expire_on_tick() {
        let mut app = test_app();
        app.toasts.push(Toast {
            text: "old".into(),
            kind: ToastKind::Success,
            expires_at: Instant::now() - Duration::from_millis(1),
        });
        app.on_tick();
        assert!(app.toasts.is_empty());
    }
}
