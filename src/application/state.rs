//! Application state management for the empresas terminal client.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface. Network work is never performed here:
//! state transitions queue an [`ApiRequest`] and later consume its result,
//! so every workflow can be exercised without a server.

use crate::domain::{ApiResult, Empresa, EmpresaDraft};

/// Which screen currently owns the main area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    /// Creation form for a new company
    Form,
    /// Company list with delete
    List,
}

/// Represents the current input mode of the application.
///
/// The mode determines how key presses are interpreted and which
/// overlays are displayed on top of the active screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    /// Normal navigation mode for the active screen
    Normal,
    /// A form field is being edited
    Editing,
    /// Delete confirmation dialog is open
    ConfirmDelete,
    /// CSV export dialog is open
    ExportCsv,
    /// Help screen is displayed
    Help,
}

/// Fields of the creation form, in display order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    CreationDate,
    Description,
    Revenue,
    StockPercentage,
    IsActive,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::CreationDate,
        FormField::Description,
        FormField::Revenue,
        FormField::StockPercentage,
        FormField::IsActive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Nombre de la empresa",
            FormField::CreationDate => "Fecha de creacion (AAAA-MM-DD)",
            FormField::Description => "Descripcion",
            FormField::Revenue => "Facturacion de la empresa",
            FormField::StockPercentage => "Porcentage en la bolsa",
            FormField::IsActive => "¿Esta activa?",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Name => "Ej: Pilla Diamante",
            FormField::CreationDate => "1880-12-12",
            FormField::Revenue => "Ej: 435876",
            FormField::StockPercentage => "Ej: 49,9",
            FormField::Description | FormField::IsActive => "",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// A network call queued by a state transition.
///
/// The main loop drains at most one request per frame and feeds the
/// outcome back through the matching `set_*_result` method.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// Reload the full company collection
    FetchEmpresas,
    /// Submit the draft as a new company
    CreateEmpresa(EmpresaDraft),
    /// Delete the company with the given id
    DeleteEmpresa(u32),
}

/// Severity of a status notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-shot user-facing notification shown in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

/// Main application state containing the draft, the list and UI state.
///
/// # Examples
///
/// ```
/// use empresas::application::{App, ApiRequest, Screen};
///
/// let mut app = App::default();
/// assert!(matches!(app.screen, Screen::List));
/// // The list screen starts with a fetch already queued.
/// assert_eq!(app.take_pending_request(), Some(ApiRequest::FetchEmpresas));
/// ```
#[derive(Debug)]
pub struct App {
    /// Screen currently owning the main area
    pub screen: Screen,
    /// Current input mode
    pub mode: AppMode,
    /// Draft record held by the creation form
    pub draft: EmpresaDraft,
    /// Form field that currently has focus
    pub selected_field: FormField,
    /// Current input buffer (for editing mode)
    pub input: String,
    /// Cursor position within the active input buffer
    pub cursor_position: usize,
    /// Companies as of the last successful fetch
    pub empresas: Vec<Empresa>,
    /// Index of the selected card (zero-based)
    pub selected_index: usize,
    /// First card visible in the viewport
    pub list_scroll: usize,
    /// Number of cards that fit in the viewport
    pub viewport_cards: usize,
    /// Whether a fetch is pending
    pub loading: bool,
    /// Whether a submission is pending; submit is refused meanwhile
    pub submitting: bool,
    /// Single-slot queue of outgoing API work
    pending_request: Option<ApiRequest>,
    /// Id awaiting delete confirmation
    pub pending_delete: Option<u32>,
    /// Temporary status notification to display
    pub status_message: Option<StatusMessage>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            screen: Screen::List,
            mode: AppMode::Normal,
            draft: EmpresaDraft::default(),
            selected_field: FormField::Name,
            input: String::new(),
            cursor_position: 0,
            empresas: Vec::new(),
            selected_index: 0,
            list_scroll: 0,
            viewport_cards: 4,
            loading: true,
            submitting: false,
            // Startup counts as the list gaining focus
            pending_request: Some(ApiRequest::FetchEmpresas),
            pending_delete: None,
            status_message: None,
            filename_input: String::new(),
            help_scroll: 0,
        }
    }
}

impl App {
    /// Takes the queued API request, if any, leaving the slot empty.
    pub fn take_pending_request(&mut self) -> Option<ApiRequest> {
        self.pending_request.take()
    }

    /// Read-only view of the queued API request.
    pub fn pending_request(&self) -> Option<&ApiRequest> {
        self.pending_request.as_ref()
    }

    /// The company under the cursor on the list screen.
    pub fn selected_empresa(&self) -> Option<&Empresa> {
        self.empresas.get(self.selected_index)
    }

    /// Switches to the list screen and queues a fresh fetch.
    ///
    /// Every gain of focus reloads the collection wholesale; there is no
    /// incremental merge.
    pub fn focus_list(&mut self) {
        self.screen = Screen::List;
        self.request_refresh();
    }

    /// Switches to the creation form screen.
    pub fn focus_form(&mut self) {
        self.screen = Screen::Form;
    }

    /// Queues a full reload of the company collection.
    pub fn request_refresh(&mut self) {
        if self.pending_request.is_some() {
            return;
        }
        self.loading = true;
        self.pending_request = Some(ApiRequest::FetchEmpresas);
    }

    /// Processes the result of a fetch.
    ///
    /// On success the local list is replaced wholesale and the selection
    /// clamped. On failure the previously displayed list is left unchanged
    /// and an error notification is surfaced.
    pub fn set_fetch_result(&mut self, result: ApiResult<Vec<Empresa>>) {
        self.loading = false;
        match result {
            Ok(empresas) => {
                self.empresas = empresas;
                if self.empresas.is_empty() {
                    self.selected_index = 0;
                    self.list_scroll = 0;
                } else {
                    if self.selected_index >= self.empresas.len() {
                        self.selected_index = self.empresas.len() - 1;
                    }
                    self.ensure_selected_visible();
                }
            }
            Err(err) => {
                let text = err
                    .server_message()
                    .unwrap_or("No se pudieron cargar los datos")
                    .to_string();
                self.status_message = Some(StatusMessage::error(text));
            }
        }
    }

    /// Moves the card selection down one entry.
    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.empresas.len() {
            self.selected_index += 1;
            self.ensure_selected_visible();
        }
    }

    /// Moves the card selection up one entry.
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.ensure_selected_visible();
        }
    }

    /// Updates the viewport size for proper scrolling calculations.
    pub fn update_viewport_cards(&mut self, cards: usize) {
        self.viewport_cards = cards.max(1);
    }

    /// Ensures the selected card is visible by adjusting scroll position.
    pub fn ensure_selected_visible(&mut self) {
        if self.selected_index < self.list_scroll {
            self.list_scroll = self.selected_index;
        } else if self.selected_index >= self.list_scroll + self.viewport_cards {
            self.list_scroll = self.selected_index + 1 - self.viewport_cards;
        }
    }

    /// Moves form focus to the next field.
    pub fn next_field(&mut self) {
        let idx = self.selected_field.index();
        if idx + 1 < FormField::ALL.len() {
            self.selected_field = FormField::ALL[idx + 1];
        }
    }

    /// Moves form focus to the previous field.
    pub fn previous_field(&mut self) {
        let idx = self.selected_field.index();
        if idx > 0 {
            self.selected_field = FormField::ALL[idx - 1];
        }
    }

    /// Begins editing the focused field.
    ///
    /// Text fields load their current draft value into the input buffer;
    /// the active flag toggles in place instead of entering editing mode.
    pub fn start_field_edit(&mut self) {
        if matches!(self.selected_field, FormField::IsActive) {
            self.toggle_active();
            return;
        }
        self.mode = AppMode::Editing;
        self.input = self.draft_field(self.selected_field).to_string();
        self.cursor_position = self.input.len();
        self.status_message = None;
    }

    /// Commits the input buffer into the focused draft field.
    pub fn finish_field_edit(&mut self) {
        let value = std::mem::take(&mut self.input);
        self.set_draft_field(self.selected_field, value);
        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    /// Cancels editing without touching the draft.
    pub fn cancel_field_edit(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Flips the draft's active flag.
    pub fn toggle_active(&mut self) {
        self.draft.is_active = !self.draft.is_active;
    }

    fn draft_field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::CreationDate => &self.draft.creation_date,
            FormField::Description => &self.draft.description,
            FormField::Revenue => &self.draft.revenue,
            FormField::StockPercentage => &self.draft.stock_percentage,
            FormField::IsActive => "",
        }
    }

    fn set_draft_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.draft.name = value,
            FormField::CreationDate => self.draft.creation_date = value,
            FormField::Description => self.draft.description = value,
            FormField::Revenue => self.draft.revenue = value,
            FormField::StockPercentage => self.draft.stock_percentage = value,
            FormField::IsActive => {}
        }
    }

    /// Attempts to submit the draft.
    ///
    /// Rejects with a user-facing validation message if `name` or
    /// `creation_date` is empty; no request is queued in that case. While a
    /// request is already pending the submission is refused silently, so at
    /// most one is ever in flight.
    pub fn submit_requested(&mut self) {
        if self.submitting || self.pending_request.is_some() {
            return;
        }
        match self.draft.validate() {
            Ok(()) => {
                self.submitting = true;
                self.status_message = Some(StatusMessage::info("Guardando empresa..."));
                self.pending_request = Some(ApiRequest::CreateEmpresa(self.draft.clone()));
            }
            Err(msg) => {
                self.status_message = Some(StatusMessage::error(msg));
            }
        }
    }

    /// Processes the result of a submission.
    ///
    /// The draft is reset to its defaults only on success; a failed
    /// submission keeps the typed values for correction.
    pub fn set_submit_result(&mut self, result: ApiResult<()>) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.draft = EmpresaDraft::default();
                self.selected_field = FormField::Name;
                self.status_message =
                    Some(StatusMessage::info("Empresa guardada correctamente"));
            }
            Err(err) => {
                let text = err
                    .server_message()
                    .unwrap_or("No se pudo guardar la empresa")
                    .to_string();
                self.status_message = Some(StatusMessage::error(text));
            }
        }
    }

    /// Opens the delete confirmation dialog for the selected company.
    pub fn request_delete(&mut self) {
        if let Some(empresa) = self.selected_empresa() {
            self.pending_delete = Some(empresa.id);
            self.mode = AppMode::ConfirmDelete;
            self.status_message = None;
        }
    }

    /// Confirms the pending delete and queues the request.
    pub fn confirm_delete(&mut self) {
        self.mode = AppMode::Normal;
        if let Some(id) = self.pending_delete.take() {
            if self.pending_request.is_none() {
                self.pending_request = Some(ApiRequest::DeleteEmpresa(id));
            }
        }
    }

    /// Declines the pending delete. No request is issued.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = AppMode::Normal;
    }

    /// Processes the result of a delete.
    ///
    /// On success a fresh fetch is queued to converge the list; on failure
    /// an error is reported and the displayed list is left as is.
    pub fn set_delete_result(&mut self, result: ApiResult<()>) {
        match result {
            Ok(()) => {
                self.status_message = Some(StatusMessage::info("Empresa eliminada"));
                self.request_refresh();
            }
            Err(_) => {
                self.status_message =
                    Some(StatusMessage::error("No se pudo eliminar el registro"));
            }
        }
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "empresas.csv".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Gets the filename to use for CSV export.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "empresas.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Processes the result of a CSV export operation.
    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message =
                    Some(StatusMessage::info(format!("Exportado a {}", filename)));
            }
            Err(error) => {
                self.status_message =
                    Some(StatusMessage::error(format!("No se pudo exportar: {}", error)));
            }
        }
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Opens the help popup.
    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiError;

    fn empresa(id: u32, name: &str) -> Empresa {
        Empresa {
            id,
            name: name.to_string(),
            description: String::new(),
            creation_date: "2000-01-01".to_string(),
            is_active: true,
            revenue: "100".to_string(),
            stock_percentage: "10".to_string(),
        }
    }

    #[test]
    fn test_app_default() {
        let mut app = App::default();
        assert!(matches!(app.screen, Screen::List));
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.loading);
        assert!(!app.submitting);
        assert!(app.empresas.is_empty());
        assert_eq!(app.take_pending_request(), Some(ApiRequest::FetchEmpresas));
        assert_eq!(app.take_pending_request(), None);
    }

    #[test]
    fn test_submit_empty_name_queues_nothing() {
        let mut app = App::default();
        app.take_pending_request();
        app.draft.creation_date = "2020-05-05".to_string();

        app.submit_requested();

        assert_eq!(app.pending_request(), None);
        assert!(!app.submitting);
        let status = app.status_message.expect("validation message");
        assert_eq!(status.level, StatusLevel::Error);
    }

    #[test]
    fn test_submit_empty_date_queues_nothing() {
        let mut app = App::default();
        app.take_pending_request();
        app.draft.name = "Acme".to_string();

        app.submit_requested();

        assert_eq!(app.pending_request(), None);
        assert!(!app.submitting);
    }

    #[test]
    fn test_submit_valid_draft_queues_create() {
        let mut app = App::default();
        app.take_pending_request();
        app.draft.name = "Acme".to_string();
        app.draft.creation_date = "2020-05-05".to_string();

        app.submit_requested();

        assert!(app.submitting);
        match app.take_pending_request() {
            Some(ApiRequest::CreateEmpresa(draft)) => assert_eq!(draft.name, "Acme"),
            other => panic!("expected create request, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_refused_while_request_pending() {
        let mut app = App::default();
        // Startup fetch still queued.
        app.draft.name = "Acme".to_string();
        app.draft.creation_date = "2020-05-05".to_string();

        app.submit_requested();

        assert!(!app.submitting);
        assert_eq!(app.pending_request(), Some(&ApiRequest::FetchEmpresas));
    }

    #[test]
    fn test_successful_submit_resets_draft() {
        let mut app = App::default();
        app.take_pending_request();
        app.draft.name = "Acme".to_string();
        app.draft.creation_date = "2020-05-05".to_string();
        app.draft.is_active = false;
        app.submit_requested();
        app.take_pending_request();

        app.set_submit_result(Ok(()));

        assert_eq!(app.draft, EmpresaDraft::default());
        assert!(app.draft.is_active);
        assert!(!app.submitting);
        assert_eq!(app.status_message.unwrap().level, StatusLevel::Info);
    }

    #[test]
    fn test_failed_submit_keeps_draft() {
        let mut app = App::default();
        app.take_pending_request();
        app.draft.name = "Acme".to_string();
        app.draft.creation_date = "2020-05-05".to_string();
        app.submit_requested();
        app.take_pending_request();

        app.set_submit_result(Err(ApiError::Server {
            status: 422,
            message: Some("nombre duplicado".to_string()),
        }));

        assert_eq!(app.draft.name, "Acme");
        assert!(!app.submitting);
        let status = app.status_message.unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert_eq!(status.text, "nombre duplicado");
    }

    #[test]
    fn test_fetch_replaces_list_wholesale() {
        let mut app = App::default();
        app.take_pending_request();
        app.empresas = vec![empresa(1, "a"), empresa(2, "b"), empresa(3, "c")];
        app.selected_index = 2;

        app.set_fetch_result(Ok(vec![empresa(1, "a")]));

        assert_eq!(app.empresas.len(), 1);
        assert_eq!(app.selected_index, 0);
        assert!(!app.loading);
    }

    #[test]
    fn test_fetch_failure_leaves_list_unchanged() {
        let mut app = App::default();
        app.take_pending_request();
        app.empresas = vec![empresa(1, "a"), empresa(2, "b")];
        app.loading = true;

        app.set_fetch_result(Err(ApiError::Network("timeout".to_string())));

        assert_eq!(app.empresas.len(), 2);
        assert!(!app.loading);
        let status = app.status_message.unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert_eq!(status.text, "No se pudieron cargar los datos");
    }

    #[test]
    fn test_delete_declined_queues_nothing() {
        let mut app = App::default();
        app.take_pending_request();
        app.empresas = vec![empresa(9, "a")];

        app.request_delete();
        assert!(matches!(app.mode, AppMode::ConfirmDelete));
        assert_eq!(app.pending_delete, Some(9));

        app.cancel_delete();

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.pending_delete, None);
        assert_eq!(app.pending_request(), None);
    }

    #[test]
    fn test_delete_confirmed_queues_request() {
        let mut app = App::default();
        app.take_pending_request();
        app.empresas = vec![empresa(9, "a")];

        app.request_delete();
        app.confirm_delete();

        assert_eq!(app.take_pending_request(), Some(ApiRequest::DeleteEmpresa(9)));
        assert_eq!(app.pending_delete, None);
    }

    #[test]
    fn test_delete_on_empty_list_is_noop() {
        let mut app = App::default();
        app.take_pending_request();

        app.request_delete();

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.pending_delete, None);
    }

    #[test]
    fn test_successful_delete_queues_fresh_fetch() {
        let mut app = App::default();
        app.take_pending_request();
        app.empresas = vec![empresa(9, "a")];

        app.set_delete_result(Ok(()));

        assert_eq!(app.take_pending_request(), Some(ApiRequest::FetchEmpresas));
        assert_eq!(app.status_message.unwrap().level, StatusLevel::Info);
    }

    #[test]
    fn test_failed_delete_does_not_refetch() {
        let mut app = App::default();
        app.take_pending_request();
        app.empresas = vec![empresa(9, "a")];

        app.set_delete_result(Err(ApiError::Server {
            status: 500,
            message: None,
        }));

        assert_eq!(app.pending_request(), None);
        assert_eq!(app.empresas.len(), 1);
        assert_eq!(
            app.status_message.unwrap().text,
            "No se pudo eliminar el registro"
        );
    }

    #[test]
    fn test_focus_list_queues_fetch() {
        let mut app = App::default();
        app.take_pending_request();
        app.screen = Screen::Form;
        app.loading = false;

        app.focus_list();

        assert!(matches!(app.screen, Screen::List));
        assert!(app.loading);
        assert_eq!(app.pending_request(), Some(&ApiRequest::FetchEmpresas));
    }

    #[test]
    fn test_field_edit_roundtrip() {
        let mut app = App::default();
        app.take_pending_request();
        app.focus_form();

        app.start_field_edit();
        assert!(matches!(app.mode, AppMode::Editing));
        app.input = "Pilla Diamante".to_string();
        app.finish_field_edit();

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.draft.name, "Pilla Diamante");
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_field_edit_cancel_keeps_draft() {
        let mut app = App::default();
        app.take_pending_request();
        app.focus_form();
        app.draft.name = "Acme".to_string();

        app.start_field_edit();
        app.input = "scratch".to_string();
        app.cancel_field_edit();

        assert_eq!(app.draft.name, "Acme");
        assert!(matches!(app.mode, AppMode::Normal));
    }

    #[test]
    fn test_is_active_toggles_instead_of_editing() {
        let mut app = App::default();
        app.take_pending_request();
        app.focus_form();
        app.selected_field = FormField::IsActive;

        app.start_field_edit();

        assert!(matches!(app.mode, AppMode::Normal));
        assert!(!app.draft.is_active);
    }

    #[test]
    fn test_field_navigation_clamps() {
        let mut app = App::default();
        app.previous_field();
        assert_eq!(app.selected_field, FormField::Name);

        for _ in 0..10 {
            app.next_field();
        }
        assert_eq!(app.selected_field, FormField::IsActive);
    }

    #[test]
    fn test_list_scrolling_follows_selection() {
        let mut app = App::default();
        app.take_pending_request();
        app.empresas = (0..10).map(|i| empresa(i, "e")).collect();
        app.update_viewport_cards(3);

        for _ in 0..5 {
            app.select_next();
        }
        assert_eq!(app.selected_index, 5);
        assert_eq!(app.list_scroll, 3);

        for _ in 0..5 {
            app.select_previous();
        }
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.list_scroll, 0);
    }

    #[test]
    fn test_csv_export_dialog_flow() {
        let mut app = App::default();
        app.take_pending_request();

        app.start_csv_export();
        assert!(matches!(app.mode, AppMode::ExportCsv));
        assert_eq!(app.get_csv_export_filename(), "empresas.csv");

        app.filename_input.clear();
        assert_eq!(app.get_csv_export_filename(), "empresas.csv");

        app.set_csv_export_result(Ok("listado.csv".to_string()));
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.status_message.unwrap().text.contains("listado.csv"));
    }
}
