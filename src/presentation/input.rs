use crate::application::{App, AppMode, Screen, StatusMessage};
use crate::infrastructure::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => match app.screen {
                Screen::Form => Self::handle_form_screen(app, key, modifiers),
                Screen::List => Self::handle_list_screen(app, key, modifiers),
            },
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::ConfirmDelete => Self::handle_confirm_mode(app, key),
            AppMode::ExportCsv => Self::handle_filename_input_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_form_screen(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('s') = key {
                app.submit_requested();
                return;
            }
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.status_message = None;
                app.previous_field();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.status_message = None;
                app.next_field();
            }
            KeyCode::Enter | KeyCode::F(2) => {
                app.start_field_edit();
            }
            KeyCode::Char(' ') => {
                app.toggle_active();
            }
            KeyCode::Tab => {
                app.status_message = None;
                app.focus_list();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.open_help();
            }
            _ => {}
        }
    }

    fn handle_list_screen(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
                return;
            }
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.status_message = None;
                app.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.status_message = None;
                app.select_next();
            }
            KeyCode::Char('r') => {
                app.status_message = None;
                app.request_refresh();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                app.request_delete();
            }
            KeyCode::Char('y') => {
                Self::copy_selected(app);
            }
            KeyCode::Tab => {
                app.status_message = None;
                app.focus_form();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.open_help();
            }
            _ => {}
        }
    }

    fn handle_confirm_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                app.confirm_delete();
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                app.cancel_delete();
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                app.finish_field_edit();
            }
            KeyCode::Esc => {
                app.cancel_field_edit();
            }
            KeyCode::Backspace => {
                if let Some(prev) = app.input[..app.cursor_position].chars().next_back() {
                    app.cursor_position -= prev.len_utf8();
                    app.input.remove(app.cursor_position);
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.input.len() {
                    app.input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if let Some(prev) = app.input[..app.cursor_position].chars().next_back() {
                    app.cursor_position -= prev.len_utf8();
                }
            }
            KeyCode::Right => {
                if let Some(next) = app.input[app.cursor_position..].chars().next() {
                    app.cursor_position += next.len_utf8();
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.input.len();
            }
            KeyCode::Char(c) => {
                app.input.insert(app.cursor_position, c);
                app.cursor_position += c.len_utf8();
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = CsvExporter::export_empresas(&app.empresas, &filename);
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if let Some(prev) = app.filename_input[..app.cursor_position].chars().next_back()
                {
                    app.cursor_position -= prev.len_utf8();
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if let Some(prev) = app.filename_input[..app.cursor_position].chars().next_back()
                {
                    app.cursor_position -= prev.len_utf8();
                }
            }
            KeyCode::Right => {
                if let Some(next) = app.filename_input[app.cursor_position..].chars().next() {
                    app.cursor_position += next.len_utf8();
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += c.len_utf8();
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn copy_selected(app: &mut App) {
        let (summary, name) = match app.selected_empresa() {
            Some(empresa) => (empresa.summary(), empresa.name.clone()),
            None => return,
        };
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(summary)) {
            Ok(()) => {
                app.status_message = Some(StatusMessage::info(format!(
                    "Resumen de {} copiado al portapapeles",
                    name
                )));
            }
            Err(err) => {
                app.status_message =
                    Some(StatusMessage::error(format!("No se pudo copiar: {}", err)));
            }
        }
    }
}
