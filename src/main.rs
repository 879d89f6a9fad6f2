//! Empresas - Terminal Company Manager
//!
//! A terminal client for managing "empresas" (companies) against a remote
//! REST API: a creation form, a list view with delete and CSV export, and
//! a card display for each record.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;

mod application;
mod domain;
mod infrastructure;
mod presentation;

use application::{ApiRequest, App};
use infrastructure::EmpresaClient;
use presentation::{CARD_HEIGHT, InputHandler, render_ui};

const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Entry point for the empresas terminal client.
///
/// Resolves the API base URL (first argument, then `EMPRESAS_API_URL`,
/// then a localhost default), sets up the terminal interface and runs the
/// main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("EMPRESAS_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let client = EmpresaClient::new(base_url);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let res = run_app(&mut terminal, &mut app, &client);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Renders a frame, then either executes the single queued API request or
/// waits for the next key press. Executing after the draw keeps loading
/// and "saving" states on screen while the blocking call runs, and means
/// at most one request is ever in flight.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &EmpresaClient,
) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.update_viewport_cards((size.height.saturating_sub(6) / CARD_HEIGHT) as usize);
        terminal.draw(|f| render_ui(f, app))?;

        if let Some(request) = app.take_pending_request() {
            execute_request(app, client, request);
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q')
                        if matches!(app.mode, application::AppMode::Normal) =>
                    {
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}

fn execute_request(app: &mut App, client: &EmpresaClient, request: ApiRequest) {
    match request {
        ApiRequest::FetchEmpresas => app.set_fetch_result(client.list()),
        ApiRequest::CreateEmpresa(draft) => app.set_submit_result(client.create(&draft)),
        ApiRequest::DeleteEmpresa(id) => app.set_delete_result(client.delete(id)),
    }
}
