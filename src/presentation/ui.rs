use crate::application::{App, AppMode, FormField, Screen, StatusLevel};
use crate::domain::Empresa;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub const CARD_HEIGHT: u16 = 6;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.screen {
        Screen::Form => render_form(f, app, chunks[1]),
        Screen::List => render_list(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::ConfirmDelete) {
        render_confirm_popup(f);
    }
    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let tab_style = |active: bool| {
        if active {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        }
    };

    let header = Line::from(vec![
        Span::styled("empresas", Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(" Alta ", tab_style(matches!(app.screen, Screen::Form))),
        Span::raw(" "),
        Span::styled(" Listado ", tab_style(matches!(app.screen, Screen::List))),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut rows = Vec::new();
    for field in FormField::ALL {
        let selected = field == app.selected_field;
        let editing = selected && matches!(app.mode, AppMode::Editing);

        let label_style = if selected {
            Style::default().bg(Color::LightBlue).fg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow)
        };

        let (value, value_style) = form_value(app, field, editing);
        rows.push(Row::new(vec![
            Cell::from(field.label()).style(label_style),
            Cell::from(value).style(value_style),
        ]));
    }

    let widths = [Constraint::Length(30), Constraint::Min(0)];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Nueva Empresa"))
        .column_spacing(2);
    f.render_widget(table, chunks[0]);

    let button = if app.submitting {
        Span::styled("[ Guardando... ]", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            "[ Ctrl+S: Guardar Empresa ]",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    };
    f.render_widget(
        Paragraph::new(Line::from(button)).alignment(Alignment::Center),
        chunks[1],
    );
}

fn form_value(app: &App, field: FormField, editing: bool) -> (String, Style) {
    if editing {
        return (app.input.clone(), Style::default().fg(Color::Green));
    }
    if matches!(field, FormField::IsActive) {
        let value = if app.draft.is_active { "[x] Si" } else { "[ ] No" };
        return (value.to_string(), Style::default());
    }
    let current = match field {
        FormField::Name => &app.draft.name,
        FormField::CreationDate => &app.draft.creation_date,
        FormField::Description => &app.draft.description,
        FormField::Revenue => &app.draft.revenue,
        FormField::StockPercentage => &app.draft.stock_percentage,
        FormField::IsActive => unreachable!(),
    };
    if current.is_empty() {
        (
            field.placeholder().to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        (current.clone(), Style::default())
    }
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.empresas.is_empty() {
        "Listado de empresas".to_string()
    } else {
        format!(
            "Listado de empresas ({}/{})",
            app.selected_index + 1,
            app.empresas.len()
        )
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.empresas.is_empty() {
        let text = if app.loading {
            "Cargando empresas..."
        } else {
            "No hay empresas disponibles"
        };
        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            centered_line(inner),
        );
        return;
    }

    let mut y = inner.y;
    for (i, empresa) in app.empresas.iter().enumerate().skip(app.list_scroll) {
        if y + 3 > inner.bottom() {
            break;
        }
        let card_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: CARD_HEIGHT.min(inner.bottom() - y),
        };
        render_empresa_card(f, empresa, i == app.selected_index, card_area);
        y += CARD_HEIGHT;
    }
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1.min(area.height),
    }
}

fn render_empresa_card(f: &mut Frame, empresa: &Empresa, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = Line::from(vec![
        Span::styled(
            empresa.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  Empresa - desde {}", empresa.creation_date),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    if selected {
        block = block.title_bottom(
            Line::from(Span::styled(
                " d: eliminar ",
                Style::default().fg(Color::Red),
            ))
            .right_aligned(),
        );
    }

    let description = if empresa.description.is_empty() {
        "No hay descripcion disponible."
    } else {
        empresa.description.as_str()
    };
    let active_line = if empresa.is_active {
        Span::styled(" - Esta activa", Style::default().fg(Color::Green))
    } else {
        Span::styled(" - No esta activa", Style::default().fg(Color::Red))
    };

    let lines = vec![
        Line::from(description.to_string()),
        Line::from(format!(
            " - Facturacion de la empresa: {}",
            empresa.revenue
        )),
        Line::from(format!(
            " - Porcentage en la bolsa: {}",
            empresa.stock_percentage
        )),
        Line::from(active_line),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.text.clone()
            } else {
                match app.screen {
                    Screen::Form => {
                        "↑/↓: campo | Enter: editar | Espacio: activa | Ctrl+S: guardar | Tab: listado | F1/?: ayuda | q: salir".to_string()
                    }
                    Screen::List => {
                        "↑/↓: empresa | d: eliminar | r: recargar | y: copiar | Ctrl+E: exportar CSV | Tab: alta | F1/?: ayuda | q: salir".to_string()
                    }
                }
            }
        }
        AppMode::Editing => format!(
            "Editando {}: {} (Enter guarda, Esc cancela)",
            app.selected_field.label(),
            app.input
        ),
        AppMode::ConfirmDelete => "Eliminar: Enter confirma, Esc cancela".to_string(),
        AppMode::ExportCsv => format!(
            "Exportar CSV como: {} (Enter exporta, Esc cancela)",
            app.filename_input
        ),
        AppMode::Help => {
            "↑↓/jk: desplazar | PgUp/PgDn: rapido | Home: inicio | Esc/q: cerrar".to_string()
        }
    };

    let style = match app.mode {
        AppMode::Normal => match app.status_message {
            Some(ref status) => match status.level {
                StatusLevel::Info => Style::default().fg(Color::Green),
                StatusLevel::Error => Style::default().fg(Color::Red),
            },
            None => Style::default(),
        },
        AppMode::Editing => Style::default().fg(Color::Green),
        AppMode::ConfirmDelete => Style::default().fg(Color::Red),
        AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        AppMode::Help => Style::default().fg(Color::Cyan),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Estado"))
        .style(style);
    f.render_widget(status, area);
}

fn render_confirm_popup(f: &mut Frame) {
    let area = f.area();
    let width = area.width.min(56).saturating_sub(4).max(1);
    let height = 5u16.min(area.height);
    let popup_area = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup_area);

    let body = vec![
        Line::from("¿Estas seguro de que quieres eliminar esta empresa?"),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: eliminar    Esc: cancelar",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let dialog = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Eliminar")
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(dialog, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("empresas - ayuda")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"EMPRESAS - REFERENCIA DE TECLAS

=== PANTALLAS ===
Tab             Cambia entre Alta y Listado
                (el listado se recarga cada vez que gana el foco)
q               Salir de la aplicacion
F1 o ?          Abre esta ayuda

=== ALTA (formulario) ===
↑ / ↓           Mueve el campo seleccionado
Enter           Edita el campo de texto seleccionado
                (Enter guarda el valor, Esc cancela)
Espacio         Cambia "¿Esta activa?" entre Si y No
Ctrl+S          Guarda la empresa en el servidor

El nombre y la fecha de creacion son obligatorios; el resto de
campos se envia tal cual se teclea. Tras guardar con exito el
formulario vuelve a sus valores por defecto.

=== LISTADO ===
↑ / ↓ (j / k)   Mueve la seleccion entre empresas
r               Recarga el listado desde el servidor
d / Supr        Elimina la empresa seleccionada (pide confirmacion)
y               Copia un resumen de la empresa al portapapeles
Ctrl+E          Exporta el listado visible a un fichero CSV

El listado siempre es una copia fresca del servidor: se recarga al
ganar el foco y despues de cada borrado. Si una peticion falla se
muestra el error en la barra de estado y el listado no cambia.

=== AYUDA ===
↑↓ o j/k        Desplaza una linea
Page Up/Down    Desplaza cinco lineas
Home            Vuelve al principio
Esc/F1/?/q      Cierra esta ventana"#
        .to_string()
}
