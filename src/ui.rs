use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
    Table, TableState, Wrap,
};
use ratatui::Frame;

use crate::app::{fuzzy_match, App, Mode};
use crate::detail::TicketView;
use crate::input;
use crate::store::{Ticket, TicketPriority, TicketStatus};

const ZEBRA_DARK: Color = Color::Rgb(30, 30, 40);
const HIGHLIGHT_BG: Color = Color::Rgb(55, 55, 80);
const SHELL_BG: Color = Color::Rgb(25, 25, 35);
const ACCENT: Color = Color::Rgb(180, 180, 255);
const LABEL: Color = Color::Rgb(120, 120, 140);
const HINT: Color = Color::Rgb(100, 100, 120);
const FORM_BORDER: Color = Color::Rgb(100, 100, 140);

const DESCRIPTION: &str = "Esta é uma descrição detalhada do problema reportado neste ticket. \
Por favor, entre em contato com o relator para obter mais informações, se necessário.";

pub fn status_badge_color(status: &TicketStatus) -> Color {
    match status {
        TicketStatus::Open => Color::Green,
        TicketStatus::AwaitingUser => Color::Yellow,
        TicketStatus::SlaBreached => Color::Red,
        TicketStatus::Other(_) => Color::Gray,
    }
}

pub fn priority_badge_color(priority: &TicketPriority) -> Color {
    match priority {
        TicketPriority::High => Color::Red,
        TicketPriority::Medium => Color::Blue,
        TicketPriority::Low | TicketPriority::Other(_) => Color::Gray,
    }
}

fn badge(label: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {label} "),
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
}

fn visible_input(input: &str, cursor_pos: usize, max_chars: usize) -> String {
    let char_count = input.chars().count();
    if char_count + 1 <= max_chars {
        let (before, after) = input::split_at_char_pos(input, cursor_pos);
        return format!("{before}|{after}");
    }
    let budget = max_chars.saturating_sub(1);
    let half = budget / 2;
    let mut start = cursor_pos.saturating_sub(half);
    let mut end = start + budget;
    if end > char_count {
        end = char_count;
        start = end.saturating_sub(budget);
    }
    let left_ellipsis = start > 0;
    let right_ellipsis = end < char_count;
    if left_ellipsis {
        start += 1;
    }
    if right_ellipsis && end > start {
        end -= 1;
    }
    let visible: String = input.chars().skip(start).take(end - start).collect();
    let cursor_in_vis = cursor_pos.saturating_sub(start);
    let (before, after) = input::split_at_char_pos(&visible, cursor_in_vis);
    let mut result = String::new();
    if left_ellipsis {
        result.push('\u{2026}');
    }
    result.push_str(before);
    result.push('|');
    result.push_str(after);
    if right_ellipsis {
        result.push('\u{2026}');
    }
    result
}

pub fn draw(f: &mut Frame, app: &App) {
    let show_input_bar = app.mode == Mode::Searching
        || app.mode == Mode::GoTo
        || (app.mode == Mode::Normal && !app.search_input.is_empty());
    let mut constraints = vec![Constraint::Length(1), Constraint::Min(3)];
    if show_input_bar {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::vertical(constraints).split(f.area());

    draw_header(f, app, chunks[0]);

    let detail_open = matches!(app.mode, Mode::TicketDetail | Mode::DetailAddingComment);
    match &app.view {
        Some(view) if detail_open => draw_detail_page(f, app, view, chunks[1]),
        _ => draw_table(f, app, chunks[1]),
    }

    let mut next = 2;
    if show_input_bar {
        if app.mode == Mode::GoTo {
            draw_goto_bar(f, app, chunks[next]);
        } else {
            draw_search_bar(f, app, chunks[next]);
        }
        next += 1;
    }
    draw_footer(f, chunks[next]);
    draw_status_bar(f, app, chunks[next + 1]);

    if detail_open && app.assign_prompt_open() {
        dim_background(f);
        draw_assign_modal(f);
    }

    if app.show_legend {
        draw_legend(f);
    }
}

fn dim_background(f: &mut Frame) {
    let area = f.area();
    let buf = f.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_fg(Color::Rgb(50, 50, 60));
                cell.set_bg(Color::Rgb(10, 10, 15));
            }
        }
    }
}

// ── Shell ───────────────────────────────────────────────────

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let brand = Line::from(Span::styled(
        " Unidesk ",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    let user = Line::from(vec![
        Span::styled(
            app.config.user_name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {} ", app.config.user_role), Style::default().fg(LABEL)),
    ]);
    let bg = Style::default().bg(SHELL_BG);
    f.render_widget(Paragraph::new(brand).style(bg), area);
    f.render_widget(
        Paragraph::new(user).alignment(Alignment::Right).style(bg),
        area,
    );
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "Unidesk - 2025 - Todos os direitos reservados",
            Style::default().fg(LABEL),
        ),
        Span::styled(
            format!("     Versão {}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(HINT),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().bg(SHELL_BG)),
        area,
    );
}

fn draw_legend(f: &mut Frame) {
    let entries: Vec<(String, Color)> = [
        TicketStatus::Open,
        TicketStatus::AwaitingUser,
        TicketStatus::SlaBreached,
    ]
    .iter()
    .map(|s| (s.label().to_string(), status_badge_color(s)))
    .chain(
        [TicketPriority::High, TicketPriority::Medium, TicketPriority::Low]
            .iter()
            .map(|p| (p.label().to_string(), priority_badge_color(p))),
    )
    .collect();

    let width: u16 = 26;
    let height = entries.len() as u16 + 3; // entries + border + bottom padding
    let area = f.area();
    let x = area.width.saturating_sub(width + 2);
    let y = area.height.saturating_sub(height + 2);
    let legend_area = Rect::new(x, y, width, height).intersection(area);

    f.render_widget(Clear, legend_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(80, 80, 110)))
        .title(Span::styled(
            " Legenda ",
            Style::default()
                .fg(Color::Rgb(180, 180, 200))
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(legend_area);
    f.render_widget(block, legend_area);

    let lines: Vec<Line> = entries
        .into_iter()
        .map(|(label, color)| Line::from(vec![Span::raw(" "), badge(&label, color)]))
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn truncate(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let t: String = s.chars().take(max - 1).collect();
        format!("{t}…")
    }
}

// ── Ticket list ─────────────────────────────────────────────

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    const STATUS_W: u16 = 20;
    const PRIORITY_W: u16 = 11;
    const ASSIGNEE_W: u16 = 18;
    const CREATED_W: u16 = 17;
    const SLA_W: u16 = 10;
    const COL_SPACING: u16 = 2;
    const BORDERS: u16 = 2;
    const HIGHLIGHT_SYM: u16 = 2;

    let fixed = BORDERS
        + HIGHLIGHT_SYM
        + STATUS_W
        + PRIORITY_W
        + ASSIGNEE_W
        + CREATED_W
        + SLA_W
        + COL_SPACING * 5;
    let work_w = area.width.saturating_sub(fixed).max(20);
    let work_chars = work_w as usize;

    let header_style = Style::default()
        .fg(Color::Rgb(180, 180, 200))
        .add_modifier(Modifier::BOLD);

    let header = Row::new(vec![
        Cell::from("Ticket"),
        Cell::from("Status"),
        Cell::from("Prioridade"),
        Cell::from("Designado"),
        Cell::from("Data de Cadastro"),
        Cell::from("SLA N1"),
    ])
    .style(header_style)
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .filter_map(|&i| app.store.tickets().get(i))
        .enumerate()
        .map(|(i, ticket)| {
            let bg = if i % 2 == 1 { ZEBRA_DARK } else { Color::Reset };
            let base_style = Style::default().fg(Color::White).bg(bg);

            let work = format!("{} {}", ticket.ticket_number, ticket.title);
            let work_text = truncate(&work, work_chars);
            let work_spans = match_spans(&work, &work_text, &app.search_input, base_style);

            let assignee = ticket.assignee.as_deref().unwrap_or("Nenhum");
            let assignee_style = if ticket.assignee.is_some() {
                base_style
            } else {
                Style::default().fg(Color::DarkGray).bg(bg)
            };
            let sla_style = if ticket.status == TicketStatus::SlaBreached {
                Style::default().fg(Color::Red).bg(bg)
            } else {
                base_style
            };

            Row::new(vec![
                Cell::from(Line::from(work_spans)),
                Cell::from(Span::styled(
                    truncate(ticket.status.label(), STATUS_W as usize),
                    Style::default()
                        .fg(status_badge_color(&ticket.status))
                        .bg(bg),
                )),
                Cell::from(Span::styled(
                    ticket.priority.label().to_string(),
                    Style::default()
                        .fg(priority_badge_color(&ticket.priority))
                        .bg(bg),
                )),
                Cell::from(Span::styled(
                    truncate(assignee, ASSIGNEE_W as usize),
                    assignee_style,
                )),
                Cell::from(Span::styled(
                    ticket.registration_date.clone(),
                    Style::default().fg(Color::DarkGray).bg(bg),
                )),
                Cell::from(Span::styled(ticket.sla_n1.clone(), sla_style)),
            ])
            .style(base_style)
        })
        .collect();

    let widths = vec![
        Constraint::Length(work_w),
        Constraint::Length(STATUS_W),
        Constraint::Length(PRIORITY_W),
        Constraint::Length(ASSIGNEE_W),
        Constraint::Length(CREATED_W),
        Constraint::Length(SLA_W),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
        .title(Span::styled(
            " Tickets ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));

    if rows.is_empty() {
        let empty_rows = vec![Row::new(vec![Cell::from(Span::styled(
            "  Nenhum resultado",
            Style::default().fg(Color::DarkGray),
        ))])];
        let table = Table::new(empty_rows, widths)
            .header(header)
            .block(block)
            .column_spacing(COL_SPACING);
        f.render_widget(table, area);
    } else {
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(COL_SPACING)
            .row_highlight_style(
                Style::default()
                    .bg(HIGHLIGHT_BG)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(app.selected));
        f.render_stateful_widget(table, area, &mut state);
    }
}

/// Splits `shown` (a possibly truncated `full`) into spans, highlighting the
/// characters matched by the search needle.
fn match_spans(full: &str, shown: &str, needle: &str, normal_style: Style) -> Vec<Span<'static>> {
    let positions = match (needle.is_empty(), fuzzy_match(full, needle)) {
        (false, Some(p)) => p,
        _ => return vec![Span::styled(shown.to_string(), normal_style)],
    };
    let max_pos = shown.chars().count();
    let highlight: std::collections::HashSet<usize> =
        positions.into_iter().filter(|&p| p < max_pos).collect();
    let match_style = normal_style
        .fg(Color::Rgb(255, 200, 60))
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_is_match = false;
    for (ci, ch) in shown.chars().enumerate() {
        let is_match = highlight.contains(&ci);
        if is_match != current_is_match && !current.is_empty() {
            let style = if current_is_match { match_style } else { normal_style };
            spans.push(Span::styled(std::mem::take(&mut current), style));
        }
        current.push(ch);
        current_is_match = is_match;
    }
    if !current.is_empty() {
        let style = if current_is_match { match_style } else { normal_style };
        spans.push(Span::styled(current, style));
    }
    spans
}

// ── Ticket page ─────────────────────────────────────────────

fn page_title(title: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("← ", Style::default().fg(ACCENT)),
        Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn section_rule(label: &str, width: usize) -> Line<'static> {
    let label = format!("── {label} ");
    let rule_len = width.min(80).saturating_sub(label.chars().count());
    Line::from(Span::styled(
        format!("{}{}", label, "─".repeat(rule_len)),
        Style::default().fg(ACCENT),
    ))
}

fn draw_detail_page(f: &mut Frame, app: &App, view: &TicketView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 80)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.loading {
        let lines = vec![page_title("Carregando ticket...")];
        f.render_widget(Paragraph::new(lines), inner);
        app.detail_lines.set(1);
        app.detail_height.set(inner.height);
        return;
    }

    if view.is_not_found() {
        let requested = view.requested_id.as_deref().unwrap_or("");
        let lines = vec![
            page_title("Ticket não encontrado"),
            Line::from(""),
            Line::from(Span::styled(
                format!("O ticket com o ID {requested} não foi encontrado."),
                Style::default().fg(Color::White),
            )),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        app.detail_lines.set(3);
        app.detail_height.set(inner.height);
        return;
    }
    let ticket = match &view.ticket {
        Some(t) => t,
        None => return,
    };

    let form_height: u16 = 4;
    let content_height = inner.height.saturating_sub(form_height);
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    let form_area = Rect::new(
        inner.x,
        inner.y + content_height,
        inner.width,
        inner.height - content_height,
    );

    let lines = ticket_lines(ticket, view, inner.width as usize);
    let total_lines = lines.len();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));
    f.render_widget(paragraph, content_area);

    // Scrollbar (only if content overflows)
    if total_lines > content_area.height as usize {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .thumb_style(Style::default().fg(ACCENT))
            .track_style(Style::default().fg(Color::Rgb(40, 40, 60)));
        let mut scrollbar_state = ScrollbarState::new(total_lines).position(view.scroll as usize);
        f.render_stateful_widget(scrollbar, content_area, &mut scrollbar_state);
    }

    app.detail_lines.set(total_lines);
    app.detail_height.set(content_area.height);

    draw_comment_form(f, app, view, form_area);
}

fn ticket_lines(ticket: &Ticket, view: &TicketView, width: usize) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(LABEL);
    let value_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let col_w = (width / 2).max(20);

    let mut lines: Vec<Line> = vec![page_title("Detalhes do Ticket"), Line::from("")];

    lines.push(Line::from(Span::styled("Ticket", label_style)));
    lines.push(Line::from(vec![
        Span::styled(format!("{}  ", ticket.ticket_number), value_style),
        badge(
            ticket.priority.label(),
            priority_badge_color(&ticket.priority),
        ),
        Span::raw(" "),
        badge(ticket.status.label(), status_badge_color(&ticket.status)),
    ]));
    lines.push(Line::from(""));

    for sub in word_wrap(&ticket.title, width) {
        lines.push(Line::from(Span::styled(
            sub,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    let assignee = ticket.assignee.as_deref().unwrap_or("Nenhum");
    let sla_style = if ticket.status == TicketStatus::SlaBreached {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        value_style
    };
    let pairs = [
        (("Relator", ticket.reporter.as_str(), value_style), ("Designado", assignee, value_style)),
        (
            ("Data de Cadastro", ticket.registration_date.as_str(), value_style),
            ("SLA N1", ticket.sla_n1.as_str(), sla_style),
        ),
    ];
    for ((left_label, left, left_style), (right_label, right, right_style)) in pairs {
        lines.push(Line::from(vec![
            Span::styled(format!("{left_label:<col_w$}"), label_style),
            Span::styled(right_label.to_string(), label_style),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!("{left:<col_w$}"), left_style),
            Span::styled(right.to_string(), right_style),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(section_rule("Descrição", width));
    lines.push(Line::from(""));
    for sub in word_wrap(DESCRIPTION, width) {
        lines.push(Line::from(Span::styled(
            sub,
            Style::default().fg(Color::Rgb(200, 200, 210)),
        )));
    }
    lines.push(Line::from(""));

    lines.push(section_rule(
        &format!("Comentários ({})", view.comments.len()),
        width,
    ));
    lines.push(Line::from(""));
    if view.comments.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Nenhum comentário ainda.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let text_w = width.saturating_sub(7);
        for (i, comment) in view.comments.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:^4} ", comment.initials),
                    Style::default()
                        .bg(Color::Rgb(40, 60, 110))
                        .fg(Color::Rgb(140, 200, 255))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    comment.author.clone(),
                    Style::default()
                        .fg(Color::Rgb(140, 200, 255))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", comment.date), Style::default().fg(Color::DarkGray)),
            ]));
            for sub in word_wrap(&comment.text, text_w) {
                lines.push(Line::from(vec![
                    Span::raw("       "),
                    Span::styled(sub, Style::default().fg(Color::Rgb(200, 200, 210))),
                ]));
            }
            if i + 1 < view.comments.len() {
                lines.push(Line::from(""));
            }
        }
    }
    lines.push(Line::from(""));
    lines
}

fn draw_comment_form(f: &mut Frame, app: &App, view: &TicketView, area: Rect) {
    let inner_w = area.width as usize;
    let label = "Adicionar Comentário";
    let editing = app.mode == Mode::DetailAddingComment;

    let input_line = if editing {
        Span::styled(
            format!(
                "\u{2502} {}",
                visible_input(&view.draft, view.cursor_pos, inner_w.saturating_sub(2))
            ),
            Style::default().fg(Color::White),
        )
    } else if view.draft.is_empty() {
        Span::styled(
            "\u{2502} Digite seu comentário aqui...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(
            format!(
                "\u{2502} {}",
                truncate(&view.draft, inner_w.saturating_sub(2))
            ),
            Style::default().fg(Color::Rgb(200, 200, 210)),
        )
    };

    let help_text = if editing {
        "Enter:Enviar Comentário  Esc:Sair do formulário"
    } else {
        "c:Comentar  ↑↓:Rolar  y:Copiar  Esc:Voltar"
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(
                "┌─ {label} {}",
                "─".repeat(inner_w.saturating_sub(label.chars().count() + 4))
            ),
            Style::default().fg(FORM_BORDER),
        )),
        Line::from(input_line),
        Line::from(Span::styled(
            format!("└{}", "─".repeat(inner_w.saturating_sub(1))),
            Style::default().fg(FORM_BORDER),
        )),
        Line::from(Span::styled(help_text, Style::default().fg(HINT))),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

// ── Assignment modal ────────────────────────────────────────

fn draw_assign_modal(f: &mut Frame) {
    let area = f.area();
    let width = 48u16.min(area.width.saturating_sub(4));
    let height = 7u16.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let modal_area = Rect::new(x, y, width, height);

    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            " Assumir Ticket ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Deseja assumir esse ticket para sua fila?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  n/Esc:", Style::default().fg(HINT)),
            Span::styled(" Não ", Style::default().fg(Color::White)),
            Span::styled("  s/Enter:", Style::default().fg(HINT)),
            Span::styled(
                " Sim ",
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

fn word_wrap(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || text.chars().count() <= max_width {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_w = 0;

    for word in text.split(' ') {
        let word_w = word.chars().count();
        if !current.is_empty() && current_w + 1 + word_w <= max_width {
            current.push(' ');
            current.push_str(word);
            current_w += 1 + word_w;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        // Words wider than a line are cut at the line width
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > max_width {
            lines.push(chars.drain(..max_width).collect());
        }
        current = chars.into_iter().collect();
        current_w = current.chars().count();
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// ── Bars ────────────────────────────────────────────────────

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (mode_text, help_text) = match app.mode {
        Mode::Normal => (
            Span::styled(
                " TICKETS ",
                Style::default()
                    .bg(Color::Rgb(60, 60, 120))
                    .fg(Color::White),
            ),
            " q:Sair  j/k:Navegar  Enter:Abrir  g:Ir para  /:Buscar  ?:Legenda ",
        ),
        Mode::Searching => (
            Span::styled(
                " BUSCA ",
                Style::default()
                    .bg(Color::Rgb(180, 160, 40))
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            " Digite para filtrar  ↑↓:Navegar  Enter:Manter filtro  Esc:Limpar ",
        ),
        Mode::GoTo => (
            Span::styled(
                " IR PARA ",
                Style::default()
                    .bg(Color::Rgb(180, 130, 50))
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            " Digite o ID do ticket  Enter:Abrir  Esc:Cancelar ",
        ),
        Mode::TicketDetail if app.assign_prompt_open() => (
            Span::styled(
                " ASSUMIR ",
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            " s/Enter:Sim  n/Esc:Não ",
        ),
        Mode::TicketDetail => (
            Span::styled(
                " DETALHE ",
                Style::default()
                    .bg(Color::Rgb(80, 120, 180))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            " ↑↓:Rolar  c:Comentar  y:Copiar  Esc:Voltar  ?:Legenda ",
        ),
        Mode::DetailAddingComment => (
            Span::styled(
                " COMENTÁRIO ",
                Style::default()
                    .bg(Color::Green)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            " Enter:Enviar  Esc:Cancelar ",
        ),
    };

    let mut spans = vec![
        mode_text,
        Span::styled(help_text, Style::default().fg(LABEL)),
    ];
    if !app.status_msg.is_empty() {
        let fg = if app.status_msg.starts_with("Error") {
            Color::Rgb(220, 140, 140)
        } else {
            Color::Rgb(140, 220, 160)
        };
        spans.push(Span::styled(" ", Style::default()));
        spans.push(Span::styled(app.status_msg.clone(), Style::default().fg(fg)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let cursor = if app.mode == Mode::Searching { "│" } else { "" };
    let line = Line::from(vec![
        Span::styled(
            " /",
            Style::default()
                .fg(Color::Rgb(255, 200, 60))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.search_input.clone(), Style::default().fg(Color::White)),
        Span::styled(cursor.to_string(), Style::default().fg(Color::Rgb(255, 200, 60))),
        Span::styled(
            format!("  ({} resultados)", app.rows.len()),
            Style::default().fg(HINT),
        ),
    ]);

    f.render_widget(Paragraph::new(line).style(Style::default().bg(SHELL_BG)), area);
}

fn draw_goto_bar(f: &mut Frame, app: &App, area: Rect) {
    let prompt = " Ir para: ";
    let max_chars = (area.width as usize).saturating_sub(prompt.chars().count());
    let line = Line::from(vec![
        Span::styled(
            prompt,
            Style::default()
                .fg(Color::Rgb(255, 200, 60))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            visible_input(&app.goto_input, app.cursor_pos, max_chars),
            Style::default().fg(Color::White),
        ),
    ]);

    f.render_widget(Paragraph::new(line).style(Style::default().bg(SHELL_BG)), area);
}
