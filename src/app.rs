use std::cell::Cell;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::detail::{Identity, TicketView};
use crate::input;
use crate::store::{Ticket, TicketStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Searching,
    GoTo,
    TicketDetail,
    DetailAddingComment,
}

pub struct App {
    pub store: TicketStore,
    pub config: Config,
    /// Indices into the store's tickets, after the search filter.
    pub rows: Vec<usize>,
    pub selected: usize,
    pub mode: Mode,
    pub search_input: String,
    pub goto_input: String,
    pub cursor_pos: usize,
    pub status_msg: String,
    // Ticket page, present while one is open
    pub view: Option<TicketView>,
    // Set during rendering, bound scrolling
    pub detail_lines: Cell<usize>,
    pub detail_height: Cell<u16>,
    pub show_legend: bool,
}

impl App {
    pub fn new(config: Config, store: TicketStore) -> Self {
        let rows = (0..store.tickets().len()).collect();
        App {
            store,
            config,
            rows,
            selected: 0,
            mode: Mode::Normal,
            search_input: String::new(),
            goto_input: String::new(),
            cursor_pos: 0,
            status_msg: String::new(),
            view: None,
            detail_lines: Cell::new(0),
            detail_height: Cell::new(0),
            show_legend: false,
        }
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.rows
            .get(self.selected)
            .and_then(|&i| self.store.tickets().get(i))
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if !self.rows.is_empty() && self.selected < self.rows.len() - 1 {
            self.selected += 1;
        }
    }

    // --- Fuzzy search ---

    pub fn start_search(&mut self) {
        self.search_input.clear();
        self.mode = Mode::Searching;
    }

    pub fn search_push(&mut self, c: char) {
        self.search_input.push(c);
        self.apply_search_filter();
    }

    pub fn search_pop(&mut self) {
        self.search_input.pop();
        self.apply_search_filter();
    }

    pub fn apply_search_filter(&mut self) {
        let tickets = self.store.tickets();
        self.rows = (0..tickets.len())
            .filter(|&i| {
                self.search_input.is_empty() || {
                    let t = &tickets[i];
                    let haystack = format!("{} {}", t.ticket_number, t.title);
                    fuzzy_match(&haystack, &self.search_input).is_some()
                }
            })
            .collect();
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }

    pub fn confirm_search(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.apply_search_filter();
        self.mode = Mode::Normal;
    }

    // --- Go to ticket by identifier ---

    pub fn start_goto(&mut self) {
        self.goto_input.clear();
        self.cursor_pos = 0;
        self.mode = Mode::GoTo;
    }

    pub fn goto_insert(&mut self, c: char) {
        input::insert(&mut self.goto_input, &mut self.cursor_pos, c);
    }

    pub fn goto_backspace(&mut self) {
        input::backspace(&mut self.goto_input, &mut self.cursor_pos);
    }

    pub fn goto_delete(&mut self) {
        input::delete(&mut self.goto_input, &mut self.cursor_pos);
    }

    pub fn goto_left(&mut self) {
        input::move_left(&mut self.cursor_pos);
    }

    pub fn goto_right(&mut self) {
        input::move_right(&self.goto_input, &mut self.cursor_pos);
    }

    pub fn confirm_goto(&mut self) {
        let id = std::mem::take(&mut self.goto_input);
        self.cursor_pos = 0;
        if id.is_empty() {
            self.mode = Mode::Normal;
            return;
        }
        self.navigate(Some(&id));
    }

    pub fn cancel_goto(&mut self) {
        self.goto_input.clear();
        self.cursor_pos = 0;
        self.mode = Mode::Normal;
    }

    // --- Ticket page ---

    pub fn open_selected(&mut self) {
        let id = match self.selected_ticket() {
            Some(t) => t.ticket_number.clone(),
            None => return,
        };
        self.navigate(Some(&id));
    }

    /// Opens a fresh ticket page for the identifier.
    pub fn navigate(&mut self, id: Option<&str>) {
        tracing::debug!(id = ?id, "navigating to ticket page");
        let mut view = TicketView::new();
        view.resolve(id, &self.store);
        self.view = Some(view);
        self.detail_lines.set(0);
        self.status_msg.clear();
        self.mode = Mode::TicketDetail;
    }

    /// Leaves the ticket page. Its comments and any claim go with it.
    pub fn close_detail(&mut self) {
        self.view = None;
        self.mode = Mode::Normal;
    }

    pub fn assign_prompt_open(&self) -> bool {
        self.view.as_ref().is_some_and(|v| v.assign_prompt)
    }

    pub fn accept_assignment(&mut self) {
        if let Some(view) = self.view.as_mut() {
            if view.assign_prompt {
                view.accept_assignment(&Identity {
                    self_label: &self.config.self_label,
                    fallback_author: &self.config.fallback_author,
                });
                self.status_msg = "Ticket assumido".to_string();
            }
        }
    }

    pub fn decline_assignment(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.decline_assignment();
        }
    }

    pub fn detail_scroll_up(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.scroll = view.scroll.saturating_sub(1);
        }
    }

    pub fn detail_scroll_down(&mut self) {
        let total = self.detail_lines.get();
        let height = self.detail_height.get().max(1) as usize;
        if let Some(view) = self.view.as_mut() {
            if (view.scroll as usize) + height < total {
                view.scroll += 1;
            }
        }
    }

    // --- Comments ---

    pub fn start_adding_comment(&mut self) {
        let view = match self.view.as_mut() {
            Some(v) if v.ticket.is_some() => v,
            _ => return,
        };
        view.cursor_pos = view.draft.chars().count();
        self.mode = Mode::DetailAddingComment;
    }

    /// Leaves the form; the draft stays with the page.
    pub fn cancel_comment(&mut self) {
        self.mode = Mode::TicketDetail;
    }

    pub fn submit_comment(&mut self) {
        let view = match self.view.as_mut() {
            Some(v) => v,
            None => return,
        };
        let identity = Identity {
            self_label: &self.config.self_label,
            fallback_author: &self.config.fallback_author,
        };
        let today = chrono::Local::now().date_naive();
        if view.submit_comment(&identity, today) {
            self.status_msg = "Comentário adicionado".to_string();
            self.mode = Mode::TicketDetail;
        }
    }

    pub fn copy_ticket_to_clipboard(&mut self) {
        let text = match self.view.as_ref().and_then(ticket_clipboard_text) {
            Some(t) => t,
            None => return,
        };
        match copy_to_clipboard(&text) {
            Ok(()) => self.status_msg = "Ticket copiado".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                self.status_msg = format!("Error: falha ao copiar ({e})");
            }
        }
    }
}

fn ticket_clipboard_text(view: &TicketView) -> Option<String> {
    let ticket = view.ticket.as_ref()?;
    let mut text = String::new();
    text.push_str(&format!("{}\n{}\n\n", ticket.ticket_number, ticket.title));
    text.push_str(&format!(
        "Status: {}\nPrioridade: {}\nRelator: {}\nDesignado: {}\n",
        ticket.status.label(),
        ticket.priority.label(),
        ticket.reporter,
        ticket.assignee.as_deref().unwrap_or("Nenhum"),
    ));
    if !view.comments.is_empty() {
        text.push_str(&format!("\nComentários ({}):\n", view.comments.len()));
        for comment in &view.comments {
            text.push_str(&format!("\n{} ({})\n", comment.author, comment.date));
            text.push_str(&comment.text);
            text.push('\n');
        }
    }
    Some(text)
}

/// Case-insensitive subsequence fuzzy match. Returns matched char positions if all
/// needle chars are found in order within the haystack.
pub fn fuzzy_match(haystack: &str, needle: &str) -> Option<Vec<usize>> {
    let haystack_lower: Vec<char> = haystack.chars().flat_map(|c| c.to_lowercase()).collect();
    let needle_lower: Vec<char> = needle.chars().flat_map(|c| c.to_lowercase()).collect();

    let mut positions = Vec::with_capacity(needle_lower.len());
    let mut hay_idx = 0;
    for nc in &needle_lower {
        let mut found = false;
        while hay_idx < haystack_lower.len() {
            if haystack_lower[hay_idx] == *nc {
                positions.push(hay_idx);
                hay_idx += 1;
                found = true;
                break;
            }
            hay_idx += 1;
        }
        if !found {
            return None;
        }
    }
    Some(positions)
}

fn copy_to_clipboard(text: &str) -> std::io::Result<()> {
    let cmd = if cfg!(target_os = "macos") {
        Command::new("pbcopy")
    } else {
        let mut c = Command::new("xclip");
        c.arg("-selection").arg("clipboard");
        c
    };
    pipe_to_command(cmd, text)
}

/// Feeds `text` to the command's stdin. The child is always waited on, even
/// when the write fails, and the write error wins over the exit status.
fn pipe_to_command(mut cmd: Command, text: &str) -> std::io::Result<()> {
    let mut child = cmd.stdin(Stdio::piped()).spawn()?;
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let waited = child.wait();
    written?;
    waited?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Config::default(), TicketStore::builtin())
    }

    fn open(app: &mut App, id: &str) {
        app.navigate(Some(id));
    }

    #[cfg(unix)]
    #[test]
    fn clipboard_pipe_reports_write_failure_after_reaping_child() {
        // `true` exits without reading, so a large write hits a closed pipe
        let err = pipe_to_command(Command::new("true"), &"x".repeat(1 << 20)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[cfg(unix)]
    #[test]
    fn clipboard_pipe_succeeds_when_child_reads_everything() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("cat > /dev/null");
        assert!(pipe_to_command(cmd, "INC-0001").is_ok());
    }

    #[test]
    fn list_starts_with_every_ticket() {
        let app = app();
        assert_eq!(app.rows.len(), app.store.tickets().len());
        assert_eq!(app.selected_ticket().unwrap().ticket_number, "INC-0001");
    }

    #[test]
    fn search_filters_and_clamps_selection() {
        let mut app = app();
        app.selected = 6;
        app.start_search();
        for c in "vpn".chars() {
            app.search_push(c);
        }
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_ticket().unwrap().ticket_number, "INC-0002");

        app.clear_search();
        assert_eq!(app.rows.len(), app.store.tickets().len());
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn opening_an_open_unassigned_ticket_shows_the_prompt() {
        let mut app = app();
        app.open_selected();
        assert_eq!(app.mode, Mode::TicketDetail);
        assert!(app.assign_prompt_open());

        app.decline_assignment();
        assert!(!app.assign_prompt_open());
        let view = app.view.as_ref().unwrap();
        assert_eq!(view.ticket.as_ref().unwrap().assignee, None);
    }

    #[test]
    fn accepting_uses_the_configured_self_label() {
        let mut app = app();
        open(&mut app, "inc 0005");
        app.accept_assignment();
        let ticket = app.view.as_ref().unwrap().ticket.as_ref().unwrap();
        assert_eq!(ticket.assignee.as_deref(), Some("Você"));
        assert_eq!(app.store.find("INC-0005").unwrap().assignee, None);
    }

    #[test]
    fn going_back_discards_the_page() {
        let mut app = app();
        open(&mut app, "INC-0001");
        app.accept_assignment();
        app.start_adding_comment();
        app.view.as_mut().unwrap().draft = "Hello".to_string();
        app.submit_comment();
        assert_eq!(app.view.as_ref().unwrap().comments.len(), 1);

        app.close_detail();
        assert!(app.view.is_none());
        assert_eq!(app.mode, Mode::Normal);

        open(&mut app, "INC-0001");
        let view = app.view.as_ref().unwrap();
        assert!(view.comments.is_empty());
        assert!(view.assign_prompt);
    }

    #[test]
    fn blank_submission_keeps_the_form_open() {
        let mut app = app();
        open(&mut app, "INC-0002");
        app.start_adding_comment();
        app.view.as_mut().unwrap().draft = "   ".to_string();
        app.submit_comment();
        assert_eq!(app.mode, Mode::DetailAddingComment);
        assert!(app.view.as_ref().unwrap().comments.is_empty());
    }

    #[test]
    fn comment_form_needs_a_resolved_ticket() {
        let mut app = app();
        open(&mut app, "XYZ-1");
        app.start_adding_comment();
        assert_eq!(app.mode, Mode::TicketDetail);
    }

    #[test]
    fn goto_resolves_typed_identifier() {
        let mut app = app();
        app.start_goto();
        for c in "req0007".chars() {
            app.goto_insert(c);
        }
        app.confirm_goto();
        let view = app.view.as_ref().unwrap();
        assert_eq!(view.requested_id.as_deref(), Some("req0007"));
        assert_eq!(view.ticket.as_ref().unwrap().ticket_number, "REQ-0007");
        // Awaiting the user, so no claim prompt even without assignee.
        assert!(!view.assign_prompt);
    }

    #[test]
    fn empty_goto_returns_to_the_list() {
        let mut app = app();
        app.start_goto();
        app.confirm_goto();
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.view.is_none());
    }

    #[test]
    fn scrolling_is_bounded_by_rendered_lines() {
        let mut app = app();
        open(&mut app, "INC-0002");
        app.detail_lines.set(2);
        app.detail_scroll_down();
        app.detail_scroll_down();
        assert_eq!(app.view.as_ref().unwrap().scroll, 1);
        app.detail_scroll_up();
        app.detail_scroll_up();
        assert_eq!(app.view.as_ref().unwrap().scroll, 0);
    }

    #[test]
    fn scrolling_stops_once_the_last_line_is_on_screen() {
        let mut app = app();
        open(&mut app, "INC-0002");
        app.detail_lines.set(30);
        app.detail_height.set(10);
        for _ in 0..100 {
            app.detail_scroll_down();
        }
        assert_eq!(app.view.as_ref().unwrap().scroll, 20);
    }

    #[test]
    fn clipboard_text_lists_comments() {
        let mut app = app();
        open(&mut app, "INC-0003");
        let view = app.view.as_mut().unwrap();
        view.draft = "Aguardando retorno".to_string();
        view.submit_comment(
            &Identity {
                self_label: "Você",
                fallback_author: "Suporte de T.I.",
            },
            chrono::NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
        );

        let text = ticket_clipboard_text(app.view.as_ref().unwrap()).unwrap();
        assert!(text.starts_with("INC-0003\nSolicitação de novo monitor\n"));
        assert!(text.contains("Designado: Bruno Alves"));
        assert!(text.contains("Bruno Alves (04/06/2025)\nAguardando retorno"));
    }

    #[test]
    fn fuzzy_match_reports_positions() {
        assert_eq!(fuzzy_match("INC-0002 VPN", "ivp"), Some(vec![0, 9, 10]));
        assert_eq!(fuzzy_match("abc", "cb"), None);
    }
}
