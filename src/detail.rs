use chrono::NaiveDate;

use crate::input;
use crate::store::{Ticket, TicketStatus, TicketStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    pub date: String,
    pub initials: String,
}

/// Labels used when comments are written and tickets claimed.
pub struct Identity<'a> {
    /// Written into the assignee field when the viewer claims a ticket.
    pub self_label: &'a str,
    /// Comment author while the ticket has nobody assigned.
    pub fallback_author: &'a str,
}

/// State of one ticket page. Created when the page is opened, dropped when
/// the viewer navigates back.
pub struct TicketView {
    pub loading: bool,
    pub requested_id: Option<String>,
    pub ticket: Option<Ticket>,
    pub comments: Vec<Comment>,
    pub draft: String,
    pub cursor_pos: usize,
    pub assign_prompt: bool,
    pub scroll: u16,
}

/// Whether a freshly resolved ticket should ask the viewer to claim it.
pub fn needs_assignment(status: &TicketStatus, assignee: Option<&str>) -> bool {
    *status == TicketStatus::Open && assignee.is_none()
}

/// First letter of each name part, uppercased, at most two characters.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Dates as shown to pt-BR users.
pub fn format_comment_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

impl TicketView {
    pub fn new() -> Self {
        TicketView {
            loading: true,
            requested_id: None,
            ticket: None,
            comments: Vec::new(),
            draft: String::new(),
            cursor_pos: 0,
            assign_prompt: false,
            scroll: 0,
        }
    }

    /// Looks the identifier up in `store`. Nothing happens while the
    /// identifier is absent or blank, or when it is the one already resolved.
    pub fn resolve(&mut self, id: Option<&str>, store: &TicketStore) {
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => return,
        };
        if !self.loading && self.requested_id.as_deref() == Some(id) {
            return;
        }

        self.requested_id = Some(id.to_string());
        self.ticket = store.find(id).cloned();
        self.loading = false;
        self.assign_prompt = self
            .ticket
            .as_ref()
            .is_some_and(|t| needs_assignment(&t.status, t.assignee.as_deref()));

        match &self.ticket {
            Some(t) => tracing::info!(
                requested = id,
                ticket = %t.ticket_number,
                assign_prompt = self.assign_prompt,
                "ticket resolved"
            ),
            None => tracing::info!(requested = id, "ticket not found"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        !self.loading && self.ticket.is_none()
    }

    pub fn accept_assignment(&mut self, identity: &Identity) {
        if !self.assign_prompt {
            return;
        }
        self.assign_prompt = false;
        if let Some(ticket) = self.ticket.as_mut() {
            ticket.assignee = Some(identity.self_label.to_string());
            tracing::info!(
                ticket = %ticket.ticket_number,
                assignee = identity.self_label,
                "ticket claimed"
            );
        }
    }

    pub fn decline_assignment(&mut self) {
        if !self.assign_prompt {
            return;
        }
        self.assign_prompt = false;
        if let Some(ticket) = &self.ticket {
            tracing::info!(ticket = %ticket.ticket_number, "assignment declined");
        }
    }

    /// Appends the draft as a new comment. Returns false, leaving the draft
    /// untouched, when the draft is blank or no ticket is loaded.
    pub fn submit_comment(&mut self, identity: &Identity, today: NaiveDate) -> bool {
        let text = self.draft.trim();
        if text.is_empty() {
            return false;
        }
        let ticket = match &self.ticket {
            Some(t) => t,
            None => return false,
        };

        let author = ticket
            .assignee
            .clone()
            .unwrap_or_else(|| identity.fallback_author.to_string());
        let comment = Comment {
            id: uuid::Uuid::new_v4().to_string(),
            initials: initials(&author),
            author,
            text: text.to_string(),
            date: format_comment_date(today),
        };
        tracing::info!(
            ticket = %ticket.ticket_number,
            author = %comment.author,
            id = %comment.id,
            "comment added"
        );

        self.comments.push(comment);
        self.draft.clear();
        self.cursor_pos = 0;
        true
    }

    pub fn insert_char(&mut self, c: char) {
        input::insert(&mut self.draft, &mut self.cursor_pos, c);
    }

    pub fn backspace(&mut self) {
        input::backspace(&mut self.draft, &mut self.cursor_pos);
    }

    pub fn delete(&mut self) {
        input::delete(&mut self.draft, &mut self.cursor_pos);
    }

    pub fn cursor_left(&mut self) {
        input::move_left(&mut self.cursor_pos);
    }

    pub fn cursor_right(&mut self) {
        input::move_right(&self.draft, &mut self.cursor_pos);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.draft.chars().count();
    }
}

impl Default for TicketView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TicketPriority;

    const IDENTITY: Identity<'static> = Identity {
        self_label: "Você",
        fallback_author: "Suporte de T.I.",
    };

    fn ticket(number: &str, status: TicketStatus, assignee: Option<&str>) -> Ticket {
        Ticket {
            ticket_number: number.to_string(),
            title: "Impressora".to_string(),
            status,
            priority: TicketPriority::Medium,
            reporter: "Carla Mendes".to_string(),
            assignee: assignee.map(str::to_string),
            registration_date: "02/06/2025".to_string(),
            sla_n1: "04:00:00".to_string(),
        }
    }

    fn store() -> TicketStore {
        TicketStore::new(vec![
            ticket("tk001", TicketStatus::Open, None),
            ticket("TK-002", TicketStatus::Open, Some("Bruno Alves")),
            ticket("TK-003", TicketStatus::AwaitingUser, None),
            ticket("TK-004", TicketStatus::SlaBreached, None),
        ])
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
    }

    fn resolved(id: &str) -> TicketView {
        let mut view = TicketView::new();
        view.resolve(Some(id), &store());
        view
    }

    #[test]
    fn starts_loading_and_waits_for_an_identifier() {
        let mut view = TicketView::new();
        assert!(view.loading);

        view.resolve(None, &store());
        assert!(view.loading);
        assert!(view.requested_id.is_none());

        view.resolve(Some(""), &store());
        assert!(view.loading);
    }

    #[test]
    fn resolves_by_normalized_number() {
        for id in ["TK-001", "tk 001", "Tk001"] {
            let view = resolved(id);
            assert!(!view.loading);
            assert_eq!(view.ticket.as_ref().unwrap().ticket_number, "tk001");
        }
    }

    #[test]
    fn unknown_identifier_is_not_found_and_keeps_raw_id() {
        let view = resolved("xyz-999");
        assert!(view.is_not_found());
        assert_eq!(view.requested_id.as_deref(), Some("xyz-999"));
        assert!(!view.assign_prompt);
    }

    #[test]
    fn separator_only_identifier_is_looked_up_and_not_found() {
        let view = resolved("--");
        assert!(view.is_not_found());
    }

    #[test]
    fn prompts_only_for_open_unassigned_tickets() {
        assert!(resolved("TK-001").assign_prompt);
        assert!(!resolved("TK-002").assign_prompt);
        assert!(!resolved("TK-003").assign_prompt);
        assert!(!resolved("TK-004").assign_prompt);
    }

    #[test]
    fn needs_assignment_is_pure_over_status_and_assignee() {
        assert!(needs_assignment(&TicketStatus::Open, None));
        assert!(!needs_assignment(&TicketStatus::Open, Some("Ana")));
        assert!(!needs_assignment(&TicketStatus::Other("Em aberto ".into()), None));
        assert!(!needs_assignment(&TicketStatus::SlaBreached, None));
    }

    #[test]
    fn resolving_same_identifier_again_does_not_reprompt() {
        let mut view = resolved("TK-001");
        view.decline_assignment();
        view.resolve(Some("TK-001"), &store());
        assert!(!view.assign_prompt);
    }

    #[test]
    fn resolving_a_different_identifier_re_evaluates() {
        let mut view = resolved("TK-002");
        assert!(!view.assign_prompt);
        view.resolve(Some("TK-001"), &store());
        assert!(view.assign_prompt);
        assert_eq!(view.ticket.as_ref().unwrap().ticket_number, "tk001");
    }

    #[test]
    fn decline_hides_prompt_and_leaves_ticket_unassigned() {
        let mut view = resolved("TK-001");
        view.decline_assignment();
        assert!(!view.assign_prompt);
        assert_eq!(view.ticket.as_ref().unwrap().assignee, None);

        view.accept_assignment(&IDENTITY);
        assert_eq!(view.ticket.as_ref().unwrap().assignee, None);
    }

    #[test]
    fn accept_sets_assignee_on_local_copy_only() {
        let store = store();
        let mut view = TicketView::new();
        view.resolve(Some("TK-001"), &store);
        view.accept_assignment(&IDENTITY);

        assert!(!view.assign_prompt);
        assert_eq!(view.ticket.as_ref().unwrap().assignee.as_deref(), Some("Você"));
        assert_eq!(store.find("TK-001").unwrap().assignee, None);
    }

    #[test]
    fn blank_comment_is_ignored() {
        let mut view = resolved("TK-001");
        for draft in ["", "   ", "\n\t "] {
            view.draft = draft.to_string();
            assert!(!view.submit_comment(&IDENTITY, today()));
            assert!(view.comments.is_empty());
        }
    }

    #[test]
    fn comment_author_follows_assignment() {
        let mut view = resolved("TK-001");

        view.draft = "Hello".to_string();
        assert!(view.submit_comment(&IDENTITY, today()));
        let first = &view.comments[0];
        assert_eq!(first.author, "Suporte de T.I.");
        assert_eq!(first.initials, "SD");
        assert_eq!(first.text, "Hello");
        assert_eq!(first.date, "03/06/2025");
        assert!(view.draft.is_empty());
        assert_eq!(view.cursor_pos, 0);

        view.accept_assignment(&IDENTITY);
        view.draft = "  Estou verificando  ".to_string();
        assert!(view.submit_comment(&IDENTITY, today()));
        let second = &view.comments[1];
        assert_eq!(second.author, "Você");
        assert_eq!(second.initials, "V");
        assert_eq!(second.text, "Estou verificando");
    }

    #[test]
    fn comments_keep_insertion_order_and_unique_ids() {
        let mut view = resolved("TK-002");
        for text in ["um", "dois", "três"] {
            view.draft = text.to_string();
            view.submit_comment(&IDENTITY, today());
        }
        let texts: Vec<&str> = view.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["um", "dois", "três"]);
        assert_eq!(view.comments[0].author, "Bruno Alves");
        assert_ne!(view.comments[0].id, view.comments[1].id);
        assert_ne!(view.comments[1].id, view.comments[2].id);
    }

    #[test]
    fn no_comment_without_a_ticket() {
        let mut view = resolved("nope");
        view.draft = "Hello".to_string();
        assert!(!view.submit_comment(&IDENTITY, today()));
        assert_eq!(view.draft, "Hello");
    }

    #[test]
    fn initials_take_first_letters_of_up_to_two_parts() {
        assert_eq!(initials("Suporte de T.I."), "SD");
        assert_eq!(initials("Você"), "V");
        assert_eq!(initials("aristeu  miranda"), "AM");
        assert_eq!(initials("élio"), "É");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn draft_editing_is_char_aware() {
        let mut view = TicketView::new();
        for c in "olá".chars() {
            view.insert_char(c);
        }
        view.cursor_left();
        view.backspace();
        assert_eq!(view.draft, "oá");
        view.cursor_end();
        view.insert_char('!');
        view.cursor_home();
        view.delete();
        assert_eq!(view.draft, "á!");
    }
}
