use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    AwaitingUser,
    SlaBreached,
    Other(String),
}

impl TicketStatus {
    pub fn label(&self) -> &str {
        match self {
            TicketStatus::Open => "Em aberto",
            TicketStatus::AwaitingUser => "Aguardando usuário",
            TicketStatus::SlaBreached => "SLA estourado",
            TicketStatus::Other(s) => s,
        }
    }
}

impl From<String> for TicketStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Em aberto" => TicketStatus::Open,
            "Aguardando usuário" => TicketStatus::AwaitingUser,
            "SLA estourado" => TicketStatus::SlaBreached,
            _ => TicketStatus::Other(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketPriority {
    High,
    Medium,
    Low,
    Other(String),
}

impl TicketPriority {
    pub fn label(&self) -> &str {
        match self {
            TicketPriority::High => "Alta",
            TicketPriority::Medium => "Média",
            TicketPriority::Low => "Baixa",
            TicketPriority::Other(s) => s,
        }
    }
}

impl From<String> for TicketPriority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Alta" => TicketPriority::High,
            "Média" => TicketPriority::Medium,
            "Baixa" => TicketPriority::Low,
            _ => TicketPriority::Other(s),
        }
    }
}

impl<'de> Deserialize<'de> for TicketStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(TicketStatus::from)
    }
}

impl<'de> Deserialize<'de> for TicketPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(TicketPriority::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Display form, may contain separators ("INC-0001").
    pub ticket_number: String,
    pub title: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub reporter: String,
    #[serde(default, deserialize_with = "deserialize_assignee")]
    pub assignee: Option<String>,
    pub registration_date: String,
    #[serde(rename = "slaN1")]
    pub sla_n1: String,
}

/// Blank assignees mean "nobody", never "somebody with an empty name".
fn deserialize_assignee<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// Uppercased, with every non-alphanumeric character removed.
pub fn normalize_ticket_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub struct TicketStore {
    tickets: Vec<Ticket>,
}

impl TicketStore {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        TicketStore { tickets }
    }

    pub fn builtin() -> Self {
        let tickets = MOCK_TICKETS
            .iter()
            .map(|(number, title, status, priority, reporter, assignee, date, sla)| Ticket {
                ticket_number: number.to_string(),
                title: title.to_string(),
                status: TicketStatus::from(status.to_string()),
                priority: TicketPriority::from(priority.to_string()),
                reporter: reporter.to_string(),
                assignee: assignee.map(str::to_string),
                registration_date: date.to_string(),
                sla_n1: sla.to_string(),
            })
            .collect();
        Self::new(tickets)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::StoreRead {
            path: path.to_path_buf(),
            source,
        })?;
        let tickets: Vec<Ticket> =
            serde_json::from_str(&contents).map_err(|source| Error::StoreParse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), count = tickets.len(), "loaded ticket file");
        Ok(Self::new(tickets))
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// First ticket, in store order, whose normalized number equals the
    /// normalized `raw` identifier.
    pub fn find(&self, raw: &str) -> Option<&Ticket> {
        let wanted = normalize_ticket_number(raw);
        self.tickets
            .iter()
            .find(|t| normalize_ticket_number(&t.ticket_number) == wanted)
    }
}

type MockRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    Option<&'static str>,
    &'static str,
    &'static str,
);

const MOCK_TICKETS: &[MockRow] = &[
    (
        "INC-0001",
        "Impressora do 3º andar não imprime",
        "Em aberto",
        "Média",
        "Carla Mendes",
        None,
        "02/06/2025 09:14",
        "04:00:00",
    ),
    (
        "INC-0002",
        "Sem acesso à VPN corporativa",
        "Em aberto",
        "Alta",
        "Rafael Costa",
        Some("Aristeu Miranda"),
        "02/06/2025 10:02",
        "01:30:00",
    ),
    (
        "INC-0003",
        "Solicitação de novo monitor",
        "Aguardando usuário",
        "Baixa",
        "Juliana Prado",
        Some("Bruno Alves"),
        "30/05/2025 16:45",
        "08:00:00",
    ),
    (
        "INC-0004",
        "Servidor de arquivos lento",
        "SLA estourado",
        "Alta",
        "Marcos Lima",
        None,
        "28/05/2025 08:30",
        "-12:15:00",
    ),
    (
        "INC-0005",
        "Reset de senha do e-mail",
        "Em aberto",
        "Baixa",
        "Fernanda Rocha",
        None,
        "03/06/2025 11:20",
        "02:00:00",
    ),
    (
        "REQ-0006",
        "Instalação do pacote Office",
        "Resolvido",
        "Média",
        "Paulo Henrique",
        Some("Bruno Alves"),
        "27/05/2025 13:05",
        "00:00:00",
    ),
    (
        "REQ-0007",
        "Liberação de acesso ao ERP",
        "Aguardando usuário",
        "Crítica",
        "Ana Beatriz",
        None,
        "01/06/2025 15:40",
        "06:00:00",
    ),
];
