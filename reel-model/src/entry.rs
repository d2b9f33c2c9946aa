use crate::ticket::TicketKey;

/// A candidate on the reel: one ticket and the name shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Entry {
    pub ticket_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_first: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_last: String,
}

impl Entry {
    pub fn new(
        ticket_id: impl Into<String>,
        display_first: impl Into<String>,
        display_last: impl Into<String>,
    ) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            display_first: display_first.into(),
            display_last: display_last.into(),
        }
    }

    pub fn ticket_key(&self) -> TicketKey {
        TicketKey::parse(&self.ticket_id)
    }

    pub fn matches_ticket(&self, ticket: &str) -> bool {
        self.ticket_key() == TicketKey::parse(ticket)
    }

    /// "First Last", skipping whichever part is blank.
    pub fn display_name(&self) -> String {
        let first = self.display_first.trim();
        let last = self.display_last.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first} {last}"),
            (false, true) => first.to_owned(),
            (true, false) => last.to_owned(),
            (true, true) => String::new(),
        }
    }
}
