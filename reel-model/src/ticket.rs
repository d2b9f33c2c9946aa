//! Ticket identifier normalization.
//!
//! Tickets arrive in whatever format the entry source uses (`"TICKET-007"`,
//! `"#7"`, `"0007"`). Matching and ordering only look at the digits, so all of
//! those refer to the same ticket.

use std::cmp::Ordering;
use std::fmt::{self, Display};

/// Normalized form of a ticket identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TicketKey {
    /// Digits only, leading zeros stripped. An all-zero ticket is `"0"`.
    Numeric(String),
    /// Tickets without a single digit keep their trimmed, lowercased text so
    /// that unrelated non-numeric tickets do not collapse into one key.
    Text(String),
}

impl TicketKey {
    pub fn parse(raw: &str) -> Self {
        let digits: String =
            raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return TicketKey::Text(raw.trim().to_lowercase());
        }

        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            TicketKey::Numeric("0".to_owned())
        } else {
            TicketKey::Numeric(significant.to_owned())
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TicketKey::Numeric(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            TicketKey::Numeric(digits) => digits,
            TicketKey::Text(text) => text,
        }
    }

    /// Ordering value used to lay entries out on the reel. Non-numeric
    /// tickets sort as 0.
    pub fn sort_key(&self) -> TicketSortKey<'_> {
        match self {
            TicketKey::Numeric(digits) => TicketSortKey(digits),
            TicketKey::Text(_) => TicketSortKey("0"),
        }
    }
}

impl Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric ordering over normalized digit strings.
///
/// Digit strings carry no leading zeros, so comparing length first and then
/// the digits lexicographically orders them exactly like their numeric value,
/// without any width limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketSortKey<'a>(&'a str);

impl Ord for TicketSortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(other.0))
    }
}

impl PartialOrd for TicketSortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether two raw ticket identifiers refer to the same ticket.
pub fn tickets_match(a: &str, b: &str) -> bool {
    TicketKey::parse(a) == TicketKey::parse(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_and_prefixed_tickets_match() {
        assert!(tickets_match("0007", "7"));
        assert!(tickets_match("#7", "7"));
        assert!(tickets_match("TICKET-007", "0007"));
        assert!(!tickets_match("70", "7"));
    }

    #[test]
    fn all_zero_ticket_normalizes_to_zero() {
        assert_eq!(TicketKey::parse("000"), TicketKey::Numeric("0".into()));
        assert_eq!(TicketKey::parse("T-0"), TicketKey::parse("0"));
    }

    #[test]
    fn non_numeric_tickets_do_not_collide() {
        assert!(!tickets_match("alpha", "beta"));
        assert!(tickets_match(" Alpha ", "alpha"));
        assert!(!TicketKey::parse("alpha").is_numeric());
    }

    #[test]
    fn sort_key_orders_by_numeric_value() {
        let nine = TicketKey::parse("9");
        let ten = TicketKey::parse("0010");
        let text = TicketKey::parse("n/a");
        let zero = TicketKey::parse("0");

        assert!(nine.sort_key() < ten.sort_key());
        assert_eq!(text.sort_key(), zero.sort_key());
        assert!(text.sort_key() < nine.sort_key());
    }

    #[test]
    fn sort_key_handles_tickets_wider_than_u64() {
        let wide = TicketKey::parse("123456789012345678901234567890");
        let wider = TicketKey::parse("123456789012345678901234567891");
        assert!(wide.sort_key() < wider.sort_key());
    }
}
