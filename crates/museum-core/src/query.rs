//! Result shapes of the composite queries.
//!
//! These are read models spanning several record kinds. They are never stored,
//! always assembled by the store on request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  record::{Exhibit, Hall, Id, Movement, Restoration, Supply, Ticket, Visitor},
  timestamp,
};

/// Everything known about one exhibit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExhibitInfo {
  pub exhibit:      Exhibit,
  /// `None` when the exhibit has no hall, or its hall id dangles.
  pub hall:         Option<Hall>,
  /// `None` when the exhibit has no supply, or its supply id dangles.
  pub supply:       Option<Supply>,
  /// Ascending by `moved_at`.
  pub movements:    Vec<Movement>,
  /// Ascending by `start_date`.
  pub restorations: Vec<Restoration>,
}

/// Exhibit count for one hall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallStatistics {
  pub hall_id:         Id,
  pub hall_number:     Option<i64>,
  pub exposition_name: Option<String>,
  #[serde(rename = "type")]
  pub hall_type:       String,
  pub exhibits_count:  u64,
}

/// A visitor with the ticket it points at, if that ticket exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorWithTicket {
  pub visitor: Visitor,
  pub ticket:  Option<Ticket>,
}

/// Electronic receipt for a sold ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
  pub receipt_number: String,
  pub ticket_number:  String,
  #[serde(with = "timestamp")]
  pub purchase_date:  DateTime<Utc>,
  pub ticket_type:    String,
  pub price:          f64,
  pub payment_status: String,
  pub receipt:        String,
}

impl From<&Ticket> for Receipt {
  fn from(ticket: &Ticket) -> Self {
    Self {
      receipt_number: format!("Receipt-{}", ticket.number),
      ticket_number:  ticket.number.clone(),
      purchase_date:  ticket.date_time,
      ticket_type:    ticket.ticket_type.clone(),
      price:          ticket.price,
      payment_status: ticket.payment_status.clone(),
      receipt:        format!(
        "Payment for ticket {} for amount {:.2} rub.",
        ticket.number, ticket.price
      ),
    }
  }
}
