//! Per-field constraints on create and patch payloads.
//!
//! Each check looks at one field in isolation; nothing here consults other
//! records. Patches check only the fields they carry.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::{
  Error, Result,
  record::{
    EmployeePatch, ExhibitPatch, HallPatch, MovementPatch, NewEmployee, NewExhibit, NewHall,
    NewMovement, NewRestoration, NewSupply, NewTicket, NewVisitor, RestorationPatch, SupplyPatch,
    TicketPatch, VisitorPatch,
  },
};

const NAME_LEN: usize = 255;
const CODE_LEN: usize = 100;
const SHORT_LEN: usize = 50;

/// Dates and timestamps are stored as text that only sorts chronologically
/// while the year has exactly four digits.
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// A payload that can be checked before it reaches storage.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<()> {
  if value.chars().count() > max {
    return Err(Error::Validation {
      field,
      reason: format!("must be at most {max} characters"),
    });
  }
  Ok(())
}

fn opt_max_len(field: &'static str, value: Option<&str>, max: usize) -> Result<()> {
  value.map_or(Ok(()), |v| max_len(field, v, max))
}

/// Flattens a patch field that may be absent, cleared, or set.
fn set_value<T>(value: &Option<Option<T>>) -> Option<&T> {
  value.as_ref().and_then(Option::as_ref)
}

fn non_negative(field: &'static str, value: i64) -> Result<()> {
  if value < 0 {
    return Err(Error::Validation {
      field,
      reason: format!("must be non-negative, got {value}"),
    });
  }
  Ok(())
}

fn year_in_range(field: &'static str, year: i32) -> Result<()> {
  if !YEARS.contains(&year) {
    return Err(Error::Validation {
      field,
      reason: format!(
        "year must be between {} and {}, got {year}",
        YEARS.start(),
        YEARS.end()
      ),
    });
  }
  Ok(())
}

fn date(field: &'static str, value: &NaiveDate) -> Result<()> {
  year_in_range(field, value.year())
}

/// Checked in UTC, since that is the form that gets stored.
fn timestamp(field: &'static str, value: &DateTime<Utc>) -> Result<()> {
  year_in_range(field, value.year())
}

fn price(value: f64) -> Result<()> {
  if !value.is_finite() || value < 0.0 {
    return Err(Error::Validation {
      field:  "price",
      reason: format!("must be a non-negative amount, got {value}"),
    });
  }
  Ok(())
}

// ─── Employee ────────────────────────────────────────────────────────────────

impl Validate for NewEmployee {
  fn validate(&self) -> Result<()> {
    max_len("full_name", &self.full_name, NAME_LEN)?;
    max_len("position", &self.position, CODE_LEN)?;
    max_len("personnel_number", &self.personnel_number, SHORT_LEN)?;
    max_len("access_level", &self.access_level, SHORT_LEN)
  }
}

impl Validate for EmployeePatch {
  fn validate(&self) -> Result<()> {
    opt_max_len("full_name", self.full_name.as_deref(), NAME_LEN)?;
    opt_max_len("position", self.position.as_deref(), CODE_LEN)?;
    opt_max_len("personnel_number", self.personnel_number.as_deref(), SHORT_LEN)?;
    opt_max_len("access_level", self.access_level.as_deref(), SHORT_LEN)
  }
}

// ─── Hall ────────────────────────────────────────────────────────────────────

impl Validate for NewHall {
  fn validate(&self) -> Result<()> {
    opt_max_len("exposition_name", self.exposition_name.as_deref(), NAME_LEN)?;
    max_len("type", &self.hall_type, SHORT_LEN)
  }
}

impl Validate for HallPatch {
  fn validate(&self) -> Result<()> {
    opt_max_len(
      "exposition_name",
      set_value(&self.exposition_name).map(String::as_str),
      NAME_LEN,
    )?;
    opt_max_len("type", self.hall_type.as_deref(), SHORT_LEN)
  }
}

// ─── Supply ──────────────────────────────────────────────────────────────────

impl Validate for NewSupply {
  fn validate(&self) -> Result<()> {
    max_len("number", &self.number, CODE_LEN)?;
    date("date", &self.date)?;
    max_len("supplier", &self.supplier, NAME_LEN)
  }
}

impl Validate for SupplyPatch {
  fn validate(&self) -> Result<()> {
    opt_max_len("number", self.number.as_deref(), CODE_LEN)?;
    self.date.as_ref().map_or(Ok(()), |d| date("date", d))?;
    opt_max_len("supplier", self.supplier.as_deref(), NAME_LEN)
  }
}

// ─── Ticket ──────────────────────────────────────────────────────────────────

impl Validate for NewTicket {
  fn validate(&self) -> Result<()> {
    max_len("number", &self.number, CODE_LEN)?;
    timestamp("date_time", &self.date_time)?;
    max_len("type", &self.ticket_type, SHORT_LEN)?;
    price(self.price)?;
    max_len("payment_status", &self.payment_status, SHORT_LEN)
  }
}

impl Validate for TicketPatch {
  fn validate(&self) -> Result<()> {
    opt_max_len("number", self.number.as_deref(), CODE_LEN)?;
    self.date_time.as_ref().map_or(Ok(()), |t| timestamp("date_time", t))?;
    opt_max_len("type", self.ticket_type.as_deref(), SHORT_LEN)?;
    self.price.map_or(Ok(()), price)?;
    opt_max_len("payment_status", self.payment_status.as_deref(), SHORT_LEN)
  }
}

// ─── Visitor ─────────────────────────────────────────────────────────────────

impl Validate for NewVisitor {
  fn validate(&self) -> Result<()> {
    max_len("name", &self.name, NAME_LEN)?;
    non_negative("age", self.age)?;
    opt_max_len("phone", self.phone.as_deref(), SHORT_LEN)?;
    opt_max_len("email", self.email.as_deref(), NAME_LEN)
  }
}

impl Validate for VisitorPatch {
  fn validate(&self) -> Result<()> {
    opt_max_len("name", self.name.as_deref(), NAME_LEN)?;
    self.age.map_or(Ok(()), |age| non_negative("age", age))?;
    opt_max_len("phone", set_value(&self.phone).map(String::as_str), SHORT_LEN)?;
    opt_max_len("email", set_value(&self.email).map(String::as_str), NAME_LEN)
  }
}

// ─── Exhibit ─────────────────────────────────────────────────────────────────

impl Validate for NewExhibit {
  fn validate(&self) -> Result<()> {
    max_len("inventory_number", &self.inventory_number, CODE_LEN)?;
    max_len("title", &self.title, NAME_LEN)?;
    self.creation_date.as_ref().map_or(Ok(()), |d| date("creation_date", d))?;
    opt_max_len("author", self.author.as_deref(), NAME_LEN)?;
    opt_max_len("condition", self.condition.as_deref(), CODE_LEN)?;
    opt_max_len("storage_location", self.storage_location.as_deref(), NAME_LEN)
  }
}

impl Validate for ExhibitPatch {
  fn validate(&self) -> Result<()> {
    opt_max_len("inventory_number", self.inventory_number.as_deref(), CODE_LEN)?;
    opt_max_len("title", self.title.as_deref(), NAME_LEN)?;
    set_value(&self.creation_date).map_or(Ok(()), |d| date("creation_date", d))?;
    opt_max_len("author", set_value(&self.author).map(String::as_str), NAME_LEN)?;
    opt_max_len("condition", set_value(&self.condition).map(String::as_str), CODE_LEN)?;
    opt_max_len(
      "storage_location",
      set_value(&self.storage_location).map(String::as_str),
      NAME_LEN,
    )
  }
}

// ─── Movement ────────────────────────────────────────────────────────────────

impl Validate for NewMovement {
  fn validate(&self) -> Result<()> {
    timestamp("moved_at", &self.moved_at)?;
    opt_max_len("from_location", self.from_location.as_deref(), NAME_LEN)?;
    opt_max_len("to_location", self.to_location.as_deref(), NAME_LEN)?;
    opt_max_len("reason", self.reason.as_deref(), NAME_LEN)
  }
}

impl Validate for MovementPatch {
  fn validate(&self) -> Result<()> {
    self.moved_at.as_ref().map_or(Ok(()), |t| timestamp("moved_at", t))?;
    opt_max_len(
      "from_location",
      set_value(&self.from_location).map(String::as_str),
      NAME_LEN,
    )?;
    opt_max_len("to_location", set_value(&self.to_location).map(String::as_str), NAME_LEN)?;
    opt_max_len("reason", set_value(&self.reason).map(String::as_str), NAME_LEN)
  }
}

// ─── Restoration ─────────────────────────────────────────────────────────────

impl Validate for NewRestoration {
  fn validate(&self) -> Result<()> {
    date("start_date", &self.start_date)?;
    self.end_date.as_ref().map_or(Ok(()), |d| date("end_date", d))?;
    opt_max_len("executor", self.executor.as_deref(), NAME_LEN)?;
    max_len("status", &self.status, SHORT_LEN)
  }
}

impl Validate for RestorationPatch {
  fn validate(&self) -> Result<()> {
    self.start_date.as_ref().map_or(Ok(()), |d| date("start_date", d))?;
    set_value(&self.end_date).map_or(Ok(()), |d| date("end_date", d))?;
    opt_max_len("executor", set_value(&self.executor).map(String::as_str), NAME_LEN)?;
    opt_max_len("status", self.status.as_deref(), SHORT_LEN)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn field_of(result: Result<()>) -> &'static str {
    match result {
      Err(Error::Validation { field, .. }) => field,
      Ok(()) => panic!("expected a validation error"),
    }
  }

  #[test]
  fn negative_price_is_rejected() {
    let ticket = NewTicket::new("B1", "adult", -1.0);
    assert_eq!(field_of(ticket.validate()), "price");
  }

  #[test]
  fn nan_price_is_rejected() {
    let ticket = NewTicket::new("B1", "adult", f64::NAN);
    assert_eq!(field_of(ticket.validate()), "price");
  }

  #[test]
  fn free_ticket_is_accepted() {
    assert!(NewTicket::new("B1", "staff", 0.0).validate().is_ok());
  }

  #[test]
  fn negative_age_is_rejected() {
    assert_eq!(field_of(NewVisitor::new("Maria", -3).validate()), "age");
  }

  #[test]
  fn patch_checks_only_supplied_fields() {
    assert!(VisitorPatch::default().validate().is_ok());

    let patch = VisitorPatch { age: Some(-1), ..VisitorPatch::default() };
    assert_eq!(field_of(patch.validate()), "age");

    let patch = TicketPatch { price: Some(-0.5), ..TicketPatch::default() };
    assert_eq!(field_of(patch.validate()), "price");
  }

  #[test]
  fn clearing_an_optional_field_passes() {
    let patch = VisitorPatch { phone: Some(None), ..VisitorPatch::default() };
    assert!(patch.validate().is_ok());
  }

  #[test]
  fn overlong_text_is_rejected() {
    let employee = NewEmployee::new("A".repeat(256), "cashier", "T001");
    assert_eq!(field_of(employee.validate()), "full_name");

    // Cyrillic counts characters, not bytes.
    let employee = NewEmployee::new("Я".repeat(255), "кассир", "T001");
    assert!(employee.validate().is_ok());
  }

  #[test]
  fn timestamp_past_year_9999_in_utc_is_rejected() {
    let movement: NewMovement = serde_json::from_str(
      r#"{ "exhibit_id": 1, "moved_at": "9999-12-31T23:59:59-01:00" }"#,
    )
    .unwrap();
    assert_eq!(field_of(movement.validate()), "moved_at");

    let patch = TicketPatch {
      date_time: Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).single(),
      ..TicketPatch::default()
    };
    assert_eq!(field_of(patch.validate()), "date_time");
  }

  #[test]
  fn last_second_of_year_9999_is_accepted() {
    let movement: NewMovement = serde_json::from_str(
      r#"{ "exhibit_id": 1, "moved_at": "9999-12-31T23:59:59Z" }"#,
    )
    .unwrap();
    assert!(movement.validate().is_ok());
  }

  #[test]
  fn dates_outside_four_digit_years_are_rejected() {
    let far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
    let bc = NaiveDate::from_ymd_opt(-1, 6, 1).unwrap();
    let ok = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    assert_eq!(field_of(NewRestoration::new(1, far).validate()), "start_date");
    let mut open = NewRestoration::new(1, ok);
    open.end_date = Some(bc);
    assert_eq!(field_of(open.validate()), "end_date");

    assert_eq!(field_of(NewSupply::new("P-1", far, "Alpha").validate()), "date");

    let exhibit = NewExhibit { creation_date: Some(bc), ..NewExhibit::new("INV-1", "Lion") };
    assert_eq!(field_of(exhibit.validate()), "creation_date");

    let patch = RestorationPatch { end_date: Some(Some(far)), ..RestorationPatch::default() };
    assert_eq!(field_of(patch.validate()), "end_date");
    let patch = ExhibitPatch { creation_date: Some(Some(far)), ..ExhibitPatch::default() };
    assert_eq!(field_of(patch.validate()), "creation_date");
    let patch = SupplyPatch { date: Some(far), ..SupplyPatch::default() };
    assert_eq!(field_of(patch.validate()), "date");
  }

  #[test]
  fn ancient_dates_are_accepted() {
    let created = NaiveDate::from_ymd_opt(1350, 1, 1).unwrap();
    let exhibit = NewExhibit { creation_date: Some(created), ..NewExhibit::new("INV-1", "Icon") };
    assert!(exhibit.validate().is_ok());
  }
}
