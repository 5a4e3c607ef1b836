//! Record kinds — the eight entity types of the museum catalog.
//!
//! Every kind comes as three types:
//!
//! - the stored record, carrying its store-assigned [`Id`];
//! - a create payload (`New*`) without an id;
//! - a sparse patch (`*Patch`) where every field is optional.
//!
//! Relationships are plain id fields. Nothing here checks that a referenced
//! id exists, and deleting a record leaves references to it dangling.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{serde_ext::double_option, timestamp, validate::Validate};

/// Store-assigned identifier, unique within a kind and never reused.
pub type Id = i64;

/// The restoration status that marks an episode as still running.
pub const RESTORATION_IN_PROGRESS: &str = "in progress";

pub const DEFAULT_ACCESS_LEVEL: &str = "user";
pub const DEFAULT_HALL_TYPE: &str = "hall";
pub const DEFAULT_PAYMENT_STATUS: &str = "not paid";

// ─── Kind ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
  Employee,
  Hall,
  Supply,
  Ticket,
  Visitor,
  Exhibit,
  Movement,
  Restoration,
}

impl RecordKind {
  pub const ALL: [RecordKind; 8] = [
    Self::Employee,
    Self::Hall,
    Self::Supply,
    Self::Ticket,
    Self::Visitor,
    Self::Exhibit,
    Self::Movement,
    Self::Restoration,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Employee => "employee",
      Self::Hall => "hall",
      Self::Supply => "supply",
      Self::Ticket => "ticket",
      Self::Visitor => "visitor",
      Self::Exhibit => "exhibit",
      Self::Movement => "movement",
      Self::Restoration => "restoration",
    }
  }
}

impl fmt::Display for RecordKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ─── Record trait ────────────────────────────────────────────────────────────

/// Ties a stored record type to its kind and its create/patch payloads, so
/// CRUD can be written once for all kinds.
///
/// The serialised field names of the record, its create payload and its
/// patch are the storage column names.
pub trait Record:
  Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
  const KIND: RecordKind;

  type New: Validate + Serialize + DeserializeOwned + fmt::Debug + Send + Sync + 'static;
  type Patch: Validate
    + Serialize
    + DeserializeOwned
    + Default
    + fmt::Debug
    + Send
    + Sync
    + 'static;

  fn id(&self) -> Id;
}

fn default_access_level() -> String { DEFAULT_ACCESS_LEVEL.to_owned() }

fn default_hall_type() -> String { DEFAULT_HALL_TYPE.to_owned() }

fn default_payment_status() -> String { DEFAULT_PAYMENT_STATUS.to_owned() }

fn default_restoration_status() -> String { RESTORATION_IN_PROGRESS.to_owned() }

fn now() -> DateTime<Utc> { timestamp::truncate(Utc::now()) }

// ─── Employee ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
  pub id:               Id,
  pub full_name:        String,
  pub position:         String,
  /// Advisory only; two employees may share a personnel number.
  pub personnel_number: String,
  pub access_level:     String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
  pub full_name:        String,
  pub position:         String,
  pub personnel_number: String,
  #[serde(default = "default_access_level")]
  pub access_level:     String,
}

impl NewEmployee {
  pub fn new(
    full_name: impl Into<String>,
    position: impl Into<String>,
    personnel_number: impl Into<String>,
  ) -> Self {
    Self {
      full_name:        full_name.into(),
      position:         position.into(),
      personnel_number: personnel_number.into(),
      access_level:     default_access_level(),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub full_name:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub position:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub personnel_number: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub access_level:     Option<String>,
}

impl Record for Employee {
  const KIND: RecordKind = RecordKind::Employee;
  type New = NewEmployee;
  type Patch = EmployeePatch;

  fn id(&self) -> Id { self.id }
}

// ─── Hall ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hall {
  pub id:              Id,
  /// Display number; not unique.
  pub number:          Option<i64>,
  pub exposition_name: Option<String>,
  #[serde(rename = "type")]
  pub hall_type:       String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHall {
  #[serde(default)]
  pub number:          Option<i64>,
  #[serde(default)]
  pub exposition_name: Option<String>,
  #[serde(rename = "type", default = "default_hall_type")]
  pub hall_type:       String,
}

impl NewHall {
  pub fn new(number: i64, exposition_name: impl Into<String>) -> Self {
    Self {
      number:          Some(number),
      exposition_name: Some(exposition_name.into()),
      hall_type:       default_hall_type(),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HallPatch {
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub number:          Option<Option<i64>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub exposition_name: Option<Option<String>>,
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub hall_type:       Option<String>,
}

impl Record for Hall {
  const KIND: RecordKind = RecordKind::Hall;
  type New = NewHall;
  type Patch = HallPatch;

  fn id(&self) -> Id { self.id }
}

// ─── Supply ──────────────────────────────────────────────────────────────────

/// An acquisition batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
  pub id:          Id,
  /// Unique across supplies.
  pub number:      String,
  pub date:        NaiveDate,
  pub supplier:    String,
  /// The employee who took delivery.
  pub employee_id: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupply {
  pub number:      String,
  pub date:        NaiveDate,
  pub supplier:    String,
  #[serde(default)]
  pub employee_id: Option<Id>,
}

impl NewSupply {
  pub fn new(number: impl Into<String>, date: NaiveDate, supplier: impl Into<String>) -> Self {
    Self {
      number: number.into(),
      date,
      supplier: supplier.into(),
      employee_id: None,
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplyPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub number:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date:        Option<NaiveDate>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub supplier:    Option<String>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub employee_id: Option<Option<Id>>,
}

impl Record for Supply {
  const KIND: RecordKind = RecordKind::Supply;
  type New = NewSupply;
  type Patch = SupplyPatch;

  fn id(&self) -> Id { self.id }
}

// ─── Ticket ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
  pub id:             Id,
  /// Unique across tickets.
  pub number:         String,
  #[serde(with = "timestamp")]
  pub date_time:      DateTime<Utc>,
  #[serde(rename = "type")]
  pub ticket_type:    String,
  pub price:          f64,
  pub payment_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTicket {
  pub number:         String,
  #[serde(with = "timestamp", default = "now")]
  pub date_time:      DateTime<Utc>,
  #[serde(rename = "type")]
  pub ticket_type:    String,
  pub price:          f64,
  #[serde(default = "default_payment_status")]
  pub payment_status: String,
}

impl NewTicket {
  /// A ticket sold now and not yet paid for.
  pub fn new(number: impl Into<String>, ticket_type: impl Into<String>, price: f64) -> Self {
    Self {
      number: number.into(),
      date_time: now(),
      ticket_type: ticket_type.into(),
      price,
      payment_status: default_payment_status(),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub number:         Option<String>,
  #[serde(
    default,
    with = "timestamp::option",
    skip_serializing_if = "Option::is_none"
  )]
  pub date_time:      Option<DateTime<Utc>>,
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub ticket_type:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub price:          Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payment_status: Option<String>,
}

impl Record for Ticket {
  const KIND: RecordKind = RecordKind::Ticket;
  type New = NewTicket;
  type Patch = TicketPatch;

  fn id(&self) -> Id { self.id }
}

// ─── Visitor ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
  pub id:        Id,
  pub name:      String,
  pub age:       i64,
  pub phone:     Option<String>,
  pub email:     Option<String>,
  /// Nothing stops two visitors from pointing at the same ticket.
  pub ticket_id: Option<Id>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVisitor {
  pub name:      String,
  pub age:       i64,
  #[serde(default)]
  pub phone:     Option<String>,
  #[serde(default)]
  pub email:     Option<String>,
  #[serde(default)]
  pub ticket_id: Option<Id>,
}

impl NewVisitor {
  pub fn new(name: impl Into<String>, age: i64) -> Self {
    Self {
      name: name.into(),
      age,
      phone: None,
      email: None,
      ticket_id: None,
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitorPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub age:       Option<i64>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub phone:     Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub email:     Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub ticket_id: Option<Option<Id>>,
}

impl Record for Visitor {
  const KIND: RecordKind = RecordKind::Visitor;
  type New = NewVisitor;
  type Patch = VisitorPatch;

  fn id(&self) -> Id { self.id }
}

// ─── Exhibit ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibit {
  pub id:               Id,
  /// Unique across exhibits.
  pub inventory_number: String,
  pub title:            String,
  pub description:      Option<String>,
  pub creation_date:    Option<NaiveDate>,
  pub author:           Option<String>,
  pub condition:        Option<String>,
  pub storage_location: Option<String>,
  pub hall_id:          Option<Id>,
  pub supply_id:        Option<Id>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExhibit {
  pub inventory_number: String,
  pub title:            String,
  #[serde(default)]
  pub description:      Option<String>,
  #[serde(default)]
  pub creation_date:    Option<NaiveDate>,
  #[serde(default)]
  pub author:           Option<String>,
  #[serde(default)]
  pub condition:        Option<String>,
  #[serde(default)]
  pub storage_location: Option<String>,
  #[serde(default)]
  pub hall_id:          Option<Id>,
  #[serde(default)]
  pub supply_id:        Option<Id>,
}

impl NewExhibit {
  pub fn new(inventory_number: impl Into<String>, title: impl Into<String>) -> Self {
    Self {
      inventory_number: inventory_number.into(),
      title: title.into(),
      ..Self::default()
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExhibitPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub inventory_number: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:            Option<String>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub description:      Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub creation_date:    Option<Option<NaiveDate>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub author:           Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub condition:        Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub storage_location: Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub hall_id:          Option<Option<Id>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub supply_id:        Option<Option<Id>>,
}

impl Record for Exhibit {
  const KIND: RecordKind = RecordKind::Exhibit;
  type New = NewExhibit;
  type Patch = ExhibitPatch;

  fn id(&self) -> Id { self.id }
}

// ─── Movement ────────────────────────────────────────────────────────────────

/// One physical relocation of an exhibit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
  pub id:                      Id,
  pub exhibit_id:              Id,
  pub from_location:           Option<String>,
  pub to_location:             Option<String>,
  #[serde(with = "timestamp")]
  pub moved_at:                DateTime<Utc>,
  pub responsible_employee_id: Option<Id>,
  pub reason:                  Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovement {
  pub exhibit_id:              Id,
  #[serde(default)]
  pub from_location:           Option<String>,
  #[serde(default)]
  pub to_location:             Option<String>,
  #[serde(with = "timestamp", default = "now")]
  pub moved_at:                DateTime<Utc>,
  #[serde(default)]
  pub responsible_employee_id: Option<Id>,
  #[serde(default)]
  pub reason:                  Option<String>,
}

impl NewMovement {
  /// A movement of `exhibit_id` happening now.
  pub fn new(exhibit_id: Id) -> Self {
    Self {
      exhibit_id,
      from_location: None,
      to_location: None,
      moved_at: now(),
      responsible_employee_id: None,
      reason: None,
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exhibit_id:              Option<Id>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub from_location:           Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub to_location:             Option<Option<String>>,
  #[serde(
    default,
    with = "timestamp::option",
    skip_serializing_if = "Option::is_none"
  )]
  pub moved_at:                Option<DateTime<Utc>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub responsible_employee_id: Option<Option<Id>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub reason:                  Option<Option<String>>,
}

impl Record for Movement {
  const KIND: RecordKind = RecordKind::Movement;
  type New = NewMovement;
  type Patch = MovementPatch;

  fn id(&self) -> Id { self.id }
}

// ─── Restoration ─────────────────────────────────────────────────────────────

/// One restoration episode of an exhibit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restoration {
  pub id:          Id,
  pub exhibit_id:  Id,
  pub start_date:  NaiveDate,
  pub end_date:    Option<NaiveDate>,
  pub executor:    Option<String>,
  pub description: Option<String>,
  /// Free text; [`RESTORATION_IN_PROGRESS`] marks a current episode.
  pub status:      String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRestoration {
  pub exhibit_id:  Id,
  pub start_date:  NaiveDate,
  #[serde(default)]
  pub end_date:    Option<NaiveDate>,
  #[serde(default)]
  pub executor:    Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default = "default_restoration_status")]
  pub status:      String,
}

impl NewRestoration {
  /// An open restoration episode starting on `start_date`.
  pub fn new(exhibit_id: Id, start_date: NaiveDate) -> Self {
    Self {
      exhibit_id,
      start_date,
      end_date: None,
      executor: None,
      description: None,
      status: default_restoration_status(),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestorationPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub exhibit_id:  Option<Id>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_date:  Option<NaiveDate>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub end_date:    Option<Option<NaiveDate>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub executor:    Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub description: Option<Option<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status:      Option<String>,
}

impl Record for Restoration {
  const KIND: RecordKind = RecordKind::Restoration;
  type New = NewRestoration;
  type Patch = RestorationPatch;

  fn id(&self) -> Id { self.id }
}
