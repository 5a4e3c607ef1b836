//! SQL schema for the museum SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

use museum_core::RecordKind;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Reference columns (`*_id`) carry no `REFERENCES` clause: ids are not
/// checked on write and deletes never cascade or null out dependents.
/// `AUTOINCREMENT` keeps ids from being reused after a delete.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS employees (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name        TEXT NOT NULL,
    position         TEXT NOT NULL,
    personnel_number TEXT NOT NULL,   -- advisory, not unique
    access_level     TEXT NOT NULL DEFAULT 'user'
);

CREATE TABLE IF NOT EXISTS halls (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    number          INTEGER,          -- display number, not unique
    exposition_name TEXT,
    \"type\"          TEXT NOT NULL DEFAULT 'hall'
);

CREATE TABLE IF NOT EXISTS supplies (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    number      TEXT NOT NULL UNIQUE,
    date        TEXT NOT NULL,        -- YYYY-MM-DD
    supplier    TEXT NOT NULL,
    employee_id INTEGER
);

CREATE TABLE IF NOT EXISTS tickets (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    number         TEXT NOT NULL UNIQUE,
    date_time      TEXT NOT NULL,     -- fixed-width RFC 3339 UTC
    \"type\"         TEXT NOT NULL,
    price          REAL NOT NULL CHECK (price >= 0),
    payment_status TEXT NOT NULL DEFAULT 'not paid'
);

CREATE TABLE IF NOT EXISTS visitors (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT NOT NULL,
    age       INTEGER NOT NULL CHECK (age >= 0),
    phone     TEXT,
    email     TEXT,
    ticket_id INTEGER               -- not unique: tickets may be shared
);

CREATE TABLE IF NOT EXISTS exhibits (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    inventory_number TEXT NOT NULL UNIQUE,
    title            TEXT NOT NULL,
    description      TEXT,
    creation_date    TEXT,
    author           TEXT,
    condition        TEXT,
    storage_location TEXT,
    hall_id          INTEGER,
    supply_id        INTEGER
);

CREATE TABLE IF NOT EXISTS movements (
    id                      INTEGER PRIMARY KEY AUTOINCREMENT,
    exhibit_id              INTEGER NOT NULL,
    from_location           TEXT,
    to_location             TEXT,
    moved_at                TEXT NOT NULL,   -- fixed-width RFC 3339 UTC
    responsible_employee_id INTEGER,
    reason                  TEXT
);

CREATE TABLE IF NOT EXISTS restorations (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    exhibit_id  INTEGER NOT NULL,
    start_date  TEXT NOT NULL,
    end_date    TEXT,
    executor    TEXT,
    description TEXT,
    status      TEXT NOT NULL DEFAULT 'in progress'
);

CREATE INDEX IF NOT EXISTS employees_position_idx     ON employees(position);
CREATE INDEX IF NOT EXISTS halls_number_idx           ON halls(number);
CREATE INDEX IF NOT EXISTS exhibits_hall_idx          ON exhibits(hall_id);
CREATE INDEX IF NOT EXISTS exhibits_supply_idx        ON exhibits(supply_id);
CREATE INDEX IF NOT EXISTS movements_exhibit_idx      ON movements(exhibit_id, moved_at);
CREATE INDEX IF NOT EXISTS movements_moved_idx        ON movements(moved_at);
CREATE INDEX IF NOT EXISTS restorations_exhibit_idx   ON restorations(exhibit_id, start_date);
CREATE INDEX IF NOT EXISTS restorations_status_idx    ON restorations(status);

PRAGMA user_version = 1;
";

/// The table holding records of `kind`.
pub fn table(kind: RecordKind) -> &'static str {
  match kind {
    RecordKind::Employee => "employees",
    RecordKind::Hall => "halls",
    RecordKind::Supply => "supplies",
    RecordKind::Ticket => "tickets",
    RecordKind::Visitor => "visitors",
    RecordKind::Exhibit => "exhibits",
    RecordKind::Movement => "movements",
    RecordKind::Restoration => "restorations",
  }
}

/// Data columns of `kind`'s table, excluding `id`, in DDL order.
///
/// These names double as the serde field names of the record types and are
/// the only identifiers ever spliced into generated SQL.
pub fn columns(kind: RecordKind) -> &'static [&'static str] {
  match kind {
    RecordKind::Employee => &["full_name", "position", "personnel_number", "access_level"],
    RecordKind::Hall => &["number", "exposition_name", "type"],
    RecordKind::Supply => &["number", "date", "supplier", "employee_id"],
    RecordKind::Ticket => &["number", "date_time", "type", "price", "payment_status"],
    RecordKind::Visitor => &["name", "age", "phone", "email", "ticket_id"],
    RecordKind::Exhibit => &[
      "inventory_number",
      "title",
      "description",
      "creation_date",
      "author",
      "condition",
      "storage_location",
      "hall_id",
      "supply_id",
    ],
    RecordKind::Movement => &[
      "exhibit_id",
      "from_location",
      "to_location",
      "moved_at",
      "responsible_employee_id",
      "reason",
    ],
    RecordKind::Restoration => &[
      "exhibit_id",
      "start_date",
      "end_date",
      "executor",
      "description",
      "status",
    ],
  }
}

/// `"id", "col1", "col2", ...` for a `SELECT` over `kind`'s table.
pub fn select_list(kind: RecordKind) -> String {
  std::iter::once("id")
    .chain(columns(kind).iter().copied())
    .map(quote)
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn quote(column: &str) -> String { format!("\"{column}\"") }
