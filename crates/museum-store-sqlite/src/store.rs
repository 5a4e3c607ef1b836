//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].
//!
//! Every public operation runs as exactly one closure on the connection
//! thread, so multi-step reads (the composite queries) see one consistent
//! state and writes are visible to the read that returns them.

use std::{collections::HashMap, path::Path};

use chrono::{DateTime, Utc};
use museum_core::{
  Id, Record, RecordKind,
  query::{ExhibitInfo, HallStatistics, VisitorWithTicket},
  record::{
    Employee, Exhibit, Hall, Movement, RESTORATION_IN_PROGRESS, Restoration, Supply, Ticket,
    Visitor,
  },
  store::CatalogStore,
  timestamp,
  validate::Validate,
};
use rusqlite::{Connection, OptionalExtension as _, Params, params_from_iter, types::Value};

use crate::{
  Result,
  encode::{RawRow, assignments},
  schema::{SCHEMA, quote, select_list, table},
};

// ─── Row helpers ─────────────────────────────────────────────────────────────

/// `SELECT` every column of `kind`'s table, followed by `tail` (a `WHERE`,
/// `ORDER BY` or `LIMIT` clause, possibly empty).
fn query_rows<P: Params>(
  conn: &Connection,
  kind: RecordKind,
  tail: &str,
  params: P,
) -> rusqlite::Result<Vec<RawRow>> {
  let sql = format!("SELECT {} FROM {} {tail}", select_list(kind), table(kind));
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(params, |row| RawRow::from_row(row, kind))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn query_by_id(conn: &Connection, kind: RecordKind, id: Id) -> rusqlite::Result<Option<RawRow>> {
  let sql = format!("SELECT {} FROM {} WHERE \"id\" = ?1", select_list(kind), table(kind));
  conn
    .query_row(&sql, rusqlite::params![id], |row| RawRow::from_row(row, kind))
    .optional()
}

fn decode_all<R: Record>(raws: Vec<RawRow>) -> Result<Vec<R>> {
  raws.into_iter().map(RawRow::into_record).collect()
}

/// Outcome of a patch, decided inside the connection closure.
enum Patched<R> {
  Missing,
  Rejected(crate::Error),
  Updated(R),
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A museum catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Records of kind `R` matching `tail`, bound to `args`.
  async fn select<R: Record>(&self, tail: &'static str, args: Vec<Value>) -> Result<Vec<R>> {
    let kind = R::KIND;
    let raws = self
      .conn
      .call(move |conn| Ok(query_rows(conn, kind, tail, params_from_iter(args))?))
      .await?;
    decode_all(raws)
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  // ── Generic CRUD ──────────────────────────────────────────────────────────

  async fn list<R: Record>(&self) -> Result<Vec<R>> { self.select("", Vec::new()).await }

  async fn get<R: Record>(&self, id: Id) -> Result<Option<R>> {
    let kind = R::KIND;
    let raw = self
      .conn
      .call(move |conn| Ok(query_by_id(conn, kind, id)?))
      .await?;
    raw.map(RawRow::into_record).transpose()
  }

  async fn create<R: Record>(&self, new: R::New) -> Result<R> {
    new.validate()?;

    let kind = R::KIND;
    let fields = assignments(kind, &new)?;

    let record = self
      .conn
      .call(move |conn| {
        let sql = if fields.is_empty() {
          format!("INSERT INTO {} DEFAULT VALUES", table(kind))
        } else {
          let names: Vec<String> = fields.iter().map(|(c, _)| quote(c)).collect();
          let slots: Vec<String> = (1..=fields.len()).map(|i| format!("?{i}")).collect();
          format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table(kind),
            names.join(", "),
            slots.join(", "),
          )
        };

        let tx = conn.transaction()?;
        tx.execute(&sql, params_from_iter(fields.into_iter().map(|(_, v)| v)))?;
        let id = tx.last_insert_rowid();
        let raw = query_by_id(&tx, kind, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;

        // A row that cannot be read back is rolled back with the transaction.
        let record = raw.into_record::<R>();
        if record.is_ok() {
          tx.commit()?;
        }
        Ok(record)
      })
      .await??;

    tracing::debug!(kind = %kind, id = record.id(), "created record");
    Ok(record)
  }

  async fn update<R: Record>(&self, id: Id, patch: R::Patch) -> Result<Option<R>> {
    let kind = R::KIND;
    let verdict = patch.validate();
    let fields = assignments(kind, &patch)?;

    let patched = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if query_by_id(&tx, kind, id)?.is_none() {
          return Ok(Patched::Missing);
        }
        if let Err(e) = verdict {
          return Ok(Patched::Rejected(e.into()));
        }

        if !fields.is_empty() {
          let sets: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, (c, _))| format!("{} = ?{}", quote(c), i + 1))
            .collect();
          let sql = format!(
            "UPDATE {} SET {} WHERE \"id\" = ?{}",
            table(kind),
            sets.join(", "),
            fields.len() + 1,
          );
          let args = fields
            .into_iter()
            .map(|(_, v)| v)
            .chain(std::iter::once(Value::Integer(id)));
          tx.execute(&sql, params_from_iter(args))?;
        }

        let raw = query_by_id(&tx, kind, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        match raw.into_record::<R>() {
          Ok(record) => {
            tx.commit()?;
            Ok(Patched::Updated(record))
          }
          Err(e) => Ok(Patched::Rejected(e)),
        }
      })
      .await?;

    match patched {
      Patched::Missing => Ok(None),
      Patched::Rejected(e) => Err(e),
      Patched::Updated(record) => {
        tracing::debug!(kind = %kind, id, "updated record");
        Ok(Some(record))
      }
    }
  }

  async fn delete<R: Record>(&self, id: Id) -> Result<bool> {
    let kind = R::KIND;
    let removed = self
      .conn
      .call(move |conn| {
        let sql = format!("DELETE FROM {} WHERE \"id\" = ?1", table(kind));
        Ok(conn.execute(&sql, rusqlite::params![id])?)
      })
      .await?;

    if removed > 0 {
      tracing::debug!(kind = %kind, id, "deleted record");
    }
    Ok(removed > 0)
  }

  // ── Kind-specific lookups ─────────────────────────────────────────────────

  async fn employees_by_position(&self, position: &str) -> Result<Vec<Employee>> {
    self
      .select("WHERE \"position\" = ?1", vec![Value::Text(position.to_owned())])
      .await
  }

  async fn exhibit_by_inventory_number(&self, inventory_number: &str) -> Result<Option<Exhibit>> {
    let found = self
      .select(
        "WHERE \"inventory_number\" = ?1 LIMIT 1",
        vec![Value::Text(inventory_number.to_owned())],
      )
      .await?;
    Ok(found.into_iter().next())
  }

  // ── Composite queries ─────────────────────────────────────────────────────

  async fn exhibits_in_hall(&self, hall_number: i64) -> Result<Vec<Exhibit>> {
    // A missing hall makes the subquery NULL, which matches no exhibit.
    self
      .select(
        "WHERE \"hall_id\" = (
           SELECT \"id\" FROM halls WHERE \"number\" = ?1 ORDER BY \"id\" LIMIT 1
         )",
        vec![Value::Integer(hall_number)],
      )
      .await
  }

  async fn exhibits_from_supply(&self, supply_id: Id) -> Result<Vec<Exhibit>> {
    self
      .select("WHERE \"supply_id\" = ?1", vec![Value::Integer(supply_id)])
      .await
  }

  async fn movement_history(&self, exhibit_id: Id) -> Result<Vec<Movement>> {
    self
      .select(
        "WHERE \"exhibit_id\" = ?1 ORDER BY \"moved_at\", \"id\"",
        vec![Value::Integer(exhibit_id)],
      )
      .await
  }

  async fn movements_by_period(
    &self,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> Result<Vec<Movement>> {
    self
      .select(
        "WHERE \"moved_at\" >= ?1 AND \"moved_at\" <= ?2 ORDER BY \"moved_at\", \"id\"",
        vec![
          Value::Text(timestamp::format(&start)),
          Value::Text(timestamp::format(&end)),
        ],
      )
      .await
  }

  async fn current_restorations(&self) -> Result<Vec<Restoration>> {
    self
      .select(
        "WHERE \"status\" = ?1",
        vec![Value::Text(RESTORATION_IN_PROGRESS.to_owned())],
      )
      .await
  }

  async fn full_exhibit_info(&self, exhibit_id: Id) -> Result<Option<ExhibitInfo>> {
    let parts = self
      .conn
      .call(move |conn| {
        let Some(exhibit) = query_by_id(conn, RecordKind::Exhibit, exhibit_id)? else {
          return Ok(None);
        };

        let hall = match exhibit.reference("hall_id") {
          Some(id) => query_by_id(conn, RecordKind::Hall, id)?,
          None => None,
        };
        let supply = match exhibit.reference("supply_id") {
          Some(id) => query_by_id(conn, RecordKind::Supply, id)?,
          None => None,
        };
        let movements = query_rows(
          conn,
          RecordKind::Movement,
          "WHERE \"exhibit_id\" = ?1 ORDER BY \"moved_at\", \"id\"",
          rusqlite::params![exhibit_id],
        )?;
        let restorations = query_rows(
          conn,
          RecordKind::Restoration,
          "WHERE \"exhibit_id\" = ?1 ORDER BY \"start_date\", \"id\"",
          rusqlite::params![exhibit_id],
        )?;

        Ok(Some((exhibit, hall, supply, movements, restorations)))
      })
      .await?;

    let Some((exhibit, hall, supply, movements, restorations)) = parts else {
      return Ok(None);
    };

    Ok(Some(ExhibitInfo {
      exhibit:      exhibit.into_record::<Exhibit>()?,
      hall:         hall.map(RawRow::into_record::<Hall>).transpose()?,
      supply:       supply.map(RawRow::into_record::<Supply>).transpose()?,
      movements:    decode_all(movements)?,
      restorations: decode_all(restorations)?,
    }))
  }

  async fn halls_statistics(&self) -> Result<Vec<HallStatistics>> {
    let stats = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT h.\"id\", h.\"number\", h.\"exposition_name\", h.\"type\", COUNT(e.\"id\")
           FROM halls h
           LEFT JOIN exhibits e ON e.\"hall_id\" = h.\"id\"
           GROUP BY h.\"id\"
           ORDER BY h.\"id\"",
        )?;

        let rows = stmt
          .query_map([], |row| {
            let count: i64 = row.get(4)?;
            let exhibits_count = u64::try_from(count)
              .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(4, count))?;
            Ok(HallStatistics {
              hall_id:         row.get(0)?,
              hall_number:     row.get(1)?,
              exposition_name: row.get(2)?,
              hall_type:       row.get(3)?,
              exhibits_count,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    Ok(stats)
  }

  async fn visitors_with_tickets(&self) -> Result<Vec<VisitorWithTicket>> {
    let (visitors, tickets) = self
      .conn
      .call(|conn| {
        let visitors = query_rows(conn, RecordKind::Visitor, "", [])?;
        let tickets = query_rows(
          conn,
          RecordKind::Ticket,
          "WHERE \"id\" IN (SELECT \"ticket_id\" FROM visitors)",
          [],
        )?;
        Ok((visitors, tickets))
      })
      .await?;

    let tickets: HashMap<Id, Ticket> = decode_all::<Ticket>(tickets)?
      .into_iter()
      .map(|t| (t.id, t))
      .collect();

    decode_all::<Visitor>(visitors)?
      .into_iter()
      .map(|visitor| {
        let ticket = visitor.ticket_id.and_then(|id| tickets.get(&id).cloned());
        Ok(VisitorWithTicket { visitor, ticket })
      })
      .collect()
  }
}
