//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use museum_core::{
  ErrorKind, StoreError,
  record::{
    Employee, EmployeePatch, Exhibit, ExhibitPatch, Hall, HallPatch, Movement, MovementPatch,
    NewEmployee, NewExhibit, NewHall, NewMovement, NewRestoration, NewSupply, NewTicket,
    NewVisitor, RESTORATION_IN_PROGRESS, Restoration, RestorationPatch, Supply, SupplyPatch,
    Ticket, TicketPatch, Visitor, VisitorPatch,
  },
  store::CatalogStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

async fn hall(s: &SqliteStore, number: i64) -> Hall {
  s.create::<Hall>(NewHall::new(number, format!("Hall {number}")))
    .await
    .unwrap()
}

async fn exhibit(s: &SqliteStore, inventory: &str, hall_id: Option<i64>) -> Exhibit {
  let mut new = NewExhibit::new(inventory, format!("Exhibit {inventory}"));
  new.hall_id = hall_id;
  s.create::<Exhibit>(new).await.unwrap()
}

// ─── CRUD ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_returns_the_same_record() {
  let s = store().await;

  let employee = s
    .create::<Employee>(NewEmployee::new("Ivanov Ivan", "cashier", "T001"))
    .await
    .unwrap();
  assert_eq!(employee.access_level, "user");
  assert_eq!(s.get::<Employee>(employee.id).await.unwrap(), Some(employee));

  let ticket = s
    .create::<Ticket>(NewTicket::new("B5001", "adult", 500.0))
    .await
    .unwrap();
  assert_eq!(ticket.payment_status, "not paid");
  assert_eq!(s.get::<Ticket>(ticket.id).await.unwrap(), Some(ticket));

  let mut new_supply = NewSupply::new("P-2025-10-01", date(2025, 10, 1), "Gallery Alpha");
  new_supply.employee_id = Some(99);
  let supply = s.create::<Supply>(new_supply).await.unwrap();
  assert_eq!(supply.date, date(2025, 10, 1));
  assert_eq!(s.get::<Supply>(supply.id).await.unwrap(), Some(supply));
}

#[tokio::test]
async fn list_returns_every_record_of_a_kind() {
  let s = store().await;
  hall(&s, 1).await;
  hall(&s, 2).await;
  hall(&s, 3).await;
  exhibit(&s, "INV-1", None).await;

  assert_eq!(s.list::<Hall>().await.unwrap().len(), 3);
  assert_eq!(s.list::<Exhibit>().await.unwrap().len(), 1);
  assert!(s.list::<Visitor>().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_ids_report_not_found() {
  let s = store().await;

  assert!(s.get::<Employee>(42).await.unwrap().is_none());
  assert!(s.get::<Restoration>(42).await.unwrap().is_none());
  assert!(
    s.update::<Visitor>(42, VisitorPatch { age: Some(3), ..Default::default() })
      .await
      .unwrap()
      .is_none()
  );
  assert!(!s.delete::<Movement>(42).await.unwrap());
}

#[tokio::test]
async fn update_of_missing_id_is_not_found_even_with_bad_input() {
  let s = store().await;
  let patch = TicketPatch { price: Some(-5.0), ..Default::default() };
  assert!(s.update::<Ticket>(7, patch).await.unwrap().is_none());
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
  let s = store().await;

  let mut new = NewVisitor::new("Maria", 12);
  new.phone = Some("+7-900-222-33-44".into());
  new.email = Some("maria@example.com".into());
  new.ticket_id = Some(5);
  let before = s.create::<Visitor>(new).await.unwrap();

  let after = s
    .update::<Visitor>(before.id, VisitorPatch { age: Some(13), ..Default::default() })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(after.age, 13);
  assert_eq!(Visitor { age: 13, ..before.clone() }, after);
  assert_eq!(s.get::<Visitor>(before.id).await.unwrap(), Some(after));
}

#[tokio::test]
async fn update_can_clear_an_optional_field() {
  let s = store().await;
  let h = hall(&s, 1).await;
  let e = exhibit(&s, "INV-1", Some(h.id)).await;

  let patch = ExhibitPatch { hall_id: Some(None), ..Default::default() };
  let updated = s.update::<Exhibit>(e.id, patch).await.unwrap().unwrap();
  assert_eq!(updated.hall_id, None);
  assert_eq!(updated.title, e.title);
}

#[tokio::test]
async fn empty_patch_returns_record_unchanged() {
  let s = store().await;
  let h = hall(&s, 4).await;
  let same = s.update::<Hall>(h.id, HallPatch::default()).await.unwrap();
  assert_eq!(same, Some(h));
}

#[tokio::test]
async fn every_kind_supports_patch_updates() {
  let s = store().await;

  let emp = s
    .create::<Employee>(NewEmployee::new("Petrov", "guide", "T002"))
    .await
    .unwrap();
  let emp = s
    .update::<Employee>(emp.id, EmployeePatch {
      position: Some("curator".into()),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(emp.position, "curator");
  assert_eq!(emp.full_name, "Petrov");

  let supply = s
    .create::<Supply>(NewSupply::new("P-1", date(2025, 1, 1), "Alpha"))
    .await
    .unwrap();
  let supply = s
    .update::<Supply>(supply.id, SupplyPatch {
      employee_id: Some(Some(emp.id)),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(supply.employee_id, Some(emp.id));

  let ticket = s
    .create::<Ticket>(NewTicket::new("B1", "adult", 500.0))
    .await
    .unwrap();
  let ticket = s
    .update::<Ticket>(ticket.id, TicketPatch {
      payment_status: Some("paid".into()),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(ticket.payment_status, "paid");
  assert_eq!(ticket.price, 500.0);

  let e = exhibit(&s, "INV-1", None).await;
  let movement = s.create::<Movement>(NewMovement::new(e.id)).await.unwrap();
  let movement = s
    .update::<Movement>(movement.id, MovementPatch {
      reason: Some(Some("loan".into())),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(movement.reason.as_deref(), Some("loan"));

  let restoration = s
    .create::<Restoration>(NewRestoration::new(e.id, date(2025, 5, 1)))
    .await
    .unwrap();
  let restoration = s
    .update::<Restoration>(restoration.id, RestorationPatch {
      end_date: Some(Some(date(2025, 7, 1))),
      status: Some("completed".into()),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(restoration.end_date, Some(date(2025, 7, 1)));
  assert_eq!(restoration.start_date, date(2025, 5, 1));
}

#[tokio::test]
async fn delete_is_not_repeatable() {
  let s = store().await;
  let h = hall(&s, 1).await;

  assert!(s.delete::<Hall>(h.id).await.unwrap());
  assert!(s.get::<Hall>(h.id).await.unwrap().is_none());
  assert!(!s.delete::<Hall>(h.id).await.unwrap());
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let first = hall(&s, 1).await;
  s.delete::<Hall>(first.id).await.unwrap();
  let second = hall(&s, 2).await;
  assert!(second.id > first.id);
}

#[tokio::test]
async fn delete_leaves_dependents_dangling() {
  let s = store().await;
  let h = hall(&s, 1).await;
  let e = exhibit(&s, "INV-1", Some(h.id)).await;

  assert!(s.delete::<Hall>(h.id).await.unwrap());

  let e = s.get::<Exhibit>(e.id).await.unwrap().unwrap();
  assert_eq!(e.hall_id, Some(h.id));

  let info = s.full_exhibit_info(e.id).await.unwrap().unwrap();
  assert!(info.hall.is_none());
}

#[tokio::test]
async fn references_are_not_checked_on_write() {
  let s = store().await;
  let e = exhibit(&s, "INV-1", Some(12345)).await;
  assert_eq!(e.hall_id, Some(12345));

  let mut new = NewVisitor::new("Alexey", 35);
  new.ticket_id = Some(777);
  assert!(s.create::<Visitor>(new).await.is_ok());
}

// ─── Validation & storage errors ─────────────────────────────────────────────

#[tokio::test]
async fn negative_price_is_rejected_and_not_persisted() {
  let s = store().await;

  let err = s
    .create::<Ticket>(NewTicket::new("B1", "adult", -1.0))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ValidationFailed);
  assert!(s.list::<Ticket>().await.unwrap().is_empty());
}

#[tokio::test]
async fn negative_age_is_rejected_on_create_and_update() {
  let s = store().await;

  let err = s
    .create::<Visitor>(NewVisitor::new("Alexey", -1))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ValidationFailed);

  let v = s.create::<Visitor>(NewVisitor::new("Alexey", 35)).await.unwrap();
  let err = s
    .update::<Visitor>(v.id, VisitorPatch { age: Some(-2), ..Default::default() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(_)));
  assert_eq!(s.get::<Visitor>(v.id).await.unwrap().unwrap().age, 35);
}

#[tokio::test]
async fn duplicate_inventory_number_is_a_storage_error() {
  let s = store().await;
  exhibit(&s, "INV-1001", None).await;

  let err = s
    .create::<Exhibit>(NewExhibit::new("INV-1001", "Duplicate"))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
  assert!(matches!(err, Error::Database(_)));
  assert_eq!(s.list::<Exhibit>().await.unwrap().len(), 1);
}

#[tokio::test]
async fn offset_timestamp_past_year_9999_is_rejected_and_not_persisted() {
  let s = store().await;
  let e = exhibit(&s, "INV-1", None).await;

  // Valid RFC 3339, but year 10000 once converted to UTC.
  let new: NewMovement = serde_json::from_value(serde_json::json!({
    "exhibit_id": e.id,
    "moved_at": "9999-12-31T23:59:59-01:00",
  }))
  .unwrap();
  let err = s.create::<Movement>(new).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ValidationFailed);

  assert!(s.list::<Movement>().await.unwrap().is_empty());
  assert!(s.movement_history(e.id).await.unwrap().is_empty());
  assert!(s.full_exhibit_info(e.id).await.unwrap().is_some());

  let t = s
    .create::<Ticket>(NewTicket::new("B1", "adult", 100.0))
    .await
    .unwrap();
  let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
  let err = s
    .update::<Ticket>(t.id, TicketPatch { date_time: Some(far), ..Default::default() })
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ValidationFailed);
  assert_eq!(s.get::<Ticket>(t.id).await.unwrap(), Some(t));
  assert_eq!(s.list::<Ticket>().await.unwrap().len(), 1);
}

#[tokio::test]
async fn restoration_dates_outside_four_digit_years_are_rejected() {
  let s = store().await;
  let e = exhibit(&s, "INV-1", None).await;

  let err = s
    .create::<Restoration>(NewRestoration::new(e.id, date(10000, 1, 1)))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ValidationFailed);

  let r = s
    .create::<Restoration>(NewRestoration::new(e.id, date(2024, 1, 1)))
    .await
    .unwrap();
  let err = s
    .update::<Restoration>(r.id, RestorationPatch {
      start_date: Some(date(-5, 1, 1)),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ValidationFailed);

  let info = s.full_exhibit_info(e.id).await.unwrap().unwrap();
  let starts: Vec<_> = info.restorations.iter().map(|r| r.start_date).collect();
  assert_eq!(starts, vec![date(2024, 1, 1)]);
}

// ─── Kind-specific lookups ───────────────────────────────────────────────────

#[tokio::test]
async fn employees_by_position_is_exact_and_case_sensitive() {
  let s = store().await;
  for (name, position) in [("A", "cashier"), ("B", "guide"), ("C", "cashier"), ("D", "Cashier")] {
    s.create::<Employee>(NewEmployee::new(name, position, name))
      .await
      .unwrap();
  }

  let cashiers = s.employees_by_position("cashier").await.unwrap();
  assert_eq!(cashiers.len(), 2);
  assert!(cashiers.iter().all(|e| e.position == "cashier"));
  assert!(s.employees_by_position("janitor").await.unwrap().is_empty());
}

#[tokio::test]
async fn find_by_inventory_number() {
  let s = store().await;
  let e = exhibit(&s, "INV-1001", None).await;

  assert_eq!(s.exhibit_by_inventory_number("INV-1001").await.unwrap(), Some(e));
  assert!(s.exhibit_by_inventory_number("INV-9999").await.unwrap().is_none());
}

// ─── Composite queries ───────────────────────────────────────────────────────

#[tokio::test]
async fn exhibits_in_hall_resolves_hall_number() {
  let s = store().await;
  let h1 = hall(&s, 1).await;
  let h2 = hall(&s, 100).await;
  exhibit(&s, "INV-1", Some(h1.id)).await;
  exhibit(&s, "INV-2", Some(h2.id)).await;
  exhibit(&s, "INV-3", Some(h2.id)).await;

  let in_storage = s.exhibits_in_hall(100).await.unwrap();
  assert_eq!(in_storage.len(), 2);
  assert!(in_storage.iter().all(|e| e.hall_id == Some(h2.id)));

  // Hall numbers and ids are different things.
  assert!(s.exhibits_in_hall(h2.id + 1000).await.unwrap().is_empty());
  assert!(s.exhibits_in_hall(7).await.unwrap().is_empty());
}

#[tokio::test]
async fn exhibits_from_supply() {
  let s = store().await;
  let supply = s
    .create::<Supply>(NewSupply::new("P-1", date(2025, 10, 1), "Alpha"))
    .await
    .unwrap();

  let mut new = NewExhibit::new("INV-1", "Icon");
  new.supply_id = Some(supply.id);
  s.create::<Exhibit>(new).await.unwrap();
  exhibit(&s, "INV-2", None).await;

  let from_supply = s.exhibits_from_supply(supply.id).await.unwrap();
  assert_eq!(from_supply.len(), 1);
  assert_eq!(from_supply[0].inventory_number, "INV-1");
  assert!(s.exhibits_from_supply(supply.id + 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn movement_history_is_chronological_regardless_of_insertion_order() {
  let s = store().await;
  let e = exhibit(&s, "INV-1", None).await;
  let other = exhibit(&s, "INV-2", None).await;
  let base = Utc.with_ymd_and_hms(2025, 10, 20, 11, 0, 0).unwrap();

  for offset in [5, -3, 0, 12] {
    let mut new = NewMovement::new(e.id);
    new.moved_at = base + Duration::hours(offset);
    s.create::<Movement>(new).await.unwrap();
  }
  // Sub-second timestamps must sort after the whole second.
  let mut new = NewMovement::new(e.id);
  new.moved_at = base + Duration::milliseconds(500);
  s.create::<Movement>(new).await.unwrap();
  s.create::<Movement>(NewMovement::new(other.id)).await.unwrap();

  let history = s.movement_history(e.id).await.unwrap();
  assert_eq!(history.len(), 5);
  assert!(history.windows(2).all(|w| w[0].moved_at <= w[1].moved_at));
  assert_eq!(history[0].moved_at, base - Duration::hours(3));
  assert_eq!(history[2].moved_at, base + Duration::milliseconds(500));
}

#[tokio::test]
async fn movements_by_period_is_inclusive() {
  let s = store().await;
  let e = exhibit(&s, "INV-1", None).await;
  let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

  for day in [10, 1, 20, 31] {
    let mut new = NewMovement::new(e.id);
    new.moved_at = base + Duration::days(day);
    s.create::<Movement>(new).await.unwrap();
  }

  let found = s
    .movements_by_period(base + Duration::days(1), base + Duration::days(20))
    .await
    .unwrap();
  let days: Vec<i64> = found.iter().map(|m| (m.moved_at - base).num_days()).collect();
  assert_eq!(days, vec![1, 10, 20]);
}

#[tokio::test]
async fn current_restorations_match_the_sentinel_exactly() {
  let s = store().await;
  let e = exhibit(&s, "INV-1", None).await;

  let current = s
    .create::<Restoration>(NewRestoration::new(e.id, date(2025, 5, 1)))
    .await
    .unwrap();
  let mut finished = NewRestoration::new(e.id, date(2024, 1, 1));
  finished.status = "завершено".into();
  s.create::<Restoration>(finished).await.unwrap();
  let mut shouting = NewRestoration::new(e.id, date(2024, 2, 1));
  shouting.status = "IN PROGRESS".into();
  s.create::<Restoration>(shouting).await.unwrap();

  assert_eq!(current.status, RESTORATION_IN_PROGRESS);
  assert_eq!(s.current_restorations().await.unwrap(), vec![current]);
}

#[tokio::test]
async fn full_exhibit_info_joins_everything() {
  let s = store().await;
  let h = hall(&s, 1).await;
  let supply = s
    .create::<Supply>(NewSupply::new("P-1", date(2025, 10, 1), "Alpha"))
    .await
    .unwrap();

  let mut new = NewExhibit::new("INV-1001", "Icon");
  new.hall_id = Some(h.id);
  new.supply_id = Some(supply.id);
  let e = s.create::<Exhibit>(new).await.unwrap();

  let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
  for offset in [2, 1] {
    let mut m = NewMovement::new(e.id);
    m.moved_at = base + Duration::days(offset);
    s.create::<Movement>(m).await.unwrap();
  }
  for start in [date(2025, 6, 1), date(2024, 6, 1)] {
    s.create::<Restoration>(NewRestoration::new(e.id, start))
      .await
      .unwrap();
  }

  let info = s.full_exhibit_info(e.id).await.unwrap().unwrap();
  assert_eq!(info.exhibit, e);
  assert_eq!(info.hall, Some(h));
  assert_eq!(info.supply, Some(supply));
  assert_eq!(info.movements.len(), 2);
  assert!(info.movements[0].moved_at < info.movements[1].moved_at);
  assert_eq!(info.restorations.len(), 2);
  assert_eq!(info.restorations[0].start_date, date(2024, 6, 1));
}

#[tokio::test]
async fn full_exhibit_info_without_references() {
  let s = store().await;
  let e = exhibit(&s, "INV-1", None).await;

  let info = s.full_exhibit_info(e.id).await.unwrap().unwrap();
  assert!(info.hall.is_none());
  assert!(info.supply.is_none());
  assert!(info.movements.is_empty());
  assert!(info.restorations.is_empty());

  assert!(s.full_exhibit_info(e.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn halls_statistics_counts_exhibits_per_hall() {
  let s = store().await;
  let h1 = hall(&s, 1).await;
  let h2 = hall(&s, 2).await;
  exhibit(&s, "INV-1", Some(h1.id)).await;
  exhibit(&s, "INV-2", Some(h1.id)).await;
  exhibit(&s, "INV-3", None).await;

  let stats = s.halls_statistics().await.unwrap();
  assert_eq!(stats.len(), 2);
  assert_eq!(stats[0].hall_id, h1.id);
  assert_eq!(stats[0].hall_number, Some(1));
  assert_eq!(stats[0].exposition_name.as_deref(), Some("Hall 1"));
  assert_eq!(stats[0].hall_type, "hall");
  assert_eq!(stats[0].exhibits_count, 2);
  assert_eq!(stats[1].hall_id, h2.id);
  assert_eq!(stats[1].exhibits_count, 0);

  let total: u64 = stats.iter().map(|h| h.exhibits_count).sum();
  let with_hall = s
    .list::<Exhibit>()
    .await
    .unwrap()
    .into_iter()
    .filter(|e| e.hall_id.is_some())
    .count();
  assert_eq!(total, with_hall as u64);
}

#[tokio::test]
async fn visitors_with_tickets_pairs_resolvable_tickets() {
  let s = store().await;
  let ticket = s
    .create::<Ticket>(NewTicket::new("B5001", "adult", 500.0))
    .await
    .unwrap();

  let mut with_ticket = NewVisitor::new("Alexey", 35);
  with_ticket.ticket_id = Some(ticket.id);
  s.create::<Visitor>(with_ticket).await.unwrap();

  let mut dangling = NewVisitor::new("Maria", 12);
  dangling.ticket_id = Some(ticket.id + 50);
  s.create::<Visitor>(dangling).await.unwrap();

  s.create::<Visitor>(NewVisitor::new("Anna", 40)).await.unwrap();

  let all = s.visitors_with_tickets().await.unwrap();
  assert_eq!(all.len(), 3);
  assert_eq!(all[0].ticket.as_ref(), Some(&ticket));
  assert!(all[1].ticket.is_none());
  assert!(all[2].ticket.is_none());
}

#[tokio::test]
async fn reopening_a_file_store_keeps_records() {
  let dir = std::env::temp_dir().join(format!("museum-store-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("catalog.sqlite");
  let _ = std::fs::remove_file(&path);

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    hall(&s, 9).await.id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let h = s.get::<Hall>(id).await.unwrap().unwrap();
  assert_eq!(h.number, Some(9));
}
