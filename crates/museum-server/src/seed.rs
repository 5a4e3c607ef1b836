//! Sample museum used for demos and manual testing.

use chrono::{NaiveDate, NaiveTime};
use museum_core::{
  record::{
    Employee, Exhibit, Hall, Movement, NewEmployee, NewExhibit, NewHall, NewMovement,
    NewRestoration, NewSupply, NewTicket, NewVisitor, Restoration, Supply, Ticket, Visitor,
  },
  store::CatalogStore,
};

// Evaluated at compile time, so a mistyped constant fails the build.
const fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  match NaiveDate::from_ymd_opt(y, m, d) {
    Some(date) => date,
    None => panic!("invalid sample date"),
  }
}

const fn time(h: u32, m: u32) -> NaiveTime {
  match NaiveTime::from_hms_opt(h, m, 0) {
    Some(time) => time,
    None => panic!("invalid sample time"),
  }
}

const SUPPLY_DATE: NaiveDate = date(2025, 10, 1);
const SALE_DATE: NaiveDate = date(2025, 10, 20);
const ADULT_SALE_TIME: NaiveTime = time(11, 0);
const CHILD_SALE_TIME: NaiveTime = time(12, 0);
const ICON_CREATED: NaiveDate = date(1350, 1, 1);
const LANDSCAPE_CREATED: NaiveDate = date(1885, 1, 1);
const LION_CREATED: NaiveDate = date(1750, 1, 1);
const RESTORATION_START: NaiveDate = date(2025, 5, 1);
const RESTORATION_END: NaiveDate = date(2025, 7, 1);

/// Populate `store` with the sample catalog.
///
/// Returns `false` without writing anything if the store already holds
/// exhibits.
pub async fn seed<S: CatalogStore>(store: &S) -> Result<bool, S::Error> {
  if !store.list::<Exhibit>().await?.is_empty() {
    tracing::info!("store already has exhibits; skipping sample data");
    return Ok(false);
  }

  // Staff
  let mut cashier = NewEmployee::new("Иванов Иван Иванович", "кассир", "T001");
  cashier.access_level = "staff".into();
  let mut guide = NewEmployee::new("Петров Петр Петрович", "экскурсовод", "T002");
  guide.access_level = "staff".into();
  let mut keeper = NewEmployee::new("Сидорова Анна Александровна", "хранитель фондов", "T003");
  keeper.access_level = "manager".into();

  store.create::<Employee>(cashier).await?;
  store.create::<Employee>(guide).await?;
  let keeper = store.create::<Employee>(keeper).await?;

  // Halls
  let mut ancient = NewHall::new(1, "Древние артефакты");
  ancient.hall_type = "выставочный зал".into();
  let mut painting = NewHall::new(2, "Живопись XIX века");
  painting.hall_type = "выставочный зал".into();
  let mut vault = NewHall::new(100, "Основное хранилище");
  vault.hall_type = "хранилище".into();

  let ancient = store.create::<Hall>(ancient).await?;
  let painting = store.create::<Hall>(painting).await?;
  let vault = store.create::<Hall>(vault).await?;

  // Supply
  let mut supply = NewSupply::new("P-2025-10-01", SUPPLY_DATE, "Галерея \"Альфа\"");
  supply.employee_id = Some(keeper.id);
  let supply = store.create::<Supply>(supply).await?;

  // Tickets and visitors
  let mut adult = NewTicket::new("B5001", "взрослый", 500.0);
  adult.payment_status = "оплачен".into();
  let mut child = NewTicket::new("B5002", "детский", 250.0);
  child.payment_status = "оплачен".into();
  adult.date_time = SALE_DATE.and_time(ADULT_SALE_TIME).and_utc();
  child.date_time = SALE_DATE.and_time(CHILD_SALE_TIME).and_utc();
  let adult = store.create::<Ticket>(adult).await?;
  let child = store.create::<Ticket>(child).await?;

  let mut alexey = NewVisitor::new("Алексей", 35);
  alexey.phone = Some("+7-900-111-22-33".into());
  alexey.email = Some("alexey@example.com".into());
  alexey.ticket_id = Some(adult.id);
  let mut maria = NewVisitor::new("Мария", 12);
  maria.phone = Some("+7-900-222-33-44".into());
  maria.email = Some("maria@example.com".into());
  maria.ticket_id = Some(child.id);
  store.create::<Visitor>(alexey).await?;
  store.create::<Visitor>(maria).await?;

  // Exhibits
  let icon = NewExhibit {
    description: Some("Древняя икона в резной кипарисовой раме, XIV век".into()),
    creation_date: Some(ICON_CREATED),
    author: Some("Неизвестный мастер".into()),
    condition: Some("хорошее".into()),
    storage_location: Some("витрина №1".into()),
    hall_id: Some(ancient.id),
    supply_id: Some(supply.id),
    ..NewExhibit::new("INV-1001", "Икона Владимирская Богоматерь")
  };
  let landscape = NewExhibit {
    description: Some("Масляная живопись на холсте, пейзаж".into()),
    creation_date: Some(LANDSCAPE_CREATED),
    author: Some("Архип Иванович Куинджи".into()),
    condition: Some("отличное".into()),
    storage_location: Some("стена зала №2".into()),
    hall_id: Some(painting.id),
    supply_id: Some(supply.id),
    ..NewExhibit::new("INV-1002", "Картина \"Закат над Волгой\"")
  };
  let lion = NewExhibit {
    description: Some("Резная статуэтка льва в натуральную величину".into()),
    creation_date: Some(LION_CREATED),
    author: Some("Неизвестный резчик".into()),
    condition: Some("удовлетворительное".into()),
    storage_location: Some("хранилище 100-А".into()),
    hall_id: Some(vault.id),
    supply_id: Some(supply.id),
    ..NewExhibit::new("INV-1003", "Статуэтка льва из слоновой кости")
  };
  let icon = store.create::<Exhibit>(icon).await?;
  store.create::<Exhibit>(landscape).await?;
  let lion = store.create::<Exhibit>(lion).await?;

  // One movement, one finished restoration
  let mut loan = NewMovement::new(lion.id);
  loan.from_location = Some("хранилище 100-А".into());
  loan.to_location = Some("витрина №2 основного зала".into());
  loan.responsible_employee_id = Some(keeper.id);
  loan.reason = Some("Временная выставка \"Малые скульптуры Древнего Востока\"".into());
  store.create::<Movement>(loan).await?;

  let mut restoration = NewRestoration::new(icon.id, RESTORATION_START);
  restoration.end_date = Some(RESTORATION_END);
  restoration.executor = Some("Реставратор высшей категории Петров С.С.".into());
  restoration.description = Some("Частичная реставрация лакового слоя, укрепление грунта".into());
  restoration.status = "завершено".into();
  store.create::<Restoration>(restoration).await?;

  tracing::info!(
    employees = 3,
    halls = 3,
    supplies = 1,
    tickets = 2,
    visitors = 2,
    exhibits = 3,
    movements = 1,
    restorations = 1,
    "sample data created"
  );
  Ok(true)
}
