use caixa_tulsi::core::entry::{EntryLogic, LineItem, NewSubEvent};
use caixa_tulsi::core::range::{DateRange, parse_day};
use caixa_tulsi::core::settings::SettingsLogic;
use caixa_tulsi::core::user::UserLogic;
use caixa_tulsi::db::{JsonFileStorage, SqliteStorage, Storage};
use caixa_tulsi::errors::AppError;
use caixa_tulsi::models::period::{EventLocation, FaturadoCategory};
use caixa_tulsi::models::period_id::PeriodId;
use caixa_tulsi::models::user::Role;
use rust_decimal::Decimal;
use serde_json::json;

mod common;
use common::setup_json_store;

/// Same behaviour is expected from every backend.
fn exercise(store: &mut dyn Storage) {
    let day = parse_day("2024-07-15").unwrap();

    EntryLogic::set_channel(
        store,
        day,
        PeriodId::AlmocoPrimeiroTurno,
        None,
        "hospedes",
        10,
        Some(Decimal::from(250)),
        "ana",
    )
    .unwrap();
    let first = store.get_entry(day).unwrap().unwrap();

    // a second save of another period must not drop the first one
    EntryLogic::save_patch(
        store,
        day,
        &json!({ "jantar": { "channels": { "pix": { "quantity": 2, "totalValue": 80 } } },
                 "generalObservations": "chuva" }),
        "ana",
    )
    .unwrap();
    EntryLogic::add_faturado(
        store,
        day,
        PeriodId::Jantar,
        Some("varanda"),
        &LineItem {
            client_name: " Diretoria ".into(),
            quantity: 1,
            value: Decimal::from(60),
            note: String::new(),
            category: FaturadoCategory::Hotel,
        },
        "ana",
    )
    .unwrap();

    let saved = store.get_entry(day).unwrap().unwrap();
    assert_eq!(saved.id, "2024-07-15");
    assert_eq!(saved.general_observations, "chuva");
    assert_eq!(saved.created_at, first.created_at);
    assert!(saved.has_period(PeriodId::AlmocoPrimeiroTurno));
    let jantar = saved.period(PeriodId::Jantar);
    assert_eq!(jantar.channels["pix"].quantity, 2);
    assert_eq!(jantar.sub_tabs["varanda"].faturado_items[0].client_name, "Diretoria");

    let totals = EntryLogic::totals(store, day).unwrap().unwrap();
    assert_eq!(totals.grand_total_sem_ci.valor, Decimal::from(390));
    assert!(EntryLogic::totals(store, parse_day("2024-07-16").unwrap()).unwrap().is_none());

    for (name, service, location) in [
        ("Casamento", "jantar", EventLocation::OnSite),
        (" Casamento", "coffee", EventLocation::OffSite),
    ] {
        EntryLogic::add_event(
            store,
            day,
            &NewSubEvent {
                event_name: name.into(),
                location,
                service_type: service.into(),
                quantity: 10,
                value: Decimal::from(100),
            },
            "ana",
        )
        .unwrap();
    }
    let eventos = store.get_entry(day).unwrap().unwrap().eventos();
    assert_eq!(eventos.items.len(), 1);
    assert_eq!(eventos.items[0].sub_events.len(), 2);

    EntryLogic::set_channel(
        store,
        parse_day("2024-08-01").unwrap(),
        PeriodId::Jantar,
        None,
        "pix",
        1,
        Some(Decimal::from(40)),
        "ana",
    )
    .unwrap();
    let july = store
        .get_all_entries(Some(&DateRange::month("2024-07").unwrap()))
        .unwrap();
    assert_eq!(july.len(), 1);
    assert_eq!(store.get_all_entries(None).unwrap().len(), 2);

    // settings
    SettingsLogic::set(store, "channelUnitPrices", &json!({ "avulsos": 35 }), "admin").unwrap();
    assert!(matches!(
        SettingsLogic::set(store, "faturadoClients", &json!("Diretoria"), "admin"),
        Err(AppError::InvalidInput(_))
    ));
    assert_eq!(
        SettingsLogic::get(store, "channelUnitPrices").unwrap(),
        json!({ "avulsos": 35 })
    );
    assert!(matches!(
        SettingsLogic::get(store, "appName"),
        Err(AppError::NotFound(_))
    ));

    // value from the configured unit price
    let priced = EntryLogic::set_channel(
        store,
        day,
        PeriodId::AlmocoSegundoTurno,
        None,
        "avulsos",
        4,
        None,
        "ana",
    )
    .unwrap();
    assert_eq!(
        priced.period(PeriodId::AlmocoSegundoTurno).channels["avulsos"].total_value,
        Decimal::from(140)
    );
    assert!(
        EntryLogic::set_channel(store, day, PeriodId::Jantar, None, "cortesia", 1, None, "ana")
            .is_err()
    );

    // users
    UserLogic::save(store, "maria", Role::Operator, &["jantar".into()], &[], "admin").unwrap();
    let again = UserLogic::save(
        store,
        "maria",
        Role::Operator,
        &["almoco".into(), "almoco".into()],
        &[],
        "admin",
    )
    .unwrap();
    assert_eq!(again.shifts, vec!["almoco".to_string()]);
    assert!(UserLogic::save(store, "chefe", Role::Administrator, &["jantar".into()], &[], "admin").is_err());
    assert_eq!(UserLogic::list(store).unwrap().len(), 1);
    UserLogic::delete(store, "maria", "admin").unwrap();
    assert!(matches!(
        UserLogic::delete(store, "maria", "admin"),
        Err(AppError::NotFound(_))
    ));

    // audit trail, newest first
    let audit = store.list_audit(Some(2)).unwrap();
    assert_eq!(audit.len(), 2);
    assert_eq!(audit[0].action, "user_del");
    assert!(audit[0].id > audit[1].id);
    assert!(
        store
            .list_audit(None)
            .unwrap()
            .iter()
            .any(|r| r.action == "entry_channel" && r.username == "ana")
    );
}

#[test]
fn test_sqlite_storage() {
    let mut store = SqliteStorage::in_memory().unwrap();
    exercise(&mut store);

    let stats = store.stats().unwrap();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.users, 0);
    assert_eq!(stats.migrations.len(), 2);
    assert_eq!(store.integrity_check().unwrap(), "ok");
}

#[test]
fn test_json_file_storage_persists_across_reopen() {
    let path = setup_json_store("storage_roundtrip");

    {
        let mut store = JsonFileStorage::open(&path).unwrap();
        assert!(store.get_all_entries(None).unwrap().is_empty());
        exercise(&mut store);
        assert!(store.path().exists());
    }

    let reopened = JsonFileStorage::open(&path).unwrap();
    assert_eq!(reopened.get_all_entries(None).unwrap().len(), 2);
    assert_eq!(
        reopened.get_setting("channelUnitPrices").unwrap(),
        Some(json!({ "avulsos": 35 }))
    );
    assert!(!reopened.list_audit(None).unwrap().is_empty());
}

#[test]
fn test_json_file_storage_rejects_garbage() {
    let path = setup_json_store("storage_garbage");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        JsonFileStorage::open(&path),
        Err(AppError::StorageUnavailable(_))
    ));
}

#[test]
fn test_json_file_storage_skips_unreadable_entries() {
    let path = setup_json_store("storage_bad_entry");
    std::fs::write(
        &path,
        r#"{ "entries": {
            "2024-07-15": 5,
            "2024-07-16": { "almocoPrimeiroTurno": { "channels": { "hospedes": { "quantity": 5, "totalValue": 125 } } } }
        } }"#,
    )
    .unwrap();

    let mut store = JsonFileStorage::open(&path).unwrap();
    let entries = store.get_all_entries(None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "2024-07-16");

    let bad_day = parse_day("2024-07-15").unwrap();
    assert!(store.get_entry(bad_day).unwrap().is_none());
    assert!(matches!(
        EntryLogic::save_patch(&mut store, bad_day, &json!({ "generalObservations": "x" }), "ana"),
        Err(AppError::StorageUnavailable(_))
    ));

    EntryLogic::save_patch(
        &mut store,
        parse_day("2024-07-16").unwrap(),
        &json!({ "generalObservations": "ok" }),
        "ana",
    )
    .unwrap();
    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["entries"]["2024-07-15"], json!(5));
    assert_eq!(on_disk["entries"]["2024-07-16"]["generalObservations"], "ok");
}

#[test]
fn test_unknown_patch_keys_are_rejected() {
    let mut store = SqliteStorage::in_memory().unwrap();
    let day = parse_day("2024-07-15").unwrap();

    let err = EntryLogic::save_patch(&mut store, day, &json!({ "lanche": {} }), "ana").unwrap_err();
    assert!(err.is_client_error());
    assert!(store.get_entry(day).unwrap().is_none());
}

#[test]
fn test_patch_period_keys_are_stored_canonically() {
    let mut store = SqliteStorage::in_memory().unwrap();
    let day = parse_day("2024-07-15").unwrap();

    EntryLogic::save_patch(
        &mut store,
        day,
        &json!({ "Jantar": { "channels": { "pix": { "quantity": 4, "totalValue": 100 } } } }),
        "ana",
    )
    .unwrap();

    let saved = store.get_entry(day).unwrap().unwrap();
    assert!(saved.periods.contains_key("jantar"));
    assert!(!saved.periods.contains_key("Jantar"));

    let totals = EntryLogic::totals(&store, day).unwrap().unwrap();
    assert_eq!(totals.jantar.total.qtd, 4);
    assert_eq!(totals.grand_total_sem_ci.valor, Decimal::from(100));
}
