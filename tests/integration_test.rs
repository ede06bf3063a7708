use calzadita_order::cart_actor::CartError;
use calzadita_order::contact_actor::{ContactStore, JsonFileStore, MemoryStore};
use calzadita_order::lifecycle::{OrderingConfig, OrderingSystem};
use calzadita_order::model::{ItemId, QuantityChange, SequencerState};
use calzadita_order::order_actor::SubmitOutcome;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// Full system tests: real actors, real wiring, in-memory or file store.
fn system_with(store: Arc<dyn ContactStore>) -> OrderingSystem {
    let config = OrderingConfig {
        vendor_phone: Some("524435550000".to_string()),
        ..OrderingConfig::default()
    };
    OrderingSystem::new(config, store)
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_order() {
    let system = system_with(Arc::new(MemoryStore::new()));
    let session = system.open_session().await.unwrap();

    // Two tortas (merged into one line) and a drink
    let torta = session.add_item(ItemId(1)).await.unwrap().unwrap();
    assert_eq!(session.add_item(ItemId(1)).await.unwrap(), Some(torta));
    session.add_item(ItemId(10)).await.unwrap();
    assert!(session.set_unit_note(torta, 1, "sin cebolla").await.unwrap());

    let lines = session.lines().await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].quantity(), 2);
    assert_eq!(lines[0].unit_notes(), &["".to_string(), "sin cebolla".to_string()]);
    assert_eq!(session.totals().await.unwrap(), (Decimal::from(115), 3));

    // No contact yet
    assert_eq!(session.submit().await.unwrap(), SubmitOutcome::NoContactSelected);

    let phone = session
        .add_phone(Some("Casa".to_string()), "555 123 4567")
        .await
        .unwrap();
    assert_eq!(session.selected_phone().await.unwrap().unwrap().id, phone);

    let summary = match session.submit().await.unwrap() {
        SubmitOutcome::Started { run, stages, summary } => {
            assert_eq!(run, 1);
            assert_eq!(stages, 6);
            summary
        }
        other => panic!("Expected Started, got {other:?}"),
    };
    assert_eq!(summary.total, Decimal::from(115));
    assert_eq!(summary.contact.number, "5551234567");
    assert!(summary.to_message().contains("#2: sin cebolla"));
    let link = session.whatsapp_link(&summary).unwrap();
    assert!(link.starts_with("https://wa.me/524435550000?text="));

    // At most one run
    assert_eq!(session.submit().await.unwrap(), SubmitOutcome::AlreadyRunning);

    let status = session.status().await.unwrap();
    assert_eq!(status.state, SequencerState::Running { step: 0 });
    assert_eq!(status.stage.as_deref(), Some("Pedido recibido"));

    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(
        session.status().await.unwrap().state,
        SequencerState::Running { step: 1 }
    );

    // Cart is untouched until finalization
    assert_eq!(session.totals().await.unwrap().1, 3);

    tokio::time::sleep(Duration::from_millis(8500)).await;
    let status = session.status().await.unwrap();
    assert_eq!(status.state, SequencerState::Idle);
    assert!(status.stage.is_none());
    assert!(session.lines().await.unwrap().is_empty());
    assert_eq!(session.totals().await.unwrap(), (Decimal::ZERO, 0));

    // The contact survives finalization, so a new order can go right away
    session.add_item(ItemId(5)).await.unwrap();
    match session.submit().await.unwrap() {
        SubmitOutcome::Started { run, .. } => assert_eq!(run, 2),
        other => panic!("Expected Started, got {other:?}"),
    }

    session.close().await.unwrap();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_total_of_mixed_lines() {
    let system = system_with(Arc::new(MemoryStore::new()));
    let session = system.open_session().await.unwrap();

    session.add_item(ItemId(1)).await.unwrap(); // 45
    session.add_item(ItemId(1)).await.unwrap();
    session.add_item(ItemId(12)).await.unwrap(); // 30

    assert_eq!(session.totals().await.unwrap(), (Decimal::from(120), 3));

    session.close().await.unwrap();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_menu_item_is_ignored() {
    let system = system_with(Arc::new(MemoryStore::new()));
    let session = system.open_session().await.unwrap();

    assert_eq!(session.add_item(ItemId(999)).await.unwrap(), None);
    assert!(session.lines().await.unwrap().is_empty());

    session.close().await.unwrap();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_quantity_and_note_rules_through_actors() {
    let system = system_with(Arc::new(MemoryStore::new()));
    let session = system.open_session().await.unwrap();

    let line = session.add_item(ItemId(5)).await.unwrap().unwrap();
    assert_eq!(
        session.update_quantity(line, 2).await.unwrap(),
        QuantityChange::Updated(3)
    );
    session.apply_note_to_all_units(line, "sin cilantro").await.unwrap();

    let err = session.set_unit_note(line, 3, "extra").await.unwrap_err();
    assert!(matches!(err, CartError::UnitOutOfRange { index: 3, quantity: 3, .. }));

    assert_eq!(
        session.update_quantity(line, -5).await.unwrap(),
        QuantityChange::Rejected
    );
    assert_eq!(
        session.update_quantity(line, -3).await.unwrap(),
        QuantityChange::Removed
    );
    assert_eq!(
        session.update_quantity(line, 1).await.unwrap(),
        QuantityChange::Missing
    );
    assert!(!session.remove_line(line).await.unwrap());

    session.close().await.unwrap();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_cart_is_not_submitted() {
    let system = system_with(Arc::new(MemoryStore::new()));
    let session = system.open_session().await.unwrap();
    session.add_phone(None, "5551234567").await.unwrap();

    assert_eq!(session.submit().await.unwrap(), SubmitOutcome::EmptyCart);
    assert_eq!(session.status().await.unwrap().state, SequencerState::Idle);

    session.close().await.unwrap();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_sessions_do_not_share_carts() {
    let system = system_with(Arc::new(MemoryStore::new()));
    let first = system.open_session().await.unwrap();
    let second = system.open_session().await.unwrap();

    first.add_item(ItemId(1)).await.unwrap();

    assert_ne!(first.cart, second.cart);
    assert!(second.lines().await.unwrap().is_empty());

    first.close().await.unwrap();
    second.close().await.unwrap();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_deleting_selected_phone_falls_back() {
    let system = system_with(Arc::new(MemoryStore::new()));
    let session = system.open_session().await.unwrap();

    let casa = session.add_phone(Some("Casa".into()), "5551234567").await.unwrap();
    let trabajo = session.add_phone(Some("Trabajo".into()), "4430001111").await.unwrap();
    assert_eq!(session.selected_phone().await.unwrap().unwrap().id, casa);

    assert!(session.delete_phone(casa).await.unwrap());
    assert_eq!(session.selected_phone().await.unwrap().unwrap().id, trabajo);

    assert!(session.delete_phone(trabajo).await.unwrap());
    assert!(session.selected_phone().await.unwrap().is_none());

    session.close().await.unwrap();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_contacts_survive_restart() {
    let store = Arc::new(MemoryStore::new());

    let system = system_with(store.clone());
    let session = system.open_session().await.unwrap();
    session.add_phone(Some("Casa".into()), "5551234567").await.unwrap();
    let trabajo = session.add_phone(Some("Trabajo".into()), "4430001111").await.unwrap();
    assert!(session.select_phone(trabajo).await.unwrap());
    session
        .update_phone(trabajo, Some("Oficina".into()), "443 000 2222")
        .await
        .unwrap();
    session.close().await.unwrap();
    system.shutdown().await.unwrap();

    let system = system_with(store.clone());
    let session = system.open_session().await.unwrap();
    let phones = session.phones().await.unwrap();
    assert_eq!(phones.len(), 2);
    let selected = session.selected_phone().await.unwrap().unwrap();
    assert_eq!(selected.id, trabajo);
    assert_eq!(selected.alias, "Oficina");
    assert_eq!(selected.number, "4430002222");

    session.close().await.unwrap();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_contacts_survive_restart_on_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = OrderingConfig {
        store_dir: temp_dir.path().join("calzadita"),
        ..OrderingConfig::default()
    };

    let system = OrderingSystem::with_file_store(config.clone());
    let session = system.open_session().await.unwrap();
    let id = session.add_phone(None, "(555) 123-4567").await.unwrap();
    session.close().await.unwrap();
    system.shutdown().await.unwrap();

    let loaded = JsonFileStore::new(config.store_dir.clone()).load().await;
    assert_eq!(loaded.entries.len(), 1);
    assert_eq!(loaded.selected.as_ref().map(|e| e.id), Some(id));

    let system = OrderingSystem::with_file_store(config);
    let session = system.open_session().await.unwrap();
    let selected = session.selected_phone().await.unwrap().unwrap();
    assert_eq!(selected.alias, "Teléfono 1");
    assert_eq!(selected.number, "5551234567");

    session.close().await.unwrap();
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_pending_submission() {
    let system = system_with(Arc::new(MemoryStore::new()));
    let session = system.open_session().await.unwrap();
    session.add_item(ItemId(2)).await.unwrap();
    session.add_phone(None, "5551234567").await.unwrap();
    assert!(matches!(
        session.submit().await.unwrap(),
        SubmitOutcome::Started { .. }
    ));

    let started = tokio::time::Instant::now();
    drop(session);
    system.shutdown().await.unwrap();

    // no stage dwell was waited out
    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_closing_a_session_stops_only_its_submission() {
    let system = system_with(Arc::new(MemoryStore::new()));
    let closing = system.open_session().await.unwrap();
    let staying = system.open_session().await.unwrap();
    for session in [&closing, &staying] {
        session.add_item(ItemId(3)).await.unwrap();
        session.add_phone(None, "5551234567").await.unwrap();
        assert!(matches!(
            session.submit().await.unwrap(),
            SubmitOutcome::Started { .. }
        ));
    }

    tokio::time::sleep(Duration::from_millis(500)).await;
    let closed_order = closing.order;
    closing.close().await.unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;
    let status = staying.status().await.unwrap();
    assert_eq!(status.state, SequencerState::Running { step: 1 });
    assert_ne!(staying.order, closed_order);

    tokio::time::sleep(Duration::from_millis(8500)).await;
    assert_eq!(staying.status().await.unwrap().state, SequencerState::Idle);
    assert!(staying.lines().await.unwrap().is_empty());

    staying.close().await.unwrap();
    system.shutdown().await.unwrap();
}
