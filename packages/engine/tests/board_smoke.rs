use gravity_board_engine::Board;

const T0: f64 = 1_700_000_000_000.0;

#[test]
fn board_smoke_add_delete_clear() {
    let mut board = Board::new();
    board.set_layout(1024.0, 768.0).unwrap();

    let milk = board.add_task_at("Buy milk", T0).unwrap();
    let report = board.add_task_at("Write report", T0 + 1.0).unwrap();
    assert_ne!(milk, report);
    assert_eq!(board.card_count(), 2);

    let cards: serde_json::Value = serde_json::from_str(&board.cards_json()).unwrap();
    for card in cards.as_array().unwrap() {
        let tag = card["colorTag"].as_str().unwrap();
        assert!(["A", "B", "C"].contains(&tag), "unexpected tag {tag}");
    }

    assert!(board.delete_task_at(&milk, T0 + 10.0));
    assert_eq!(board.advance_to(T0 + 1010.0), 1);
    assert_eq!(board.card_count(), 1);
    let cards: serde_json::Value = serde_json::from_str(&board.cards_json()).unwrap();
    assert_eq!(cards[0]["title"], "Write report");

    assert!(board.clear_board_at(true, T0 + 2000.0));
    assert_eq!(board.advance_to(T0 + 3000.0), 1);
    assert_eq!(board.card_count(), 0);
    assert!(!board.wants_frames());
}

#[test]
fn board_smoke_frames_publish_positions() {
    let mut board = Board::new();
    board.set_layout(800.0, 600.0).unwrap();
    let id = board.add_task_at("Apple", T0).unwrap();

    assert!(!board.physics_active());
    assert!(board.toggle_physics());
    for _ in 0..10 {
        board.step();
    }

    let frame: serde_json::Value = serde_json::from_str(&board.sync_frame_json()).unwrap();
    assert_eq!(frame["frame"], 1);
    let pose = &frame["positions"][id.as_str()];
    assert!(pose["x"].is_number());
    assert!(pose["y"].is_number());
    assert!(pose["rotation"].is_number());

    let chrome: serde_json::Value = serde_json::from_str(&board.chrome_json()).unwrap();
    assert_eq!(chrome["physicsLabel"], "Physics Active");

    board.dispose();
    assert_eq!(board.card_count(), 1);
}
