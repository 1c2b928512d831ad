mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{date, open_tracker, setup_test_env};
use finance_tracker::{
    domain::{TransactionDraft, TransactionKind},
    storage::{JsonStorage, CATEGORIES_KEY, COUNTERS_KEY, TRANSACTIONS_KEY},
};

fn record_file(data_dir: &Path, key: &str) -> PathBuf {
    JsonStorage::new(data_dir).unwrap().record_path(key)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn ledger_survives_a_reload() {
    let today = date(2024, 1, 15);
    let (mut tracker, data_dir) = setup_test_env(today);
    let category = tracker
        .add_category("Books", TransactionKind::Expense, "#123456")
        .unwrap();
    tracker
        .add_transaction(
            TransactionDraft::expense(19.99, date(2024, 1, 11))
                .with_description("Novel")
                .with_category(category.id),
        )
        .unwrap();

    let reloaded = open_tracker(&data_dir, today);
    assert_eq!(reloaded.ledger(), tracker.ledger());
    assert!(reloaded.load_warnings().is_empty());
}

#[test]
fn ids_are_not_reused_after_deleting_the_newest_record() {
    let today = date(2024, 1, 15);
    let (mut tracker, data_dir) = setup_test_env(today);
    tracker
        .add_transaction(TransactionDraft::income(1.0, today))
        .unwrap();
    let newest = tracker
        .add_transaction(TransactionDraft::income(2.0, today))
        .unwrap();
    tracker.delete_transaction(newest.id).unwrap();
    let category = tracker
        .add_category("Temp", TransactionKind::Income, "#000000")
        .unwrap();
    tracker.delete_category(category.id).unwrap();

    let mut reloaded = open_tracker(&data_dir, today);
    let next = reloaded
        .add_transaction(TransactionDraft::income(3.0, today))
        .unwrap();
    assert_eq!(next.id, newest.id + 1);
    let next_category = reloaded
        .add_category("Again", TransactionKind::Income, "#000000")
        .unwrap();
    assert_eq!(next_category.id, category.id + 1);
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let today = date(2024, 1, 15);
    let (mut tracker, data_dir) = setup_test_env(today);
    tracker
        .add_transaction(TransactionDraft::income(42.0, today))
        .unwrap();
    let path = record_file(&data_dir, TRANSACTIONS_KEY);
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory at the temp file location makes File::create fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();

    let err = tracker
        .add_transaction(TransactionDraft::expense(7.0, today))
        .expect_err("write should fail");
    assert!(err.is_persistence());
    assert_eq!(tracker.transactions().len(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);

    let reloaded = open_tracker(&data_dir, today);
    assert_eq!(reloaded.transactions().len(), 1);
}

#[test]
fn records_saved_by_the_browser_app_load_unchanged() {
    let today = date(2024, 1, 15);
    let (_, data_dir) = setup_test_env(today);
    fs::write(
        record_file(&data_dir, TRANSACTIONS_KEY),
        r#"[{"id":7,"type":"expense","amount":45.5,"description":"Groceries","categoryId":4,"date":"2024-01-10","notes":"","createdAt":"2024-01-10T09:15:00.000Z"},
            {"id":3,"type":"income","amount":1000,"description":"Paycheck","categoryId":null,"date":"2024-01-05","notes":"January","createdAt":"2024-01-05T08:00:00.000Z"}]"#,
    )
    .unwrap();
    fs::write(
        record_file(&data_dir, CATEGORIES_KEY),
        r##"[{"id":4,"name":"Food","type":"expense","color":"#dc3545"}]"##,
    )
    .unwrap();
    fs::write(
        record_file(&data_dir, COUNTERS_KEY),
        r#"{"nextTransactionId":8,"nextCategoryId":9}"#,
    )
    .unwrap();

    let mut tracker = open_tracker(&data_dir, today);
    assert!(tracker.load_warnings().is_empty());
    assert_eq!(tracker.categories().len(), 1);
    assert_eq!(tracker.transactions()[0].category_id, Some(4));
    assert_eq!(tracker.transactions()[1].category_id, None);
    assert_eq!(tracker.balance().balance, 954.5);
    assert_eq!(tracker.expense_breakdown()[0].category_name, "Food");

    let added = tracker
        .add_transaction(TransactionDraft::expense(1.0, today))
        .unwrap();
    assert_eq!(added.id, 8);
    let saved = fs::read_to_string(record_file(&data_dir, TRANSACTIONS_KEY)).unwrap();
    assert!(saved.contains("\"categoryId\":4"));
    assert!(saved.contains("\"type\":\"expense\""));
}

#[test]
fn lagging_counters_are_raised_past_existing_ids() {
    let today = date(2024, 1, 15);
    let (_, data_dir) = setup_test_env(today);
    fs::write(
        record_file(&data_dir, TRANSACTIONS_KEY),
        r#"[{"id":12,"type":"income","amount":5,"date":"2024-01-02"}]"#,
    )
    .unwrap();
    fs::write(
        record_file(&data_dir, COUNTERS_KEY),
        r#"{"nextTransactionId":2,"nextCategoryId":9}"#,
    )
    .unwrap();

    let mut tracker = open_tracker(&data_dir, today);
    assert!(!tracker.load_warnings().is_empty());
    let added = tracker
        .add_transaction(TransactionDraft::income(1.0, today))
        .unwrap();
    assert_eq!(added.id, 13);
}

#[test]
fn unreadable_and_null_amount_records_survive_later_saves() {
    let today = date(2024, 1, 15);
    let (_, data_dir) = setup_test_env(today);
    fs::write(
        record_file(&data_dir, TRANSACTIONS_KEY),
        r#"[{"id":1,"type":"expense","amount":null,"description":"Broken","date":"2024-01-03","notes":"keep me"},
            {"id":2,"type":"refund","amount":3,"date":"2024-01-04","notes":"odd one"}]"#,
    )
    .unwrap();

    let mut tracker = open_tracker(&data_dir, today);
    assert_eq!(tracker.transactions().len(), 1);
    assert_eq!(tracker.balance().expenses, 0.0);
    let added = tracker
        .add_transaction(TransactionDraft::income(10.0, today))
        .unwrap();
    assert_eq!(added.id, 3);

    let raw = fs::read_to_string(record_file(&data_dir, TRANSACTIONS_KEY)).unwrap();
    assert!(raw.contains("keep me"));
    assert!(raw.contains("odd one"));

    let reloaded = open_tracker(&data_dir, today);
    assert_eq!(reloaded.transactions().len(), 2);
    assert_eq!(reloaded.ledger().unreadable.transactions.len(), 1);
}

#[test]
fn failed_counter_write_never_leads_to_id_reuse() {
    let today = date(2024, 1, 15);
    let (mut tracker, data_dir) = setup_test_env(today);
    tracker
        .add_transaction(TransactionDraft::income(1.0, today))
        .unwrap();
    let counters_path = record_file(&data_dir, COUNTERS_KEY);
    let blocker = tmp_path_for(&counters_path);
    fs::create_dir_all(&blocker).unwrap();

    let err = tracker
        .add_transaction(TransactionDraft::income(2.0, today))
        .expect_err("counter write should fail");
    assert!(err.is_persistence());
    let stored = fs::read_to_string(record_file(&data_dir, TRANSACTIONS_KEY)).unwrap();
    assert!(!stored.contains("\"id\":2"));

    fs::remove_dir(&blocker).unwrap();
    assert!(tracker.delete_transaction(2).unwrap().is_some());

    let mut reloaded = open_tracker(&data_dir, today);
    let next = reloaded
        .add_transaction(TransactionDraft::income(3.0, today))
        .unwrap();
    assert_eq!(next.id, 3);
}
