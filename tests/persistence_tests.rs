//! Persistence behavior over the file backend: seeding, reopening, corrupt
//! documents, and counter continuity across process lifetimes.

use chrono::NaiveDate;
use dompet::clock::FixedClock;
use dompet::config::{StorePolicy, Theme};
use dompet::ledger::{
    CategoryInput, CategoryKind, LedgerStore, TransactionFilter, TransactionInput,
    TransactionKind, WalletInput, WalletKind,
};
use dompet::storage::{JsonFileBackend, StorageBackend, StorageKey};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn backend_in(dir: &TempDir) -> JsonFileBackend {
    JsonFileBackend::new(Some(dir.path().to_path_buf())).expect("file backend")
}

fn open_empty(dir: &TempDir) -> LedgerStore<JsonFileBackend> {
    LedgerStore::open_empty_with(
        backend_in(dir),
        FixedClock::on(today()),
        StorePolicy::default(),
    )
    .expect("open store")
}

#[test]
fn first_open_seeds_and_reopen_reads_the_same_data() {
    let dir = TempDir::new().unwrap();
    let first = LedgerStore::open_with(
        backend_in(&dir),
        FixedClock::on(today()),
        StorePolicy::default(),
    )
    .expect("seeded open");
    let names: Vec<String> = first
        .wallets()
        .iter()
        .map(|wallet| wallet.name.clone())
        .collect();
    assert_eq!(names.len(), 3);
    drop(first);

    // A second open must read persisted state, not re-seed.
    let second = open_empty(&dir);
    let reopened: Vec<String> = second
        .wallets()
        .iter()
        .map(|wallet| wallet.name.clone())
        .collect();
    assert_eq!(reopened, names);
    assert_eq!(second.categories().len(), 10);
    assert_eq!(second.transactions(&TransactionFilter::default()).len(), 6);
}

#[test]
fn mutations_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir);
    let wallet = store
        .create_wallet(WalletInput::new("Cash", WalletKind::Cash, 1_000.0))
        .unwrap();
    let food = store
        .add_category(CategoryInput::new("Food", CategoryKind::Expense, "#dc3545"))
        .unwrap();
    store
        .create_transaction(TransactionInput::new(
            "Groceries",
            250.0,
            TransactionKind::Expense,
            food.id,
            wallet.id,
            today(),
        ))
        .unwrap();
    drop(store);

    let store = open_empty(&dir);
    assert_eq!(store.wallet(wallet.id).unwrap().balance, 750.0);
    let rows = store.transactions(&TransactionFilter::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Groceries");
    assert_eq!(rows[0].notes, None);
}

#[test]
fn counters_survive_reopen_so_ids_are_not_reused() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir);
    let first = store
        .create_wallet(WalletInput::new("Cash", WalletKind::Cash, 0.0))
        .unwrap();
    store.delete_wallet(first.id).unwrap();
    drop(store);

    let mut store = open_empty(&dir);
    let second = store
        .create_wallet(WalletInput::new("Bank", WalletKind::Bank, 0.0))
        .unwrap();
    assert_eq!(second.id, first.id + 1);
}

#[test]
fn corrupt_collection_falls_back_to_empty_without_touching_others() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir);
    let wallet = store
        .create_wallet(WalletInput::new("Cash", WalletKind::Cash, 1_000.0))
        .unwrap();
    let food = store
        .add_category(CategoryInput::new("Food", CategoryKind::Expense, "#dc3545"))
        .unwrap();
    store
        .create_transaction(TransactionInput::new(
            "Groceries",
            250.0,
            TransactionKind::Expense,
            food.id,
            wallet.id,
            today(),
        ))
        .unwrap();
    drop(store);

    let mut backend = backend_in(&dir);
    backend
        .commit(&[(StorageKey::Transactions, "{not json".into())])
        .unwrap();

    let store = open_empty(&dir);
    assert!(store.transactions(&TransactionFilter::default()).is_empty());
    assert_eq!(store.wallets().len(), 1);
    assert_eq!(store.categories().len(), 1);
}

#[test]
fn corrupt_counter_is_rebuilt_from_record_ids() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir);
    store
        .create_wallet(WalletInput::new("Cash", WalletKind::Cash, 0.0))
        .unwrap();
    store
        .create_wallet(WalletInput::new("Bank", WalletKind::Bank, 0.0))
        .unwrap();
    drop(store);

    let mut backend = backend_in(&dir);
    backend
        .commit(&[(StorageKey::LastWalletId, "\"oops\"".into())])
        .unwrap();

    let mut store = open_empty(&dir);
    let next = store
        .create_wallet(WalletInput::new("Savings", WalletKind::Savings, 0.0))
        .unwrap();
    assert_eq!(next.id, 3);
}

#[test]
fn theme_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir);
    assert_eq!(store.theme(), Theme::Light);
    store.set_theme(Theme::Dark).unwrap();
    drop(store);

    let store = open_empty(&dir);
    assert_eq!(store.theme(), Theme::Dark);
}

#[test]
fn stored_documents_use_the_original_key_layout() {
    let dir = TempDir::new().unwrap();
    let mut store = open_empty(&dir);
    store
        .create_wallet(WalletInput::new("Cash", WalletKind::Cash, 0.0))
        .unwrap();
    drop(store);

    for file in ["wallets.json", "lastWalletId.json", "theme.json"] {
        assert!(dir.path().join(file).exists(), "missing {file}");
    }
    let raw = std::fs::read_to_string(dir.path().join("wallets.json")).unwrap();
    assert!(raw.contains("\"type\":\"cash\""), "raw: {raw}");
    assert!(raw.contains("\"createdAt\""), "raw: {raw}");
}
