use chrono::{NaiveDate, NaiveDateTime};
use localnotes_core::db::open_db_in_memory;
use localnotes_core::{NoteRepository, NoteStore, SqliteNoteRepository};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .unwrap()
        .and_hms_opt(hour, 30, 0)
        .unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

#[test]
fn notes_on_same_date_are_counted_together() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&mut conn);
    repo.create_note("one", at(3, 8)).unwrap();
    repo.create_note("two", at(3, 12)).unwrap();
    repo.create_note("three", at(3, 23)).unwrap();

    let counts = repo.counts_by_date(30).unwrap();
    assert_eq!(counts.created.get(&date(3)), Some(&3));
    assert_eq!(counts.created.len(), 1);
    assert!(counts.deleted.is_empty());
}

#[test]
fn dates_without_activity_are_absent() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&mut conn);
    repo.create_note("early", at(1, 9)).unwrap();
    repo.create_note("late", at(4, 9)).unwrap();

    let counts = repo.counts_by_date(30).unwrap();
    assert_eq!(
        counts.created.keys().copied().collect::<Vec<_>>(),
        vec![date(1), date(4)]
    );
    assert!(!counts.created.contains_key(&date(2)));
    assert_eq!(counts.created_on(date(2)), 0);
}

#[test]
fn deleted_counts_bucket_by_deletion_date() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&mut conn);
    let first = repo.create_note("first", at(1, 9)).unwrap();
    let second = repo.create_note("second", at(1, 10)).unwrap();
    repo.create_note("kept", at(2, 10)).unwrap();
    repo.soft_delete_note(first, at(5, 9)).unwrap();
    repo.soft_delete_note(second, at(5, 18)).unwrap();

    let counts = repo.counts_by_date(30).unwrap();
    assert_eq!(counts.deleted.len(), 1);
    assert_eq!(counts.deleted.get(&date(5)), Some(&2));
    assert_eq!(counts.created.get(&date(1)), Some(&2));
    assert_eq!(counts.created.get(&date(2)), Some(&1));
}

#[test]
fn window_keeps_most_recent_distinct_dates() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&mut conn);
    for day in 1..=6 {
        let id = repo.create_note("daily", at(day, 9)).unwrap();
        repo.soft_delete_note(id, at(day + 10, 9)).unwrap();
    }

    let counts = repo.counts_by_date(3).unwrap();
    assert_eq!(
        counts.created.keys().copied().collect::<Vec<_>>(),
        vec![date(4), date(5), date(6)]
    );
    assert_eq!(
        counts.deleted.keys().copied().collect::<Vec<_>>(),
        vec![date(14), date(15), date(16)]
    );

    let empty = repo.counts_by_date(0).unwrap();
    assert!(empty.created.is_empty());
    assert!(empty.deleted.is_empty());
}

#[test]
fn series_expands_store_counts_for_chart() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&mut conn);
    repo.create_note("a", at(10, 9)).unwrap();
    repo.create_note("b", at(12, 9)).unwrap();

    let series = repo.counts_by_date(30).unwrap().series(date(12), 3);
    assert_eq!(
        series.iter().map(|point| point.created).collect::<Vec<_>>(),
        vec![1, 0, 1]
    );
    assert_eq!(series[0].axis_label(), "06-10");
}

#[test]
fn store_counts_todays_additions() {
    let store = NoteStore::open_in_memory().unwrap();
    store.add("one").unwrap();
    store.add("two").unwrap();
    store.add("three").unwrap();

    let counts = store.counts_by_date(30).unwrap();
    assert_eq!(counts.created.values().sum::<u32>(), 3);
    assert!(counts.created.values().all(|count| *count > 0));
}
