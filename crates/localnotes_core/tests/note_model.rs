use localnotes_core::service::export::export_file_name;
use localnotes_core::{export_note, ExportError, ListQuery, Note, NoteStore, SortOrder};

#[test]
fn list_query_defaults_to_active_newest_first() {
    let query = ListQuery::default();

    assert!(!query.include_deleted);
    assert_eq!(query.order, SortOrder::Desc);
    assert_eq!(query.keyword, None);
}

#[test]
fn note_serialization_uses_expected_wire_fields() {
    let store = NoteStore::open_in_memory().unwrap();
    let id = store.add("wire shape").unwrap();
    let note = store.get(id).unwrap().unwrap();

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["id"], id);
    assert_eq!(json["text"], "wire shape");
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
    assert!(json["deleted_at"].is_null());

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn sort_order_serializes_snake_case() {
    assert_eq!(serde_json::to_value(SortOrder::Asc).unwrap(), "asc");
    assert_eq!(serde_json::to_value(SortOrder::Desc).unwrap(), "desc");
}

#[test]
fn export_writes_raw_text_to_named_file() {
    let store = NoteStore::open_in_memory().unwrap();
    let id = store.add("line one\nстрока два\n").unwrap();
    let note = store.get(id).unwrap().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let path = export_note(&note, dir.path()).unwrap();

    assert_eq!(path, dir.path().join(format!("note_{id}.txt")));
    assert_eq!(export_file_name(&note), format!("note_{id}.txt"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), note.text);
}

#[test]
fn export_overwrites_previous_export() {
    let store = NoteStore::open_in_memory().unwrap();
    let id = store.add("v1").unwrap();
    let dir = tempfile::tempdir().unwrap();
    export_note(&store.get(id).unwrap().unwrap(), dir.path()).unwrap();

    store.update(id, "v2").unwrap();
    let path = export_note(&store.get(id).unwrap().unwrap(), dir.path()).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "v2");
}

#[test]
fn export_into_missing_directory_fails() {
    let store = NoteStore::open_in_memory().unwrap();
    let id = store.add("orphan").unwrap();
    let note = store.get(id).unwrap().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let err = export_note(&note, dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, ExportError::NotADirectory(_)));
}
