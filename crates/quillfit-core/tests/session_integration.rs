//! Integration tests for sessions over a real SQLite store.

use chrono::NaiveDate;
use quillfit_core::{
    Event, PoemKind, PoemStore, SavedPoem, Session, SessionOptions, SqliteStore,
};

fn open(path: &std::path::Path) -> Session<SqliteStore> {
    let store = PoemStore::new(SqliteStore::open_at(path).unwrap());
    Session::open(store, SessionOptions::default()).unwrap()
}

#[test]
fn test_drafts_and_saves_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("quillfit.db");

    {
        let mut session = open(&db);
        session.auto_save(PoemKind::Haiku, "An old silent pond").unwrap();
        session.save_poem(PoemKind::Haiku, "An old silent pond").unwrap();
        assert_eq!(session.progress().completed, 0);
    }

    let session = open(&db);
    assert_eq!(session.editor_text(PoemKind::Haiku), "An old silent pond");
    assert_eq!(session.saved_poems().len(), 1);
    assert_eq!(session.saved_poems()[0].kind, PoemKind::Haiku);
    // Draft presence counts as completion after a reload.
    assert_eq!(session.progress().completed, 1);
}

#[test]
fn test_full_poem_countdown_then_save() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(&dir.path().join("quillfit.db"));

    session.start_poem_timer(PoemKind::Limerick);
    let mut displays = Vec::new();
    let mut completions = 0;
    while !session.is_idle() {
        for event in session.tick() {
            match event {
                Event::PoemTick { display, .. } => displays.push(display),
                Event::PoemCompleted { .. } => completions += 1,
                _ => {}
            }
        }
    }
    assert_eq!(displays.len(), 121);
    assert_eq!(displays.first().map(String::as_str), Some("2:00"));
    assert_eq!(displays.last().map(String::as_str), Some("0:00"));
    assert_eq!(completions, 1);
    assert_eq!(session.progress().label(), "Complete 1/5 poems");

    session
        .auto_save(PoemKind::Limerick, "There once was a coder")
        .unwrap();
    let saved = session.save_editor(PoemKind::Limerick).unwrap().unwrap();
    assert_eq!(saved.content, "There once was a coder");
}

#[test]
fn test_export_writes_dated_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(&dir.path().join("quillfit.db"));
    session.save_poem(PoemKind::Sonnet, "Shall I compare").unwrap();
    session.save_poem(PoemKind::Haiku, "Old pond").unwrap();

    let out = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
    let path = session.export_poems(out.path(), date).unwrap().unwrap();
    assert_eq!(path.file_name().unwrap(), "my-poems-2025-02-14.json");

    let exported: Vec<SavedPoem> =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let contents: Vec<_> = exported.iter().map(|p| p.content.as_str()).collect();
    assert_eq!(contents, vec!["Shall I compare", "Old pond"]);
}
