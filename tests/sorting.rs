mod common;

use common::{names_in, write_file};
use photo_binner::config::{load_mappings, save_mappings};
use photo_binner::session::{LastAction, SessionState};
use photo_binner::{
    BackOutcome, ClassifyOutcome, KeyBucketMap, KeyCoverage, MediaTypes, SortSession,
};
use std::fs;
use tempfile::tempdir;

fn nineties() -> KeyBucketMap {
    KeyBucketMap::from_pairs([('1', "1990s")]).unwrap()
}

#[test]
fn classify_then_undo_restores_queue() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "a.jpg", b"a");
    write_file(root, "b.jpg", b"b");
    write_file(root, "c.mp4", b"video");

    let mut session = SortSession::scan(root, &MediaTypes::default()).unwrap();
    assert_eq!(session.len(), 2);
    assert_eq!(session.state(), SessionState::Ready { index: 0, remaining: 2 });

    let outcome = session.classify('1', &nineties()).unwrap();
    assert!(matches!(outcome, ClassifyOutcome::Moved { ref bucket, .. } if bucket == "1990s"));
    assert_eq!(names_in(&root.join("1990s")), ["a.jpg"]);
    assert_eq!(session.current().unwrap().file_name(), "b.jpg");

    let back = session.undo().unwrap();
    assert_eq!(back, BackOutcome::Undone { restored: root.join("a.jpg") });
    assert_eq!(session.len(), 2);
    assert_eq!(session.index(), 0);
    assert_eq!(session.current().unwrap().file_name(), "a.jpg");
    assert!(names_in(&root.join("1990s")).is_empty());
    assert_eq!(*session.last_action(), LastAction::None);
}

#[test]
fn second_undo_steps_back_without_moving() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "a.jpg", b"a");
    write_file(root, "b.jpg", b"b");
    write_file(root, "c.jpg", b"c");

    let mut session = SortSession::scan(root, &MediaTypes::default()).unwrap();
    session.next();
    session.classify('1', &nineties()).unwrap();
    assert_eq!(session.index(), 1);

    assert!(matches!(session.undo().unwrap(), BackOutcome::Undone { .. }));
    assert_eq!(session.index(), 1);

    let before = names_in(root);
    assert_eq!(session.undo().unwrap(), BackOutcome::Previous);
    assert_eq!(session.index(), 0);
    assert_eq!(names_in(root), before);

    assert_eq!(session.undo().unwrap(), BackOutcome::AtStart);
}

#[test]
fn sorting_the_last_image_exhausts_the_session() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "only.jpg", b"x");

    let mut session = SortSession::scan(root, &MediaTypes::default()).unwrap();
    session.classify('1', &nineties()).unwrap();

    assert_eq!(session.state(), SessionState::Exhausted);
    assert!(session.current().is_none());
    assert_eq!(
        session.classify('1', &nineties()).unwrap(),
        ClassifyOutcome::Ignored
    );
}

#[test]
fn mappings_survive_a_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Config").join("photo-binner.toml");

    save_mappings(&path, &KeyBucketMap::with_defaults()).unwrap();
    let loaded = load_mappings(&path, KeyCoverage::AllDigits).unwrap();
    assert_eq!(loaded, KeyBucketMap::with_defaults());

    fs::write(&path, "[Mappings]\n1 = \"1990s\"\n").unwrap();
    assert!(load_mappings(&path, KeyCoverage::AllDigits).is_err());
    assert_eq!(load_mappings(&path, KeyCoverage::Partial).unwrap(), nineties());
}
