mod common;

use chrono::NaiveDate;
use common::{jpeg_with_date, mp4_with_creation, names_in, png_with_date, write_file};
use photo_binner::time::exif::ExifDateReader;
use photo_binner::time::video::ContainerDateReader;
use photo_binner::{BatchRunner, DateExtractor, FileStatus, MediaTypes, UNSPECIFIED_BUCKET};
use std::fs;
use tempfile::tempdir;

fn offline_extractor() -> DateExtractor {
    DateExtractor::with_readers(
        MediaTypes::default(),
        ExifDateReader,
        ContainerDateReader::native_only(),
    )
}

#[test]
fn bins_images_and_videos_by_year() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "p1.jpg", &jpeg_with_date("1998:05:04 10:11:12"));
    write_file(root, "p2.mp4", b"");
    write_file(root, "p3.png", &png_with_date("1998-12-24 18:00:00"));

    let report = BatchRunner::new(root, offline_extractor()).run().unwrap();

    assert_eq!(report.count("1998"), 2);
    assert_eq!(report.count(UNSPECIFIED_BUCKET), 1);
    assert_eq!(report.total_moved(), 3);
    assert_eq!(report.failed_count(), 0);

    assert_eq!(names_in(&root.join("1998")), ["p1.jpg", "p3.png"]);
    assert_eq!(names_in(&root.join(UNSPECIFIED_BUCKET)), ["p2.mp4"]);
    assert_eq!(names_in(root), ["1998", UNSPECIFIED_BUCKET]);
}

#[test]
fn reads_video_year_from_movie_header() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let epoch = NaiveDate::from_ymd_opt(1904, 1, 1).unwrap();
    let captured = NaiveDate::from_ymd_opt(2004, 8, 15).unwrap();
    let seconds = (captured - epoch).num_seconds() as u32;
    write_file(root, "clip.mov", &mp4_with_creation(seconds));

    let report = BatchRunner::new(root, offline_extractor()).run().unwrap();

    assert_eq!(report.count("2004"), 1);
    assert!(root.join("2004/clip.mov").exists());
}

#[test]
fn skips_unsupported_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "notes.txt", b"not media");
    write_file(root, "a.jpg", b"no exif here");

    let report = BatchRunner::new(root, offline_extractor()).run().unwrap();

    assert_eq!(report.results().len(), 1);
    assert!(root.join("notes.txt").exists());
    assert!(root.join(UNSPECIFIED_BUCKET).join("a.jpg").exists());
}

#[test]
fn numbers_colliding_names() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let bucket = root.join("1998");
    fs::create_dir(&bucket).unwrap();
    write_file(&bucket, "p1.jpg", b"already here");
    write_file(&bucket, "p1-1.jpg", b"also here");
    write_file(root, "p1.jpg", &jpeg_with_date("1998:01:01 00:00:00"));

    let report = BatchRunner::new(root, offline_extractor()).run().unwrap();

    let result = &report.results()[0];
    assert_eq!(result.status, FileStatus::Moved);
    assert_eq!(result.destination.as_deref(), Some(bucket.join("p1-2.jpg").as_path()));
    assert_eq!(fs::read(bucket.join("p1.jpg")).unwrap(), b"already here");
}

#[test]
fn dry_run_leaves_files_in_place() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(root, "p1.jpg", &jpeg_with_date("1998:05:04 10:11:12"));

    let report = BatchRunner::new(root, offline_extractor())
        .dry_run(true)
        .run()
        .unwrap();

    assert!(report.is_dry_run());
    assert_eq!(report.results()[0].status, FileStatus::DryRun);
    assert_eq!(
        report.results()[0].destination.as_deref(),
        Some(root.join("1998/p1.jpg").as_path())
    );
    assert_eq!(names_in(root), ["p1.jpg"]);
}

#[test]
fn failed_move_is_reported_and_run_continues() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    // A plain file where the bucket directory should be
    write_file(root, "1998", b"in the way");
    write_file(root, "a.jpg", &jpeg_with_date("1998:05:04 10:11:12"));
    write_file(root, "b.jpg", b"no exif");

    let report = BatchRunner::new(root, offline_extractor()).run().unwrap();

    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.count(UNSPECIFIED_BUCKET), 1);
    assert!(root.join("a.jpg").exists());
    let failure = report.failures().next().unwrap();
    assert!(failure.error.is_some());
}
