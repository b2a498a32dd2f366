//! Lifecycle Tests
//!
//! Normal open -> populate -> close flows:
//! - Round trip of nested files
//! - Close is idempotent
//! - Empty working directory produces no archive
//! - Codec selection

use crate::*;

// =============================================================================
// ROUND TRIP
// =============================================================================

#[test]
fn test_round_trip_nested_files() {
    let fx = Fixture::new();
    let mut session = fx.open();
    assert!(fx.working_dir.is_dir());

    fx.write("a.txt", b"alpha");
    fx.write("sub/b.txt", b"beta");

    let report = session.close().unwrap();

    assert!(report.performed);
    assert!(report.is_complete());
    assert_eq!(report.files_found, 2);
    assert_eq!(report.entries_written, 2);
    assert!(report.working_dir_removed);
    assert!(matches!(report.delivery, Delivery::Written { .. }));
    assert!(session.is_closed());

    let archive = fx.archive();
    assert_eq!(
        archive.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["a.txt", "sub/b.txt"]
    );
    assert_eq!(archive["a.txt"], b"alpha");
    assert_eq!(archive["sub/b.txt"], b"beta");
    assert!(!fx.working_dir.exists());
}

#[test]
fn test_round_trip_session_artifacts() {
    let fx = Fixture::new();
    let spec = RecordingSpec::builder(&fx.destination)
        .working_dir(&fx.working_dir)
        .record_mp4(20, 400_000)
        .record_observations()
        .record_rewards()
        .record_commands()
        .build();
    let mut session = RecordingSession::open(spec).unwrap();

    fs::write(session.mp4_path(), [0u8, 0, 0, 0x18, b'f', b't', b'y', b'p']).unwrap();
    fs::write(session.observations_path(), "{\"x\": 1}\n").unwrap();
    fs::write(session.rewards_path(), "0:1.5\n").unwrap();
    fs::write(session.commands_path(), "move 1\n").unwrap();
    fs::write(session.mission_init_path(), "<MissionInit/>").unwrap();

    session.close().unwrap();

    let archive = fx.archive();
    assert_eq!(
        archive.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "commands.txt",
            "missionInit.xml",
            "observations.txt",
            "rewards.txt",
            "video.mp4"
        ]
    );
    assert_eq!(archive["missionInit.xml"], b"<MissionInit/>");
}

#[test]
fn test_destination_is_gzip_by_default() {
    let fx = Fixture::new();
    let mut session = fx.open();
    fx.write("a.txt", b"a");

    session.close().unwrap();

    let raw = fs::read(&fx.destination).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b]);
}

#[test]
fn test_zstd_codec() {
    let fx = Fixture::new();
    let destination = fx.dir.path().join("mission.tar.zst");
    let spec = RecordingSpec::builder(&destination)
        .working_dir(&fx.working_dir)
        .codec(Codec::Zstd)
        .compression_level(3)
        .build();
    let mut session = RecordingSession::open(spec).unwrap();
    fx.write("rewards.txt", b"1.0\n");

    session.close().unwrap();

    let raw = fs::read(&destination).unwrap();
    assert_eq!(Codec::detect(&raw), Some(Codec::Zstd));
    let archive = ArchiveReader::read_all(&destination).unwrap();
    assert_eq!(archive["rewards.txt"], b"1.0\n");
}

#[test]
fn test_existing_destination_is_overwritten() {
    let fx = Fixture::new();
    fs::write(&fx.destination, b"an older recording").unwrap();
    let mut session = fx.open();
    fx.write("new.txt", b"new");

    session.close().unwrap();

    let archive = fx.archive();
    assert_eq!(archive.len(), 1);
    assert_eq!(archive["new.txt"], b"new");
}

// =============================================================================
// IDEMPOTENCE
// =============================================================================

#[test]
fn test_close_twice_matches_close_once() {
    let fx = Fixture::new();
    let mut session = fx.open();
    fx.write("a.txt", b"a");

    let first = session.close().unwrap();
    let after_first = fx.snapshot();
    let archive_first = fs::read(&fx.destination).unwrap();

    let second = session.close().unwrap();

    assert!(first.performed);
    assert!(!second.performed);
    assert_eq!(second, CloseReport::default());
    assert_eq!(fx.snapshot(), after_first);
    assert_eq!(fs::read(&fx.destination).unwrap(), archive_first);
    assert!(session.is_closed());
}

#[test]
fn test_close_after_directory_recreated_is_noop() {
    let fx = Fixture::new();
    let mut session = fx.open();
    fx.write("a.txt", b"a");
    session.close().unwrap();

    // a later producer reusing the path must not trigger a second archive
    fx.write("late.txt", b"late");
    let report = session.close().unwrap();

    assert!(!report.performed);
    assert!(fx.working_dir.join("late.txt").exists());
    assert!(!fx.archive().contains_key("late.txt"));
}

// =============================================================================
// EMPTY WORKING DIRECTORY
// =============================================================================

#[test]
fn test_empty_working_directory() {
    let fx = Fixture::new();
    let mut session = fx.open();

    let report = session.close().unwrap();

    assert!(report.performed);
    assert_eq!(report.files_found, 0);
    assert_eq!(report.delivery, Delivery::NotAttempted);
    assert!(report.working_dir_removed);
    assert!(!fx.working_dir.exists());
    assert!(!fx.destination.exists());
}

#[test]
fn test_only_empty_subdirectories() {
    let fx = Fixture::new();
    let mut session = fx.open();
    fs::create_dir_all(fx.working_dir.join("frames/left")).unwrap();

    let report = session.close().unwrap();

    assert_eq!(report.files_found, 0);
    assert!(!fx.destination.exists());
    assert!(!fx.working_dir.exists());
}

#[test]
fn test_empty_directory_leaves_existing_destination_alone() {
    let fx = Fixture::new();
    fs::write(&fx.destination, b"keep me").unwrap();
    let mut session = fx.open();

    session.close().unwrap();

    assert_eq!(fs::read(&fx.destination).unwrap(), b"keep me");
}
