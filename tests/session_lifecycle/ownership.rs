//! Ownership Tests
//!
//! A working directory is archived by exactly one session value:
//! - Native moves carry the session along
//! - `take` leaves an inert source behind
//! - Dropping an open session closes it
//! - Overwriting a session drops (and closes) the old one

use crate::*;
use std::thread;

// =============================================================================
// MOVES
// =============================================================================

#[test]
fn test_native_move_closes_once() {
    let fx = Fixture::new();
    let session = fx.open();
    fx.write("a.txt", b"a");

    let mut moved = session;
    let report = moved.close().unwrap();

    assert!(report.performed);
    assert_eq!(fx.archive().len(), 1);
    assert!(!fx.working_dir.exists());
}

#[test]
fn test_move_into_thread() {
    let fx = Fixture::new();
    let session = fx.open();
    fx.write("rewards.txt", b"0.5\n");

    let report = thread::spawn(move || {
        let mut session = session;
        session.close().unwrap()
    })
    .join()
    .unwrap();

    assert!(report.is_complete());
    assert_eq!(fx.archive()["rewards.txt"], b"0.5\n");
}

#[test]
fn test_take_source_drop_has_no_effect() {
    let fx = Fixture::new();
    let mut source = fx.open();
    fx.write("a.txt", b"a");

    let mut target = source.take();
    let before = fx.snapshot();
    drop(source);

    assert_eq!(fx.snapshot(), before);
    assert!(fx.working_dir.is_dir());
    assert!(!fx.destination.exists());

    let report = target.close().unwrap();
    assert!(report.performed);
    assert_eq!(fx.archive()["a.txt"], b"a");
}

#[test]
fn test_take_source_close_is_noop() {
    let fx = Fixture::new();
    let mut source = fx.open();
    fx.write("a.txt", b"a");

    let target = source.take();
    let report = source.close().unwrap();

    assert!(!report.performed);
    assert!(!source.is_recording());
    assert!(fx.working_dir.is_dir());
    assert_eq!(target.working_dir(), fx.working_dir);
}

#[test]
fn test_take_carries_closed_flag() {
    let fx = Fixture::new();
    let mut source = fx.open();
    fx.write("a.txt", b"a");
    source.close().unwrap();
    let archived = fs::read(&fx.destination).unwrap();

    let mut target = source.take();

    assert!(target.is_closed());
    assert!(!target.close().unwrap().performed);
    drop(target);
    assert_eq!(fs::read(&fx.destination).unwrap(), archived);
}

#[test]
fn test_chain_of_takes() {
    let fx = Fixture::new();
    let mut first = fx.open();
    fx.write("a.txt", b"a");

    let mut second = first.take();
    let third = second.take();
    drop(first);
    drop(second);
    assert!(!fx.destination.exists());

    drop(third);
    assert_eq!(fx.archive().len(), 1);
    assert!(!fx.working_dir.exists());
}

// =============================================================================
// IMPLICIT CLOSE
// =============================================================================

#[test]
fn test_drop_closes_open_session() {
    let fx = Fixture::new();
    {
        let _session = fx.open();
        fx.write("commands.txt", b"turn 0.5\n");
    }

    assert_eq!(fx.archive()["commands.txt"], b"turn 0.5\n");
    assert!(!fx.working_dir.exists());
}

#[test]
fn test_drop_after_close_does_nothing() {
    let fx = Fixture::new();
    let mut session = fx.open();
    fx.write("a.txt", b"a");
    session.close().unwrap();
    let before = fx.snapshot();

    drop(session);

    assert_eq!(fx.snapshot(), before);
}

#[test]
fn test_reassignment_closes_previous_session() {
    let fx_a = Fixture::new();
    let fx_b = Fixture::new();
    let mut a = fx_a.open();
    let mut b = fx_b.open();
    fx_a.write("a.txt", b"from a");
    fx_b.write("b.txt", b"from b");

    a = b.take();

    // the old `a` was dropped by the assignment
    assert_eq!(fx_a.archive()["a.txt"], b"from a");
    assert!(!fx_a.working_dir.exists());

    assert!(!b.is_recording());
    assert_eq!(a.working_dir(), fx_b.working_dir);
    assert!(!fx_b.destination.exists());

    drop(b);
    assert!(!fx_b.destination.exists());

    drop(a);
    assert_eq!(fx_b.archive()["b.txt"], b"from b");
}
