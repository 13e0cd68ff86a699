//! Contract tests for `translate` and `translate_all`.
//!
//! These tests pin down the loop's behaviour against the in-memory fakes:
//! ordering, passthrough, where a failing record stops the batch, and how
//! each stage's error reaches the caller.

use std::error::Error as _;

use hardware_translate::fakes::{EndlessReader, FakeError, RecordingWriter, RejectAt, Rejected, VecReader};
use hardware_translate::{
    translate, translate_all, AcceptAll, DefaultMachineValidator, Machine, Step, TranslateError,
    ValidationError,
};

fn machine(n: u64) -> Machine {
    let mut m = Machine {
        hostname: format!("node-{n}"),
        ip_address: format!("10.0.0.{n}"),
        netmask: "255.255.255.0".to_string(),
        gateway: "10.0.0.254".to_string(),
        nameservers: vec!["10.0.0.253".to_string()],
        mac: format!("00:00:00:00:00:{n:02x}"),
        disk: "/dev/sda".to_string(),
        ..Machine::default()
    };
    m.labels.insert("position".to_string(), n.to_string());
    m
}

fn machines(count: u64) -> Vec<Machine> {
    (1..=count).map(machine).collect()
}

// ===========================================================================
// Successful batches
// ===========================================================================

#[test]
fn all_machines_written_in_order_and_unmodified() {
    let input = machines(5);
    let mut reader = VecReader::new(input.clone());
    let mut writer = RecordingWriter::new();

    let summary = translate_all(&mut reader, &mut writer, AcceptAll).unwrap();

    assert_eq!(summary.translated, 5);
    assert_eq!(writer.written(), input.as_slice());
    assert_eq!(writer.attempts(), 5);
    // Five machines plus the read that reported exhaustion.
    assert_eq!(reader.reads(), 6);
}

#[test]
fn immediately_exhausted_reader_is_success_with_no_writes() {
    let mut reader = VecReader::new(vec![]);
    let mut writer = RecordingWriter::new();

    let summary = translate_all(&mut reader, &mut writer, AcceptAll).unwrap();

    assert_eq!(summary.translated, 0);
    assert_eq!(writer.attempts(), 0);
    assert_eq!(reader.reads(), 1);
}

#[test]
fn default_validator_accepts_well_formed_batch() {
    let mut writer = RecordingWriter::new();

    let summary = translate_all(
        VecReader::new(machines(20)),
        &mut writer,
        DefaultMachineValidator::default(),
    )
    .unwrap();

    assert_eq!(summary.translated, 20);
}

// ===========================================================================
// Validation failures
// ===========================================================================

#[test]
fn validation_failure_at_k_is_returned_verbatim() {
    let mut reader = VecReader::new(machines(6));
    let mut writer = RecordingWriter::new();
    let validator = RejectAt::new(3);

    let err = translate_all(&mut reader, &mut writer, &validator).unwrap_err();

    match err {
        TranslateError::Validation(rejected) => assert_eq!(
            rejected,
            Rejected {
                position: 3,
                hostname: "node-3".to_string(),
            }
        ),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(writer.written(), &machines(2)[..]);
    // Records after the rejected one are never read.
    assert_eq!(reader.reads(), 3);
    assert_eq!(validator.seen(), 3);
}

#[test]
fn validation_error_display_is_not_wrapped() {
    let err = translate_all(VecReader::new(machines(1)), RecordingWriter::new(), RejectAt::new(1))
        .unwrap_err();

    assert_eq!(err.to_string(), "machine node-1 rejected at position 1");
    assert_eq!(err.stage(), "validate");
}

#[test]
fn duplicate_machine_stops_batch_with_typed_error() {
    let mut input = machines(3);
    input.push(machine(2));
    let mut writer = RecordingWriter::new();

    let err = translate_all(
        VecReader::new(input),
        &mut writer,
        DefaultMachineValidator::default(),
    )
    .unwrap_err();

    assert_eq!(
        err.into_validation(),
        Some(ValidationError::Duplicate {
            hostname: "node-2".to_string(),
            field: "hostname",
            value: "node-2".to_string(),
        })
    );
    assert_eq!(writer.written().len(), 3);
}

// ===========================================================================
// Write failures
// ===========================================================================

#[test]
fn write_failure_at_k_is_wrapped() {
    let mut reader = VecReader::new(machines(5));
    let mut writer = RecordingWriter::new().failing_at(4, "disk full");

    let err = translate_all(&mut reader, &mut writer, AcceptAll).unwrap_err();

    assert!(matches!(err, TranslateError::Write(_)));
    assert_eq!(err.to_string(), "write: disk full");
    let cause = err.source().unwrap().downcast_ref::<FakeError>().unwrap();
    assert_eq!(cause, &FakeError::new("disk full"));

    assert_eq!(writer.written(), &machines(3)[..]);
    assert_eq!(reader.reads(), 4);
}

// ===========================================================================
// Read failures
// ===========================================================================

#[test]
fn read_failure_on_first_call_is_wrapped_with_no_writes() {
    let mut writer = RecordingWriter::new();
    let reader = VecReader::new(machines(3)).failing_at(1, "connection reset");

    let err = translate_all(reader, &mut writer, AcceptAll).unwrap_err();

    assert!(matches!(err, TranslateError::Read(_)));
    assert_eq!(err.to_string(), "read: invalid hardware: connection reset");
    assert!(err.source().unwrap().is::<FakeError>());
    assert_eq!(writer.attempts(), 0);
}

#[test]
fn read_failure_mid_batch_keeps_earlier_writes() {
    let mut writer = RecordingWriter::new();
    let reader = VecReader::new(machines(5)).failing_at(3, "truncated input");

    let err = translate_all(reader, &mut writer, AcceptAll).unwrap_err();

    assert_eq!(err.stage(), "read");
    assert_eq!(writer.written(), &machines(2)[..]);
}

// ===========================================================================
// Single step
// ===========================================================================

#[test]
fn step_sequence_ends_in_exhausted() {
    let mut reader = VecReader::new(machines(2));
    let mut writer = RecordingWriter::new();

    assert_eq!(translate(&mut reader, &mut writer, &AcceptAll).unwrap(), Step::Translated);
    assert_eq!(translate(&mut reader, &mut writer, &AcceptAll).unwrap(), Step::Translated);
    assert_eq!(translate(&mut reader, &mut writer, &AcceptAll).unwrap(), Step::Exhausted);
    assert_eq!(writer.written().len(), 2);
}

// ===========================================================================
// Non-terminating readers
// ===========================================================================

#[test]
fn endless_reader_keeps_batch_running() {
    const BOUND: u64 = 10_000;
    let mut reader = EndlessReader::new(machine(1)).fail_after(BOUND);
    let mut writer = RecordingWriter::new();

    let err = translate_all(&mut reader, &mut writer, AcceptAll).unwrap_err();

    // The loop never stopped on its own: it only ended when the harness
    // reader failed after BOUND machines.
    assert_eq!(err.stage(), "read");
    assert_eq!(reader.reads(), BOUND);
    assert_eq!(writer.written().len() as u64, BOUND);
    assert_eq!(writer.written()[9].hostname, "node-1-10");
}
