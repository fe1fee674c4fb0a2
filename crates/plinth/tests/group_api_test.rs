//! Integration tests for the error accumulation API
//!
//! These tests exercise the public surface the way an application would:
//! a catalog of shared error identities, accumulation across an
//! operation, and cause-walking over the result.

use std::error::Error as StdError;
use std::sync::LazyLock;
use std::time::Duration;

use plinth::error::{RetryExtras, join};
use plinth::{BoxError, Error, ErrorFlags, ErrorGroup};

static ERR_DECODE: LazyLock<Error> = LazyLock::new(|| {
    Error::new("ingest", "decode_failed", "payload could not be decoded")
});

static ERR_UPSTREAM: LazyLock<Error> = LazyLock::new(|| {
    Error::new("ingest", "upstream_unavailable", "upstream did not respond")
        .with_flag(ErrorFlags::RETRYABLE | ErrorFlags::TIMEOUT)
        .with_retry(RetryExtras::new(Duration::from_secs(5)))
});

fn process(record: &str) -> Result<(), Error> {
    match record {
        "bad-payload" => Err(ERR_DECODE.clone().wrap_msg(format!("record {record:?}"))),
        "no-upstream" => Err(ERR_UPSTREAM.clone()),
        _ => Ok(()),
    }
}

#[test]
fn test_accumulate_and_finish() {
    let mut group = ErrorGroup::new();
    for record in ["ok", "bad-payload", "ok", "no-upstream"] {
        if let Err(err) = process(record) {
            group.append(err);
        }
    }

    let err = group.finish().expect_err("two records failed");
    assert_eq!(err.len(), 2);
    assert!(ERR_DECODE.is(&err.errors()[0]));
    assert!(ERR_UPSTREAM.is(&err.errors()[1]));
}

#[test]
fn test_clean_run_finishes_ok() {
    let mut group = ErrorGroup::new();
    for record in ["ok", "also-ok"] {
        if let Err(err) = process(record) {
            group.append(err);
        }
    }

    assert!(group.finish().is_ok());
}

#[test]
fn test_cause_walk_over_accumulated_errors() {
    let mut group = ErrorGroup::new();
    group.append(ERR_DECODE.clone());
    group.append(ERR_UPSTREAM.clone());

    // Walk the chain with the standard source() protocol.
    let cause = group.cause().expect("group is not empty");
    let mut rendered = vec![cause.to_string()];
    let mut source: Option<&(dyn StdError + 'static)> = cause.source();
    while let Some(err) = source {
        rendered.push(err.to_string());
        source = err.source();
    }

    assert_eq!(
        rendered,
        [ERR_DECODE.to_string(), ERR_UPSTREAM.to_string()]
    );
}

#[test]
fn test_join_accumulates_incrementally() {
    let first: BoxError = Box::new(ERR_DECODE.clone());
    let group = join(first, [Box::new(ERR_UPSTREAM.clone()) as BoxError]);

    // Joining onto an existing group reuses it.
    let group = join(
        Box::new(group),
        [Box::new(std::io::Error::other("disk unplugged")) as BoxError],
    );

    assert_eq!(group.len(), 3);
    assert_eq!(group.errors()[2].code(), "undefined");
}

#[test]
fn test_detailed_rendering_of_wrapped_error() {
    let err = ERR_DECODE
        .clone()
        .wrap(ERR_UPSTREAM.clone().wrap_msg("GET /feed timed out"));

    let detailed = format!("{err:#}");
    assert!(detailed.contains("* [ingest:decode_failed]"));
    assert!(detailed.contains("* [ingest:upstream_unavailable]"));
}
