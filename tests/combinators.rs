use anyhow::Context;
use outcome::{Fatal, Outcome, Panicked};
use std::{cell::Cell, hint::black_box, io, num::ParseIntError, panic};
use tools::TestCaseBuilder;


#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("division by zero")]
struct DivisionByZero;

#[derive(Debug, thiserror::Error)]
#[error("config is missing")]
struct MissingConfig(#[source] io::Error);

#[derive(Debug, thiserror::Error)]
#[error("cache warmup failed")]
struct Warmup(#[source] io::Error);

fn divide(dividend: i64, divisor: i64) -> Result<i64, DivisionByZero> {
    dividend.checked_div(divisor).ok_or(DivisionByZero)
}

#[test]
fn test_of() -> anyhow::Result<()> {
    TestCaseBuilder::new(|| Ok::<_, anyhow::Error>(7))
        .name("value")
        .result(7)
        .run()?;

    TestCaseBuilder::new(|| "abc".parse::<u32>())
        .name("parse error")
        .cause("invalid digit found in string")
        .run()?;

    TestCaseBuilder::new(|| divide(10, 0))
        .name("typed error")
        .cause("division by zero")
        .run()?;

    let outcome = TestCaseBuilder::new(|| Ok::<_, anyhow::Error>(10 / black_box(0)))
        .name("panic")
        .cause("computation panicked: attempt to divide by zero")
        .run()?;
    assert!(outcome.cause().unwrap().is::<Panicked>());

    Ok(())
}

#[test]
fn test_get() {
    assert_eq!(Outcome::of(|| divide(9, 3)).get().unwrap(), 3);

    let err = Outcome::of(|| divide(9, 0)).get().unwrap_err();
    assert_eq!(err.to_string(), "outcome failed: division by zero");
    assert!(err.cause().is::<DivisionByZero>());
}

#[test]
fn test_fatal_escapes_evaluation() {
    tools::init_logger();

    let raised = panic::catch_unwind(|| Outcome::of(|| Err::<u8, _>(Fatal::Interrupted)));
    let payload = raised.unwrap_err();
    let error = payload.downcast_ref::<anyhow::Error>().unwrap();
    assert_eq!(error.downcast_ref::<Fatal>(), Some(&Fatal::Interrupted));

    let raised = panic::catch_unwind(|| {
        Outcome::of(|| {
            Err::<u8, _>(io::Error::from(io::ErrorKind::OutOfMemory)).context("allocating buffer")
        })
    });
    assert!(raised.is_err());

    let raised = panic::catch_unwind(|| {
        Outcome::of(|| -> anyhow::Result<u8> { panic::panic_any(Fatal::Corrupted("heap".into())) })
    });
    let payload = raised.unwrap_err();
    assert_eq!(payload.downcast_ref::<Fatal>(), Some(&Fatal::Corrupted("heap".into())));
}

#[test]
fn test_wrapped_fatal_source_stays_recoverable() {
    let raised = panic::catch_unwind(|| {
        Outcome::<u8>::of(|| Err(Warmup(io::ErrorKind::OutOfMemory.into())))
    });

    let outcome = raised.expect("domain error around a fatal source is recoverable");
    assert!(outcome.cause().unwrap().is::<Warmup>());
}

#[test]
fn test_fatal_escapes_combinators() {
    let raised = panic::catch_unwind(|| {
        Outcome::success(1).map(|_| -> u8 { panic::panic_any(Fatal::Interrupted) })
    });
    let payload = raised.unwrap_err();
    assert_eq!(payload.downcast_ref::<Fatal>(), Some(&Fatal::Interrupted));

    let raised = panic::catch_unwind(|| {
        Outcome::success(1)
            .flat_map(|_| Outcome::<u8>::of(|| Err::<u8, _>(Fatal::Linkage("libm".into()))))
    });
    assert!(raised.is_err());

    let raised = panic::catch_unwind(|| {
        Outcome::success(1).and_then(|_| Err::<(), _>(Fatal::Exhausted("threads".into())))
    });
    assert!(raised.is_err());

    let raised = panic::catch_unwind(|| {
        Outcome::of(|| divide(1, 0))
            .recover::<DivisionByZero, _>(|_| panic::panic_any(Fatal::Interrupted))
    });
    assert!(raised.is_err());
}

#[test]
fn test_map() -> anyhow::Result<()> {
    let doubled = Outcome::of(|| Ok::<_, anyhow::Error>(7)).map(|x| x * 2);
    assert_eq!(doubled.get()?, 14);

    let calls = Cell::new(0);
    let failed = Outcome::of(|| divide(1, 0)).map(|x| {
        calls.set(calls.get() + 1);
        x * 2
    });
    assert_eq!(calls.get(), 0);
    assert!(failed.cause().unwrap().is::<DivisionByZero>());

    let failed = Outcome::success(Vec::<u8>::new()).map(|v| v[0]);
    assert_eq!(
        failed.cause().unwrap().to_string(),
        "computation panicked: index out of bounds: the len is 0 but the index is 0"
    );

    Ok(())
}

#[test]
fn test_flat_map() {
    let chained = Outcome::of(|| "84".parse::<i64>()).flat_map(|x| Outcome::of(|| divide(x, 2)));
    assert_eq!(chained.ok(), Some(42));

    let chained = Outcome::of(|| "84".parse::<i64>()).flat_map(|x| Outcome::of(|| divide(x, 0)));
    assert!(chained.cause().unwrap().is::<DivisionByZero>());

    let chained = Outcome::of(|| "x".parse::<i64>()).flat_map(|x| Outcome::of(|| divide(x, 2)));
    assert!(chained.cause().unwrap().is::<ParseIntError>());

    let chained = Outcome::success(1).flat_map(|_| -> Outcome<u8> { panic!("before returning") });
    assert_eq!(
        chained.cause().unwrap().to_string(),
        "computation panicked: before returning"
    );
}

#[test]
fn test_and_then_chain_keeps_value() {
    let mut outcome = Outcome::success(String::from("kept"));
    for _ in 0..5 {
        outcome = outcome.and_then(|_| ());
    }

    assert_eq!(outcome.ok().as_deref(), Some("kept"));
}

#[test]
fn test_side_effect_panics_surface() {
    let raised = panic::catch_unwind(|| {
        Outcome::<u8>::failure(DivisionByZero).on_failure(|cause| panic!("{}", cause))
    });
    assert!(raised.is_err());

    let raised = panic::catch_unwind(|| {
        Outcome::<u8>::failure(DivisionByZero).on_success(|_| panic!("never runs"))
    });
    assert!(raised.is_ok());
}

#[test]
fn test_recover() {
    let recovered = Outcome::of(|| divide(10, 0)).recover::<DivisionByZero, _>(|_| 0);
    assert_eq!(recovered.get_or_else(-1), 0);

    let recovered = Outcome::of(|| Ok::<_, anyhow::Error>(10 / black_box(0)))
        .recover::<Panicked, _>(|_| 0)
        .get_or_else(-1);
    assert_eq!(recovered, 0);

    let untouched = Outcome::of(|| divide(10, 0)).recover::<ParseIntError, _>(|_| 0);
    assert!(untouched.cause().unwrap().is::<DivisionByZero>());

    let untouched = Outcome::of(|| divide(10, 5)).recover::<DivisionByZero, _>(|_| 0);
    assert_eq!(untouched.ok(), Some(2));

    let refailed =
        Outcome::of(|| divide(10, 0)).recover::<DivisionByZero, _>(|e| panic!("still {}", e));
    assert_eq!(
        refailed.cause().unwrap().to_string(),
        "computation panicked: still division by zero"
    );
}

#[test]
fn test_recover_wrapped_cause() {
    let outcome = Outcome::of(|| divide(10, 0).context("computing ratio"));
    assert_eq!(outcome.cause().map(|c| c.to_string()).as_deref(), Some("computing ratio"));

    let recovered = outcome.recover::<DivisionByZero, _>(|_| 1);
    assert_eq!(recovered.ok(), Some(1));
}

#[test]
fn test_recover_matches_cause_not_its_source() {
    let untouched = Outcome::<i32>::of(|| Err(MissingConfig(io::ErrorKind::NotFound.into())))
        .recover::<io::Error, _>(|_| 7);
    assert!(untouched.cause().unwrap().is::<MissingConfig>());

    let recovered = Outcome::<i32>::of(|| Err(MissingConfig(io::ErrorKind::NotFound.into())))
        .recover_when(|cause| cause.chain().any(|e| e.is::<io::Error>()), |_| 7);
    assert_eq!(recovered.ok(), Some(7));
}

#[test]
fn test_fallbacks() {
    let primary = Outcome::of(|| divide(1, 0));
    let fallback = Outcome::of(|| divide(8, 4));

    assert_eq!(primary.or_else(fallback).get_or_else(-1), 2);
    assert_eq!(Outcome::of(|| divide(6, 3)).or_else(Outcome::success(0)).get_or_else(-1), 2);
}
