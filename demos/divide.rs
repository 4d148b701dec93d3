use anyhow::Context;
use log::info;
use outcome::{Outcome, Panicked};

#[derive(Debug, thiserror::Error)]
#[error("cannot divide {0} by zero")]
struct DivisionByZero(i64);

fn divide(dividend: i64, divisor: i64) -> Result<i64, DivisionByZero> {
    dividend.checked_div(divisor).ok_or(DivisionByZero(dividend))
}

// RUST_LOG=debug cargo run --example divide -- 10 0
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let dividend: i64 = args.next().as_deref().unwrap_or("10").parse().context("invalid dividend")?;
    let divisor: i64 = args.next().as_deref().unwrap_or("0").parse().context("invalid divisor")?;

    let typed = Outcome::of(|| divide(dividend, divisor))
        .on_failure(|cause| info!("typed division failed: {}", cause))
        .recover::<DivisionByZero, _>(|_| 0)
        .map(|quotient| quotient * 2);
    println!("{}", typed);

    let panicking = Outcome::of(|| Ok::<_, anyhow::Error>(dividend / divisor))
        .recover::<Panicked, _>(|panicked| {
            info!("recovered from panic: {}", panicked.message());
            0
        })
        .get_or_else(-1);
    println!("{}", panicking);

    match Outcome::of(|| divide(dividend, divisor)).get() {
        Ok(quotient) => println!("{}", quotient),
        Err(e) => println!("{}", e),
    }

    Ok(())
}
