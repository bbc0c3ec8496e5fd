//! Two threads race to transfer 600 from account A to account B, both of
//! which start out with 1000. Only one of them can succeed.
//!
//! Run with `RUST_LOG=debug` to see threads waiting on each other.

use anyhow::Result;
use exclusive::Builder;
use ledger::Account;
use std::thread;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let a = Builder::new().name("A").build(Account::new("A", 1000));
    let b = Builder::new().name("B").build(Account::new("B", 1000));

    thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                if let Err(error) = ledger::transfer_between(&a, &b, 600) {
                    eprintln!("transfer failed: {}", error);
                }
            });
        }
    });

    let (a, b) = (a.borrow(), b.borrow());
    println!("A: {}", a.balance());
    println!("B: {}", b.balance());
    Ok(())
}
