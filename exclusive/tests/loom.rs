//! Model checked tests, run with:
//!
//! ```sh
//! RUSTFLAGS="--cfg loom" cargo test -p exclusive --test loom --release
//! ```

#![cfg(loom)]

use exclusive::{acquire_pair_mut, BorrowState, Exclusive};
use loom::sync::Arc;
use loom::thread;

#[test]
fn reader_and_writer_never_overlap() {
    loom::model(|| {
        let cell = Arc::new(Exclusive::new(0u32));

        let writer = {
            let cell = cell.clone();

            thread::spawn(move || {
                let mut guard = cell.borrow_mut();
                *guard += 1;
                *guard += 1;
            })
        };

        let value = *cell.borrow();
        assert!(value == 0 || value == 2, "observed torn write: {}", value);

        writer.join().unwrap();
        assert_eq!(cell.borrow_state(), BorrowState::Free);
    });
}

#[test]
fn pairs_in_opposite_orders() {
    loom::model(|| {
        let a = Arc::new(Exclusive::new(0u32));
        let b = Arc::new(Exclusive::new(0u32));

        let other = {
            let (a, b) = (a.clone(), b.clone());

            thread::spawn(move || {
                let (mut a, mut b) = acquire_pair_mut(&*a, &*b).unwrap();
                *a += 1;
                *b += 1;
            })
        };

        {
            let (mut b, mut a) = acquire_pair_mut(&*b, &*a).unwrap();
            *a += 1;
            *b += 1;
        }

        other.join().unwrap();

        assert_eq!(*a.borrow(), 2);
        assert_eq!(*b.borrow(), 2);
    });
}
