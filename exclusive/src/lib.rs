//! [![Documentation](https://docs.rs/exclusive/badge.svg)](https://docs.rs/exclusive)
//! [![Crates](https://img.shields.io/crates/v/exclusive.svg)](https://crates.io/crates/exclusive)
//!
//! Borrow checking at runtime, across threads.
//!
//! An [Exclusive] owns a value which can either be borrowed by any number of
//! readers through [borrow], or by a single writer through [borrow_mut]. Where
//! a [RefCell] would fail a borrow which conflicts with an outstanding one,
//! an [Exclusive] instead parks the current thread until the conflicting
//! borrow has been released.
//!
//! ```rust
//! use std::thread;
//! use exclusive::Exclusive;
//!
//! let counter = Exclusive::new(0);
//!
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for _ in 0..100 {
//!                 *counter.borrow_mut() += 1;
//!             }
//!         });
//!     }
//! });
//!
//! assert_eq!(*counter.borrow(), 400);
//! ```
//!
//! # Borrowing many cells at once
//!
//! Taking exclusive borrows of two cells one after the other is a classic
//! way to deadlock. If one thread borrows `a` then `b`, while another thread
//! borrows `b` then `a`, each can end up holding the cell the other one is
//! waiting for.
//!
//! [acquire_all_mut] and [acquire_pair_mut] avoid this by locking cells in an
//! order which is the same for every caller, regardless of the order in which
//! the cells were passed in. The order is based on the [CellId] assigned to
//! every cell when it's constructed.
//!
//! ```rust
//! use std::thread;
//! use exclusive::Exclusive;
//!
//! let a = Exclusive::new(1000u32);
//! let b = Exclusive::new(1000u32);
//!
//! thread::scope(|s| {
//!     s.spawn(|| {
//!         let (mut from, mut to) = exclusive::acquire_pair_mut(&a, &b)?;
//!         *from -= 600;
//!         *to += 600;
//!         Ok::<_, exclusive::Error>(())
//!     });
//!
//!     s.spawn(|| {
//!         let (mut from, mut to) = exclusive::acquire_pair_mut(&b, &a)?;
//!         *from -= 600;
//!         *to += 600;
//!         Ok::<_, exclusive::Error>(())
//!     });
//! });
//!
//! assert_eq!(*a.borrow(), 1000);
//! assert_eq!(*b.borrow(), 1000);
//! ```
//!
//! # Releasing borrows
//!
//! Borrows are released when their guard is dropped, so they are released on
//! every path out of a scope including early returns through `?` and
//! panics. Guards can also be released explicitly through [Ref::release],
//! [RefMut::release] or [GuardGroup::release], which report if the cell did
//! not consider the borrow to be outstanding.
//!
//! # Fairness
//!
//! None. When a borrow is released every parked thread is woken up and
//! whichever of them gets to the cell first wins. A steady stream of readers
//! can starve a writer.
//!
//! [borrow]: Exclusive::borrow
//! [borrow_mut]: Exclusive::borrow_mut
//! [RefCell]: std::cell::RefCell

#![warn(missing_docs)]

pub(crate) mod loom;


mod id;
pub use self::id::CellId;

mod state;
pub use self::state::{BorrowKind, BorrowState};

mod error;
pub use self::error::{Error, Result};

mod cell;
pub use self::cell::Exclusive;

mod builder;
pub use self::builder::Builder;

mod guard;
pub use self::guard::{Guard, Ref, RefMut};

mod group;
pub use self::group::{GuardGroup, Iter, IterMut};

mod acquire;
pub use self::acquire::{acquire_all_mut, acquire_pair_mut};
