//! Acquiring exclusive borrows of several cells as one step.
//!
//! Every cell carries a structural lock next to its borrow state. Before any
//! borrow is attempted, the structural locks of all requested cells are taken
//! in ascending [CellId] order. Two acquisitions over overlapping sets of
//! cells therefore always contend for the shared cells in the same relative
//! order, and one of them strictly proceeds before the other. Only then are
//! the exclusive borrows acquired, in the order the caller asked for them.

use crate::cell::Exclusive;
use crate::error::{Error, Result};
use crate::group::GuardGroup;
use crate::guard::RefMut;
use crate::id::CellId;
use crate::loom::{Mutex, MutexGuard};

/// A cell taking part in an acquisition, with its payload type erased.
trait Participant {
    fn id(&self) -> CellId;

    fn structural(&self) -> &Mutex<()>;
}

impl<T> Participant for Exclusive<T> {
    fn id(&self) -> CellId {
        Exclusive::id(self)
    }

    fn structural(&self) -> &Mutex<()> {
        Exclusive::structural(self)
    }
}

/// Take the structural lock of every participant in id order.
///
/// The locks are held until the returned vector is dropped.
fn lock_in_order<'a>(participants: &[&'a dyn Participant]) -> Result<Vec<MutexGuard<'a, ()>>> {
    if participants.is_empty() {
        return Err(Error::InvalidArgument);
    }

    let mut order = participants.to_vec();
    order.sort_by_key(|p| p.id());

    if let Some(w) = order.windows(2).find(|w| w[0].id() == w[1].id()) {
        return Err(Error::DuplicateCell(w[0].id()));
    }

    let mut held = Vec::with_capacity(order.len());

    for participant in order {
        held.push(participant.structural().lock());
    }

    Ok(held)
}

/// Acquire exclusive borrows of all the given cells.
///
/// The cells are locked in a globally consistent order, so any number of
/// threads may call this concurrently with overlapping sets of cells in any
/// order without deadlocking against each other. The returned group stores
/// the guards in the order the cells were given.
///
/// This parks the current thread for as long as any of the cells are
/// borrowed elsewhere.
///
/// # Errors
///
/// Returns [Error::InvalidArgument] if `cells` is empty and
/// [Error::DuplicateCell] if a cell is passed more than once. Nothing is
/// acquired in either case.
///
/// # Examples
///
/// ```rust
/// use std::thread;
/// use exclusive::Exclusive;
///
/// let cells = [Exclusive::new(0), Exclusive::new(0), Exclusive::new(0)];
///
/// thread::scope(|s| {
///     for n in 0..3 {
///         let cells = &cells;
///
///         s.spawn(move || {
///             let order = [&cells[n], &cells[(n + 1) % 3], &cells[(n + 2) % 3]];
///
///             for _ in 0..100 {
///                 let mut group = exclusive::acquire_all_mut(&order)?;
///
///                 for value in group.iter_mut() {
///                     *value += 1;
///                 }
///             }
///
///             Ok::<_, exclusive::Error>(())
///         });
///     }
/// });
///
/// for cell in &cells {
///     assert_eq!(*cell.borrow(), 300);
/// }
/// ```
pub fn acquire_all_mut<'a, T>(cells: &[&'a Exclusive<T>]) -> Result<GuardGroup<'a, T>> {
    let participants = cells
        .iter()
        .map(|&cell| cell as &'a dyn Participant)
        .collect::<Vec<_>>();

    let held = lock_in_order(&participants)?;
    tracing::debug!(cells = cells.len(), "acquiring group");

    let guards = cells.iter().map(|cell| cell.borrow_mut()).collect();
    drop(held);

    Ok(GuardGroup::new(guards))
}

/// Acquire exclusive borrows of two cells, which may hold different types.
///
/// This follows the same locking protocol as [acquire_all_mut], so pairs and
/// groups over overlapping cells can be freely mixed.
///
/// # Errors
///
/// Returns [Error::DuplicateCell] if `a` and `b` are the same cell.
///
/// # Examples
///
/// ```rust
/// use exclusive::{Error, Exclusive};
///
/// let name = Exclusive::new(String::from("counter"));
/// let count = Exclusive::new(0u32);
///
/// let (mut name, mut count) = exclusive::acquire_pair_mut(&name, &count)?;
/// name.push_str("-1");
/// *count += 1;
///
/// let same = Exclusive::new(());
/// assert!(matches!(exclusive::acquire_pair_mut(&same, &same), Err(Error::DuplicateCell(..))));
/// # Ok::<_, Error>(())
/// ```
pub fn acquire_pair_mut<'a, A, B>(
    a: &'a Exclusive<A>,
    b: &'a Exclusive<B>,
) -> Result<(RefMut<'a, A>, RefMut<'a, B>)> {
    let held = lock_in_order(&[a as &'a dyn Participant, b])?;
    tracing::debug!(a = %a.id(), b = %b.id(), "acquiring pair");

    let a = a.borrow_mut();
    let b = b.borrow_mut();
    drop(held);

    Ok((a, b))
}
