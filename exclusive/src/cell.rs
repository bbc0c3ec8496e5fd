use std::cell::UnsafeCell;
use std::fmt;

use crate::error::{Error, Result};
use crate::guard::{Guard, Ref, RefMut};
use crate::id::CellId;
use crate::loom::{Condvar, Mutex};
use crate::state::{BorrowKind, BorrowState, Flags};

/// A value which can be borrowed either by any number of readers or by a
/// single writer at a time, checked at runtime and shared across threads.
///
/// Borrows which can't be granted right away park the calling thread until
/// the value is released by whoever holds it. Every release wakes up all
/// parked threads which then compete to make progress. No fairness is
/// provided, so a constant stream of borrows can starve a waiting writer.
///
/// # Examples
///
/// ```rust
/// use exclusive::{BorrowState, Exclusive};
///
/// let cell = Exclusive::new(vec![1, 2, 3]);
///
/// {
///     let a = cell.borrow();
///     let b = cell.borrow();
///     assert_eq!(a.len() + b.len(), 6);
///     assert_eq!(cell.borrow_state(), BorrowState::Shared(2));
/// }
///
/// cell.borrow_mut().push(4);
/// assert_eq!(cell.borrow_state(), BorrowState::Free);
/// assert_eq!(cell.into_inner(), vec![1, 2, 3, 4]);
/// ```
pub struct Exclusive<T> {
    id: CellId,
    name: Option<Box<str>>,
    /// Borrow bookkeeping.
    flags: Mutex<Flags>,
    /// Signalled on every release.
    changed: Condvar,
    /// Held by the coordinator while it's acquiring this cell as part of a
    /// larger set. Never held by plain borrows.
    structural: Mutex<()>,
    value: UnsafeCell<T>,
}

// Safety: moving the cell moves the value, which only requires `T: Send`.
unsafe impl<T> Send for Exclusive<T> where T: Send {}

// Safety: shared borrows hand out `&T` to many threads at once and exclusive
// borrows hand out `&mut T` to any thread, so both bounds are needed. The
// state machine behind `flags` guarantees that the two never overlap.
unsafe impl<T> Sync for Exclusive<T> where T: Send + Sync {}

impl<T> Exclusive<T> {
    /// Construct a new cell around the given value.
    ///
    /// See [Builder][crate::Builder] for how to configure the cell further.
    pub fn new(value: T) -> Self {
        Self::from_parts(None, value)
    }

    pub(crate) fn from_parts(name: Option<Box<str>>, value: T) -> Self {
        Self {
            id: CellId::allocate(),
            name,
            flags: Mutex::new(Flags::new()),
            changed: Condvar::new(),
            structural: Mutex::new(()),
            value: UnsafeCell::new(value),
        }
    }

    /// The unique identity of this cell.
    pub fn id(&self) -> CellId {
        self.id
    }

    /// The name of the cell, if one was configured.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Take a snapshot of the current borrow state of the cell.
    pub fn borrow_state(&self) -> BorrowState {
        self.flags.lock().state()
    }

    /// Borrow the value for reading, parking the current thread for as long
    /// as an exclusive borrow is outstanding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::thread;
    /// use exclusive::Exclusive;
    ///
    /// let cell = Exclusive::new(1);
    /// let mut writer = cell.borrow_mut();
    ///
    /// thread::scope(|s| {
    ///     let reader = s.spawn(|| *cell.borrow());
    ///     *writer += 1;
    ///     drop(writer);
    ///     assert_eq!(reader.join().unwrap(), 2);
    /// });
    /// ```
    pub fn borrow(&self) -> Ref<'_, T> {
        self.acquire(BorrowKind::Shared);
        Ref::new(self)
    }

    /// Borrow the value for writing, parking the current thread until no
    /// other borrow of any kind is outstanding.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.acquire(BorrowKind::Exclusive);
        RefMut::new(self)
    }

    /// Try to borrow the value for reading without parking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let cell = exclusive::Exclusive::new(42);
    ///
    /// let writer = cell.borrow_mut();
    /// assert!(cell.try_borrow().is_none());
    /// drop(writer);
    ///
    /// assert_eq!(cell.try_borrow().as_deref(), Some(&42));
    /// ```
    pub fn try_borrow(&self) -> Option<Ref<'_, T>> {
        if !self.flags.lock().try_acquire(BorrowKind::Shared) {
            return None;
        }

        Some(Ref::new(self))
    }

    /// Try to borrow the value for writing without parking.
    pub fn try_borrow_mut(&self) -> Option<RefMut<'_, T>> {
        if !self.flags.lock().try_acquire(BorrowKind::Exclusive) {
            return None;
        }

        Some(RefMut::new(self))
    }

    /// Release a guard through this cell.
    ///
    /// This is the same as calling `release` on the guard directly, except
    /// that it checks that the guard actually belongs to this cell. If it
    /// doesn't, [Error::ForeignGuard] is returned and the guard is dropped,
    /// which releases it from the cell it belongs to.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use exclusive::{Error, Exclusive};
    ///
    /// let a = Exclusive::new(1);
    /// let b = Exclusive::new(2);
    ///
    /// let guard = a.borrow_mut();
    /// assert!(matches!(b.release(guard), Err(Error::ForeignGuard { .. })));
    /// assert!(a.borrow_state().is_free());
    ///
    /// let guard = a.borrow();
    /// a.release(guard)?;
    /// # Ok::<_, Error>(())
    /// ```
    pub fn release<G>(&self, guard: G) -> Result<()>
    where
        G: Guard,
    {
        let actual = guard.cell_id();

        if actual != self.id {
            return Err(Error::ForeignGuard {
                expected: self.id,
                actual,
            });
        }

        guard.release()
    }

    /// Get a mutable reference to the value.
    ///
    /// No runtime checks are needed, since mutable access to the cell implies
    /// that no borrows are outstanding.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    /// Consume the cell and return the value.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    pub(crate) fn structural(&self) -> &Mutex<()> {
        &self.structural
    }

    pub(crate) fn data_ptr(&self) -> *mut T {
        self.value.get()
    }

    fn acquire(&self, kind: BorrowKind) {
        let mut flags = self.flags.lock();

        if !flags.try_acquire(kind) {
            tracing::debug!(cell = %self.label(), %kind, state = ?flags.state(), "waiting for borrow");

            loop {
                self.changed.wait(&mut flags);

                if flags.try_acquire(kind) {
                    break;
                }
            }
        }

        tracing::trace!(cell = %self.label(), %kind, "borrowed");
    }

    /// Perform the release transition for `kind` and wake up everyone
    /// waiting on this cell.
    pub(crate) fn release_kind(&self, kind: BorrowKind) -> Result<()> {
        let released = self.flags.lock().release(kind);
        self.changed.notify_all();

        if !released {
            return Err(Error::BorrowLogic { id: self.id, kind });
        }

        tracing::trace!(cell = %self.label(), %kind, "released");
        Ok(())
    }

    fn label(&self) -> Label<'_> {
        Label {
            id: self.id,
            name: self.name(),
        }
    }
}

impl<T> Default for Exclusive<T>
where
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Exclusive<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> fmt::Debug for Exclusive<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Exclusive");
        d.field("id", &self.id);

        if let Some(name) = self.name() {
            d.field("name", &name);
        }

        match self.try_borrow() {
            Some(value) => d.field("value", &&*value),
            None => d.field("value", &format_args!("<borrowed>")),
        };

        d.finish()
    }
}

/// How a cell is identified in diagnostics.
struct Label<'a> {
    id: CellId,
    name: Option<&'a str>,
}

impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => fmt::Display::fmt(&self.id, f),
        }
    }
}
