use std::fmt;

/// The kind of borrow held through a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorrowKind {
    /// A shared borrow, handed out by [Exclusive::borrow].
    ///
    /// [Exclusive::borrow]: crate::Exclusive::borrow
    Shared,
    /// An exclusive borrow, handed out by [Exclusive::borrow_mut].
    ///
    /// [Exclusive::borrow_mut]: crate::Exclusive::borrow_mut
    Exclusive,
}

impl fmt::Display for BorrowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorrowKind::Shared => write!(f, "shared"),
            BorrowKind::Exclusive => write!(f, "exclusive"),
        }
    }
}

/// A snapshot of the borrow state of a cell.
///
/// The snapshot is only accurate at the time it was taken, another thread
/// might change it right after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorrowState {
    /// No borrows are outstanding.
    Free,
    /// The given number of shared borrows are outstanding.
    Shared(usize),
    /// A single exclusive borrow is outstanding.
    Exclusive,
}

impl BorrowState {
    /// Test if no borrows are outstanding.
    pub fn is_free(&self) -> bool {
        matches!(self, BorrowState::Free)
    }
}

/// The mutable borrow bookkeeping of a cell, only accessed while the state
/// mutex is held.
///
/// `writer_held` implies `reader_count == 0`.
#[derive(Debug)]
pub(crate) struct Flags {
    writer_held: bool,
    reader_count: usize,
}

impl Flags {
    pub(crate) const fn new() -> Self {
        Self {
            writer_held: false,
            reader_count: 0,
        }
    }

    /// Perform the acquire transition for `kind` if it is currently
    /// permitted. Returns `false` without modifying anything if it's not.
    pub(crate) fn try_acquire(&mut self, kind: BorrowKind) -> bool {
        match kind {
            BorrowKind::Shared if !self.writer_held => {
                self.reader_count += 1;
                true
            }
            BorrowKind::Exclusive if !self.writer_held && self.reader_count == 0 => {
                self.writer_held = true;
                true
            }
            _ => false,
        }
    }

    /// Perform the release transition for `kind`. Returns `false` without
    /// modifying anything if there is no such borrow outstanding.
    pub(crate) fn release(&mut self, kind: BorrowKind) -> bool {
        match kind {
            BorrowKind::Shared if self.reader_count > 0 => {
                self.reader_count -= 1;
                true
            }
            BorrowKind::Exclusive if self.writer_held => {
                self.writer_held = false;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn state(&self) -> BorrowState {
        debug_assert!(!(self.writer_held && self.reader_count > 0));

        if self.writer_held {
            BorrowState::Exclusive
        } else if self.reader_count > 0 {
            BorrowState::Shared(self.reader_count)
        } else {
            BorrowState::Free
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BorrowKind, BorrowState, Flags};

    #[test]
    fn test_shared_then_exclusive() {
        let mut flags = Flags::new();

        assert!(flags.try_acquire(BorrowKind::Shared));
        assert!(flags.try_acquire(BorrowKind::Shared));
        assert_eq!(flags.state(), BorrowState::Shared(2));
        assert!(!flags.try_acquire(BorrowKind::Exclusive));

        assert!(flags.release(BorrowKind::Shared));
        assert!(!flags.try_acquire(BorrowKind::Exclusive));
        assert!(flags.release(BorrowKind::Shared));
        assert_eq!(flags.state(), BorrowState::Free);

        assert!(flags.try_acquire(BorrowKind::Exclusive));
        assert_eq!(flags.state(), BorrowState::Exclusive);
        assert!(!flags.try_acquire(BorrowKind::Shared));
        assert!(!flags.try_acquire(BorrowKind::Exclusive));
    }

    #[test]
    fn test_mismatched_release_is_rejected() {
        let mut flags = Flags::new();
        assert!(!flags.release(BorrowKind::Shared));
        assert!(!flags.release(BorrowKind::Exclusive));
        assert_eq!(flags.state(), BorrowState::Free);

        assert!(flags.try_acquire(BorrowKind::Shared));
        assert!(!flags.release(BorrowKind::Exclusive));
        assert_eq!(flags.state(), BorrowState::Shared(1));

        assert!(flags.release(BorrowKind::Shared));
        assert!(flags.try_acquire(BorrowKind::Exclusive));
        assert!(!flags.release(BorrowKind::Shared));
        assert_eq!(flags.state(), BorrowState::Exclusive);
    }
}
