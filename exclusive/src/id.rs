use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ids are handed out from here. Zero is never used.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// The identity of a cell.
///
/// Every [Exclusive][crate::Exclusive] is assigned a unique id when it's
/// constructed and ids are never reused for the lifetime of the process. The
/// ordering of ids is what [acquire_all_mut][crate::acquire_all_mut] uses to
/// decide in which order cells are locked.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CellId(u64);

impl CellId {
    /// Allocate the next unique id.
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted.
    pub(crate) fn allocate() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);

        if id == u64::MAX {
            panic!("cell id space exhausted");
        }

        CellId(id)
    }

    /// Get the raw numerical value of the id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellId").field(&self.0).finish()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
