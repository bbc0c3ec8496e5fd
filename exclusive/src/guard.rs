use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};

use crate::cell::Exclusive;
use crate::error::Result;
use crate::id::CellId;
use crate::state::BorrowKind;

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for super::Ref<'_, T> {}
    impl<T> Sealed for super::RefMut<'_, T> {}
}

/// Common operations over [Ref] and [RefMut].
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait Guard: self::sealed::Sealed {
    /// The id of the cell this guard belongs to.
    fn cell_id(&self) -> CellId;

    /// The kind of borrow held by this guard.
    fn kind(&self) -> BorrowKind;

    /// Release the borrow held by this guard.
    fn release(self) -> Result<()>;
}

/// A shared borrow of the value in an [Exclusive], constructed through
/// [Exclusive::borrow].
///
/// The borrow is released when the guard is dropped or explicitly through
/// [Ref::release].
#[must_use = "if unused the borrow will immediately be released"]
pub struct Ref<'a, T> {
    cell: &'a Exclusive<T>,
}

impl<'a, T> Ref<'a, T> {
    /// Must only be called once the shared transition has been performed on
    /// `cell`.
    pub(crate) fn new(cell: &'a Exclusive<T>) -> Self {
        Self { cell }
    }

    /// The id of the cell this guard belongs to.
    pub fn cell_id(&self) -> CellId {
        self.cell.id()
    }

    /// Release the borrow, reporting if the cell didn't consider it to be
    /// outstanding.
    pub fn release(self) -> Result<()> {
        let this = ManuallyDrop::new(self);
        this.cell.release_kind(BorrowKind::Shared)
    }
}

impl<T> Deref for Ref<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: the cell is in the shared state for as long as this guard
        // lives, so no mutable references exist.
        unsafe { &*self.cell.data_ptr() }
    }
}

impl<T> Drop for Ref<'_, T> {
    fn drop(&mut self) {
        if let Err(error) = self.cell.release_kind(BorrowKind::Shared) {
            tracing::error!(%error, "failed to release dropped guard");
        }
    }
}

impl<T> Guard for Ref<'_, T> {
    fn cell_id(&self) -> CellId {
        Ref::cell_id(self)
    }

    fn kind(&self) -> BorrowKind {
        BorrowKind::Shared
    }

    fn release(self) -> Result<()> {
        Ref::release(self)
    }
}

impl<T> fmt::Debug for Ref<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

impl<T> fmt::Display for Ref<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

/// An exclusive borrow of the value in an [Exclusive], constructed through
/// [Exclusive::borrow_mut] or one of the multi-cell acquisition functions.
///
/// The borrow is released when the guard is dropped or explicitly through
/// [RefMut::release].
#[must_use = "if unused the borrow will immediately be released"]
pub struct RefMut<'a, T> {
    cell: &'a Exclusive<T>,
}

impl<'a, T> RefMut<'a, T> {
    /// Must only be called once the exclusive transition has been performed
    /// on `cell`.
    pub(crate) fn new(cell: &'a Exclusive<T>) -> Self {
        Self { cell }
    }

    /// The id of the cell this guard belongs to.
    pub fn cell_id(&self) -> CellId {
        self.cell.id()
    }

    /// Release the borrow, reporting if the cell didn't consider it to be
    /// outstanding.
    pub fn release(self) -> Result<()> {
        let this = ManuallyDrop::new(self);
        this.cell.release_kind(BorrowKind::Exclusive)
    }
}

impl<T> Deref for RefMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: the cell is in the exclusive state for as long as this
        // guard lives, and this guard is the only one.
        unsafe { &*self.cell.data_ptr() }
    }
}

impl<T> DerefMut for RefMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // Safety: see `deref`.
        unsafe { &mut *self.cell.data_ptr() }
    }
}

impl<T> Drop for RefMut<'_, T> {
    fn drop(&mut self) {
        if let Err(error) = self.cell.release_kind(BorrowKind::Exclusive) {
            tracing::error!(%error, "failed to release dropped guard");
        }
    }
}

impl<T> Guard for RefMut<'_, T> {
    fn cell_id(&self) -> CellId {
        RefMut::cell_id(self)
    }

    fn kind(&self) -> BorrowKind {
        BorrowKind::Exclusive
    }

    fn release(self) -> Result<()> {
        RefMut::release(self)
    }
}

impl<T> fmt::Debug for RefMut<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

impl<T> fmt::Display for RefMut<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}
