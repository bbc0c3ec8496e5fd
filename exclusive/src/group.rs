use std::fmt;
use std::iter::Flatten;
use std::ops::{Index, IndexMut};
use std::slice;

use crate::error::{Error, Result};
use crate::guard::RefMut;

/// An ordered group of exclusive borrows, constructed through
/// [acquire_all_mut][crate::acquire_all_mut].
///
/// Guards are stored in the order in which their cells were passed in, which
/// is unrelated to the order in which the cells were locked.
///
/// Dropping the group releases every guard still in it, in order. Individual
/// guards can be taken out of the group with [GuardGroup::take], after which
/// the group no longer releases them.
///
/// # Examples
///
/// ```rust
/// use exclusive::Exclusive;
///
/// let a = Exclusive::new(1);
/// let b = Exclusive::new(2);
///
/// let mut group = exclusive::acquire_all_mut(&[&b, &a])?;
/// assert_eq!(group.len(), 2);
/// assert_eq!(group[0], 2);
///
/// group[1] += 10;
/// group.release()?;
///
/// assert_eq!(*a.borrow(), 11);
/// # Ok::<_, exclusive::Error>(())
/// ```
pub struct GuardGroup<'a, T> {
    guards: Vec<Option<RefMut<'a, T>>>,
}

impl<'a, T> GuardGroup<'a, T> {
    pub(crate) fn new(guards: Vec<RefMut<'a, T>>) -> Self {
        Self {
            guards: guards.into_iter().map(Some).collect(),
        }
    }

    /// The number of slots in the group, including the ones whose guards
    /// have been taken.
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Test if the group has no slots.
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Access the value at `index`.
    ///
    /// Returns `None` if `index` is out of bounds or if the guard has been
    /// taken.
    pub fn get(&self, index: usize) -> Option<&T> {
        Some(&**self.guards.get(index)?.as_ref()?)
    }

    /// Mutably access the value at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        Some(&mut **self.guards.get_mut(index)?.as_mut()?)
    }

    /// Take the guard at `index` out of the group.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use exclusive::Exclusive;
    ///
    /// let a = Exclusive::new(1);
    /// let b = Exclusive::new(2);
    ///
    /// let mut group = exclusive::acquire_all_mut(&[&a, &b])?;
    /// let guard = group.take(0).unwrap();
    /// guard.release()?;
    ///
    /// assert!(a.borrow_state().is_free());
    /// assert!(group.get(0).is_none());
    ///
    /// group.release()?;
    /// assert!(b.borrow_state().is_free());
    /// # Ok::<_, exclusive::Error>(())
    /// ```
    pub fn take(&mut self, index: usize) -> Option<RefMut<'a, T>> {
        self.guards.get_mut(index)?.take()
    }

    /// Iterate over the values still held by the group, in order.
    pub fn iter(&self) -> Iter<'_, 'a, T> {
        Iter {
            inner: self.guards.iter().flatten(),
        }
    }

    /// Mutably iterate over the values still held by the group, in order.
    pub fn iter_mut(&mut self) -> IterMut<'_, 'a, T> {
        IterMut {
            inner: self.guards.iter_mut().flatten(),
        }
    }

    /// Release every guard still in the group, in order.
    ///
    /// A guard failing to release doesn't stop the remaining guards from
    /// being released. If any failed, [Error::Release] reports how many.
    pub fn release(self) -> Result<()> {
        let mut failed = 0;

        for guard in self.guards.into_iter().flatten() {
            if let Err(error) = guard.release() {
                tracing::error!(%error, "failed to release grouped guard");
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(Error::Release { failed });
        }

        Ok(())
    }
}

impl<T> Index<usize> for GuardGroup<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("no guard at index {} in group", index),
        }
    }
}

impl<T> IndexMut<usize> for GuardGroup<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("no guard at index {} in group", index),
        }
    }
}

impl<T> fmt::Debug for GuardGroup<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.guards).finish()
    }
}

/// Iterator over the values held by a [GuardGroup], see [GuardGroup::iter].
pub struct Iter<'b, 'a, T> {
    inner: Flatten<slice::Iter<'b, Option<RefMut<'a, T>>>>,
}

impl<'b, 'a, T> Iterator for Iter<'b, 'a, T> {
    type Item = &'b T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|guard| &**guard)
    }
}

/// Mutable iterator over the values held by a [GuardGroup], see
/// [GuardGroup::iter_mut].
pub struct IterMut<'b, 'a, T> {
    inner: Flatten<slice::IterMut<'b, Option<RefMut<'a, T>>>>,
}

impl<'b, 'a, T> Iterator for IterMut<'b, 'a, T> {
    type Item = &'b mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|guard| &mut **guard)
    }
}
