use crate::id::CellId;
use crate::state::BorrowKind;
use thiserror::Error;

/// Errors raised by cells and the multi-cell coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No cells were passed to a multi-cell acquisition.
    #[error("at least one cell must be provided")]
    InvalidArgument,
    /// The same cell was passed more than once to a multi-cell acquisition.
    #[error("cell {0} was passed more than once")]
    DuplicateCell(CellId),
    /// A release was attempted without a matching outstanding borrow.
    #[error("cell {id} has no outstanding {kind} borrow to release")]
    BorrowLogic {
        /// The cell being released.
        id: CellId,
        /// The kind of borrow that was being released.
        kind: BorrowKind,
    },
    /// A guard was released through a cell which it doesn't belong to.
    #[error("guard belongs to cell {actual} and cannot be released through cell {expected}")]
    ForeignGuard {
        /// The cell the release was attempted through.
        expected: CellId,
        /// The cell the guard belongs to.
        actual: CellId,
    },
    /// One or more guards in a group failed to release. Every other guard in
    /// the group has still been released.
    #[error("{failed} guard(s) in group failed to release")]
    Release {
        /// The number of guards that failed to release.
        failed: usize,
    },
}

/// The re-exported result type.
pub type Result<T, E = Error> = ::std::result::Result<T, E>;
