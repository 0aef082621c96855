//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// Every node resolves within the tick it is evaluated in:
/// - Conditions evaluate immediately (e.g., "Is target in range?")
/// - Actions write their request and return (e.g., "Move toward target")
///
/// Work that spans several ticks is owned by whoever consumes the request,
/// not by the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The behavior completed successfully.
    ///
    /// For conditions: The condition was met.
    /// For actions: The request was written.
    Success,

    /// The behavior failed.
    ///
    /// For conditions: The condition was not met.
    /// For actions: The request could not be made (e.g., no target).
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }

    /// Maps a boolean condition to a status.
    #[inline]
    pub fn from_bool(holds: bool) -> Self {
        if holds { Status::Success } else { Status::Failure }
    }
}

impl From<bool> for Status {
    fn from(holds: bool) -> Self {
        Status::from_bool(holds)
    }
}
