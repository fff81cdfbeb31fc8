//! State and stimulus identifiers

use std::fmt::Debug;
use std::hash::Hash;

/// An opaque enumerated identifier with a reserved "none" sentinel.
///
/// Both state identifiers and stimuli implement this. The sentinel is never
/// stored in a transition table and never names a registered state.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Guard { None, Patrol, Chase }
///
/// impl Identifier for Guard {
///     const NONE: Self = Guard::None;
/// }
/// ```
pub trait Identifier: Copy + Eq + Hash + Debug {
    /// The "no value" / invalid sentinel
    const NONE: Self;

    /// Whether this is the sentinel
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Identifier;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Guard {
        None,
        Patrol,
        Chase,
        Attack,
    }

    impl Identifier for Guard {
        const NONE: Self = Guard::None;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Alert {
        None,
        SawPlayer,
        LostPlayer,
        InRange,
    }

    impl Identifier for Alert {
        const NONE: Self = Alert::None;
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{Alert, Guard};
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(Guard::None.is_none());
        assert!(!Guard::Patrol.is_none());
        assert!(Alert::NONE.is_none());
        assert!(!Alert::InRange.is_none());
    }
}
