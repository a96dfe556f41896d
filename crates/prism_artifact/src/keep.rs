//! Caller policy for caching derived representations.

use serde::{Deserialize, Serialize};

/// Whether a derived result should be cached back onto the artifact it was
/// derived from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Keep {
    /// The result is ephemeral; nothing is cached.
    No,
    /// A stepping stone produced while deriving something else. Not cached
    /// by this implementation; distinct from `No` so derivation chains can
    /// tell requested intermediates from explicit don't-keep.
    Intermediate,
    /// The result is cached as a new representation.
    Yes,
}

impl Keep {
    /// Returns `true` if a terminal result under this policy is cached.
    pub fn can_keep(self) -> bool {
        self == Keep::Yes
    }

    /// The policy to pass to a nested derivation step: a terminal `Yes` is
    /// downgraded so stepping stones do not pollute the representation
    /// list of the artifact being derived from.
    pub fn intermediate(self) -> Keep {
        match self {
            Keep::Yes => Keep::Intermediate,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_keeps() {
        assert!(Keep::Yes.can_keep());
        assert!(!Keep::Intermediate.can_keep());
        assert!(!Keep::No.can_keep());
    }

    #[test]
    fn intermediate_downgrades_yes_only() {
        assert_eq!(Keep::Yes.intermediate(), Keep::Intermediate);
        assert_eq!(Keep::Intermediate.intermediate(), Keep::Intermediate);
        assert_eq!(Keep::No.intermediate(), Keep::No);
    }

    #[test]
    fn nested_steps_never_keep() {
        for keep in [Keep::No, Keep::Intermediate, Keep::Yes] {
            assert!(!keep.intermediate().can_keep());
        }
    }
}
