//! Closed state label sets.
//!
//! Every tagged value in this crate is classified by a small, fixed set of
//! labels. The [`StateKey`] trait describes such a set so that listener
//! tables can be laid out as fixed-size arrays indexed by key, with string
//! lookup kept only for input that crosses a trust boundary.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// A closed, finite set of state labels.
///
/// Implementations are fieldless enums. `ALL` lists every key exactly once
/// and `index` returns the key's position in `ALL`.
///
/// Most implementations come from the [`state_keys!`](crate::state_keys) macro.
///
/// # Example
///
/// ```rust
/// use failable::core::StateKey;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl StateKey for Light {
///     const ALL: &'static [Self] = &[Self::Red, Self::Green];
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Red => "red",
///             Self::Green => "green",
///         }
///     }
///
///     fn index(&self) -> usize {
///         *self as usize
///     }
/// }
///
/// assert_eq!(Light::from_name("green"), Some(Light::Green));
/// assert_eq!(Light::from_name("blue"), None);
/// ```
pub trait StateKey:
    Copy + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Every key in the set, in index order.
    const ALL: &'static [Self];

    /// The key's label.
    fn name(&self) -> &'static str;

    /// Position of this key in [`StateKey::ALL`].
    fn index(&self) -> usize;

    /// Look a key up by label.
    ///
    /// Returns `None` for labels outside the set.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestKey {
        Initial,
        Processing,
        Complete,
    }

    impl StateKey for TestKey {
        const ALL: &'static [Self] = &[Self::Initial, Self::Processing, Self::Complete];

        fn name(&self) -> &'static str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }

        fn index(&self) -> usize {
            *self as usize
        }
    }

    #[test]
    fn name_returns_correct_value() {
        assert_eq!(TestKey::Initial.name(), "Initial");
        assert_eq!(TestKey::Processing.name(), "Processing");
        assert_eq!(TestKey::Complete.name(), "Complete");
    }

    #[test]
    fn from_name_round_trips_every_key() {
        for key in TestKey::ALL {
            assert_eq!(TestKey::from_name(key.name()), Some(*key));
        }
    }

    #[test]
    fn from_name_rejects_unknown_labels() {
        assert_eq!(TestKey::from_name("Failed"), None);
        assert_eq!(TestKey::from_name(""), None);
        assert_eq!(TestKey::from_name("initial"), None);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (position, key) in TestKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), position);
        }
    }
}
