//! Macros for declaring closed state label sets.

/// Generate a [`StateKey`](crate::core::StateKey) enum from `Variant => "label"` pairs.
///
/// The generated enum is `Copy`, hashable, serializable under its label and
/// displays as its label. Variant order defines the key's index.
///
/// # Example
///
/// ```
/// use failable::core::StateKey;
/// use failable::state_keys;
///
/// state_keys! {
///     pub enum Phase {
///         Queued => "queued",
///         Running => "running",
///         Done => "done",
///     }
/// }
///
/// assert_eq!(Phase::ALL.len(), 3);
/// assert_eq!(Phase::Running.name(), "running");
/// assert_eq!(Phase::Done.index(), 2);
/// assert_eq!(Phase::from_name("queued"), Some(Phase::Queued));
/// ```
#[macro_export]
macro_rules! state_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant
            ),*
        }

        impl $crate::core::StateKey for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),*];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),*
                }
            }

            fn index(&self) -> usize {
                *self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::StateKey::name(self))
            }
        }
    };
}
