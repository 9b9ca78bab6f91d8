//! Macros for declaring state identifiers.

/// Generate a state id enum and its [`StateId`](crate::core::StateId)
/// implementation.
///
/// The enum derives `Clone`, `Copy`, `Eq`, `Hash`, `Debug` and serde's
/// `Serialize`/`Deserialize`; each variant is named after itself.
/// The calling crate needs `serde` (with `derive`) as a dependency.
///
/// # Example
///
/// ```
/// use hfsm::core::StateId;
/// use hfsm::state_ids;
///
/// state_ids! {
///     pub enum Locomotion {
///         Root,
///         Movement,
///         Idle,
///     }
/// }
///
/// assert_eq!(Locomotion::Movement.name(), "Movement");
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateId for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
