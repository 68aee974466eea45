//! Macros for ergonomic state declaration.

/// Declare a state enum and implement [`State`](crate::core::State) for it.
///
/// Variants may be unit or tuple variants. `name()` returns the variant
/// name, which is also the name to declare the state under in the builder.
///
/// # Example
///
/// ```
/// use statecell::state_enum;
/// use statecell::core::State;
///
/// state_enum! {
///     pub enum Download {
///         Queued,
///         Fetching(u64),
///         Done,
///         Failed(String),
///     }
///     final: [Done, Failed]
/// }
///
/// assert_eq!(Download::Fetching(512).name(), "Fetching");
/// assert!(Download::Failed("timeout".into()).is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( ( $($field:ty),* $(,)? ) )?
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $( ( $($field),* ) )?
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant { .. } => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final { .. } => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Initial,
            Processing(u32),
            Complete,
            Failed(String),
        }
        final: [Complete, Failed]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        let state = TestState::Initial;
        assert_eq!(state.name(), "Initial");
        assert!(!state.is_final());

        let processing = TestState::Processing(7);
        assert_eq!(processing.name(), "Processing");
        assert!(!processing.is_final());

        let failed = TestState::Failed("disk full".to_string());
        assert_eq!(failed.name(), "Failed");
        assert!(failed.is_final());
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
            final: [B]
        }

        assert!(PublicState::B.is_final());
    }

    #[test]
    fn state_enum_works_without_final() {
        state_enum! {
            enum MinimalState {
                One,
                Two(u8),
            }
        }

        assert!(!MinimalState::One.is_final());
        assert!(!MinimalState::Two(1).is_final());
    }

    #[test]
    fn state_enum_values_serialize() {
        let state = TestState::Processing(3);
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
