//! Shared boilerplate for closed string enumerations.

/// Implements `ALL`, `as_str`, `Display` and `FromStr` for a unit enum whose
/// serde representation is the listed string for each variant.
///
/// `FromStr` fails with [`crate::ValidationError::UnknownValue`], naming the
/// full allowed set, so callers can surface the message unchanged.
macro_rules! closed_set {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Wire names of every member, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            /// Wire name of this member.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::error::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    other => Err($crate::error::ValidationError::unknown_value(
                        $kind,
                        other,
                        $ty::NAMES,
                    )),
                }
            }
        }
    };
}
