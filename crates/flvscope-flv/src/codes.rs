//! Shared helpers for enumerated payload codes.

/// Label returned for codes outside a lookup table.
pub const UNRECOGNIZED: &str = "unrecognized";

/// Implement `Display` as `"<code> - <label>"` for code enums that provide
/// `code()` and `label()`.
macro_rules! display_code {
    ($($ty:ty),* $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{} - {}", self.code(), self.label())
                }
            }
        )*
    };
}

pub(crate) use display_code;
