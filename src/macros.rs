//! Accessor and tag-classification macros
//!
//! These macros eliminate repetitive match code on node enums and tag names.

// =============================================================================
// Enum accessor generation
// =============================================================================

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert method name to variant name.
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl Node {
///     // element -> Element, text -> Text
///     impl_enum_accessors!(element, text);
/// }
/// ```
macro_rules! impl_enum_accessors {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                #[inline]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                #[inline]
                pub fn [<as_ $variant>](&self) -> Option<&[<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                #[inline]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut [<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}

// =============================================================================
// Tag sets
// =============================================================================

/// Generate a predicate over lowercase tag names
///
/// # Example
/// ```ignore
/// tag_set!(is_list_container: "ul", "ol");
/// // Expands to: pub fn is_list_container(tag: &str) -> bool { matches!(tag, "ul" | "ol") }
/// ```
macro_rules! tag_set {
    ($(#[$meta:meta])* $name:ident: $($tag:literal),+ $(,)?) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(tag: &str) -> bool {
            matches!(tag, $($tag)|+)
        }
    };
}

pub(crate) use {impl_enum_accessors, tag_set};
