//! The `define_id_types` macro.

/// Defines types that consist of a single integer-valued ID.
///
/// You specify for each such type its name, the int type for the contained ID,
/// and the word used when displaying it.  Unlike the Sudoku-style fixed
/// universes, the number of distinct values isn't known until a `Catalog` is
/// built, so range checks against the catalog happen at the entry points.
///
/// We use these types for cards and categories.
#[macro_export]
macro_rules! define_id_types {
    (
        $(
            $(#[$outer:meta])*
            $type_name:ident : $int_type:ty, $word:literal;
        )*
    ) => {
        $(
            define_id_types!(
                @nested $(#[$outer])* $type_name, $int_type, $word,
                concat!("Makes a new `", stringify!($type_name), "` with the given ID."),
                concat!(
                    "Makes a new `", stringify!($type_name),
                    "` from an index, if the index fits in `", stringify!($int_type), "`."),
                concat!("Returns this `", stringify!($type_name), "`'s ID."),
                concat!("Returns this `", stringify!($type_name),
                    "`'s ID in a form suitable for use as an array index."),
                concat!("Iterates the first `count` distinct `", stringify!($type_name), "` values.")
            );
        )*
    };
    (
        @nested
        $(#[$outer:meta])*
        $type_name:ident, $int_type:ty, $word:literal,
        $new_doc:expr,
        $from_index_doc:expr,
        $get_doc:expr,
        $index_doc:expr,
        $all_doc:expr
    ) => {
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        $(#[$outer])*
        pub struct $type_name($int_type);

        impl $type_name {
            #[doc = $new_doc]
            pub const fn new(id: $int_type) -> Self {
                $type_name(id)
            }

            #[doc = $from_index_doc]
            pub fn from_index(i: usize) -> Option<Self> {
                <$int_type>::try_from(i).ok().map($type_name)
            }

            #[doc = $get_doc]
            pub const fn get(self) -> $int_type {
                self.0
            }

            #[doc = $index_doc]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[doc = $all_doc]
            pub fn all(count: usize) -> impl Iterator<Item = Self> {
                (0..count).filter_map(Self::from_index)
            }
        }

        impl From<$int_type> for $type_name {
            #[doc = $new_doc]
            fn from(id: $int_type) -> Self {
                $type_name(id)
            }
        }

        impl From<$type_name> for usize {
            #[doc = $index_doc]
            fn from(n: $type_name) -> Self {
                n.index()
            }
        }

        impl std::fmt::Debug for $type_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", stringify!($type_name), self.0)
            }
        }

        impl std::fmt::Display for $type_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", $word, self.0)
            }
        }
    };
}
