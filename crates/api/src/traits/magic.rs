//! Marker-field access for tagged-pointer sanitization

use nospec_internal::Word;

/// A structure carrying a marker field (`spec_magic`) that identifies it
///
/// The marker must be initialised to its expected constant by ordinary code
/// before the structure is reachable from any path that sanitizes pointers
/// to it.
pub trait SpecMagic {
    /// Type of the marker field, at most one machine word wide
    type Magic: Word;

    /// Current value of the marker field
    fn spec_magic(&self) -> Self::Magic;
}

/// Implement [`SpecMagic`] by naming the marker field
///
/// ```
/// use nospec_api::impl_spec_magic;
///
/// struct Device {
///     spec_magic: u32,
///     id: u16,
/// }
/// impl_spec_magic!(Device: u32);
///
/// struct Queue {
///     tag: u64,
/// }
/// impl_spec_magic!(Queue, tag: u64);
/// # let _ = Device { spec_magic: 0, id: 1 }.id;
/// # let _ = Queue { tag: 0 }.tag;
/// ```
///
/// The marker must fit in a machine word, so a `u128` marker is rejected:
///
/// ```compile_fail
/// use nospec_api::impl_spec_magic;
///
/// struct Wide {
///     spec_magic: u128,
/// }
/// impl_spec_magic!(Wide: u128);
/// ```
#[macro_export]
macro_rules! impl_spec_magic {
    ($ty:ty: $magic:ty) => {
        $crate::impl_spec_magic!($ty, spec_magic: $magic);
    };
    ($ty:ty, $field:ident: $magic:ty) => {
        impl $crate::traits::SpecMagic for $ty {
            type Magic = $magic;

            #[inline(always)]
            fn spec_magic(&self) -> $magic {
                self.$field
            }
        }
    };
}
