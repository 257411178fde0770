/// An element of a grid that can be classified as foreground (the void
/// phase) or background (solid).
///
/// Booleans are foreground when `true`. Integers are foreground when they are
/// strictly positive, which lets label maps (0 = background) be used
/// wherever a boolean mask is accepted.
pub trait Voxel: Copy {
    fn is_foreground(&self) -> bool;

    /// the value written into voxels that get removed from a mask
    fn background() -> Self;
}

impl Voxel for bool {
    #[inline(always)]
    fn is_foreground(&self) -> bool {
        *self
    }

    #[inline(always)]
    fn background() -> Self {
        false
    }
}

macro_rules! impl_integer_voxel {
    ($($t:ty),*) => {
        $(
            impl Voxel for $t {
                #[inline(always)]
                fn is_foreground(&self) -> bool {
                    *self > 0
                }

                #[inline(always)]
                fn background() -> Self {
                    0
                }
            }
        )*
    };
}

impl_integer_voxel!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
