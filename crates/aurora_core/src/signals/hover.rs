//! Per-target hover flags packed into one word.

/// Maximum number of hover targets one bus can track.
pub const MAX_HOVER_TARGETS: u32 = 64;

/// Identifies one hoverable object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HoverId(pub(crate) u32);

impl HoverId {
    /// Raw index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn bit(self) -> u64 {
        1 << self.0
    }
}

/// Set of hovered targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverMask(pub u64);

impl HoverMask {
    /// Nothing hovered.
    pub const NONE: Self = Self(0);

    /// True if `id` is hovered.
    #[inline]
    #[must_use]
    pub const fn contains(self, id: HoverId) -> bool {
        self.0 & id.bit() != 0
    }

    /// Returns the mask with `id` set or cleared.
    #[inline]
    #[must_use]
    pub const fn with(self, id: HoverId, hovered: bool) -> Self {
        if hovered {
            Self(self.0 | id.bit())
        } else {
            Self(self.0 & !id.bit())
        }
    }
}
