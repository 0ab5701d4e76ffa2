use core::cmp::Ordering;
use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::mem;
use core::num::NonZeroU32;

use crate::storage::SparseIndex;

// -----------------------------------------------------------------------------
// EntityId

/// The index of an [`Entity`] slot: the lighter half of an entity handle.
///
/// Unlike [`Entity`], an `EntityId` is only unique among currently live
/// entities — indices are recycled. The valid range is `1..u32::MAX`; zero
/// is reserved so the all-ones entity bit pattern stays invalid.
#[derive(Clone, Copy, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityId(NonZeroU32);

impl EntityId {
    /// Creates an id from a raw index; `None` for zero.
    #[inline(always)]
    pub(crate) const fn new(index: u32) -> Option<Self> {
        match NonZeroU32::new(index) {
            Some(inner) => Some(Self(inner)),
            None => None,
        }
    }

    /// Gets the index as a u32.
    #[inline(always)]
    pub const fn index_u32(self) -> u32 {
        self.0.get()
    }

    /// Gets the index as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0.get() as usize
    }
}

impl SparseIndex for EntityId {
    #[inline(always)]
    fn to_index(self) -> usize {
        self.index()
    }
}

impl PartialEq for EntityId {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.get());
    }
}

impl Debug for EntityId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.index_u32(), f)
    }
}

impl Display for EntityId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.index_u32(), f)
    }
}

// -----------------------------------------------------------------------------
// EntityGeneration

/// The version of an [`EntityId`] slot, advanced every time the slot is
/// recycled.
///
/// The counter wraps; after about four billion reuses of one slot a stale
/// handle could alias a live one, which is why long-held handles should be
/// revalidated. Ordering is wrap-aware: a generation is "greater" when it
/// is less than half the counter space ahead.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct EntityGeneration(u32);

impl EntityGeneration {
    /// The generation every slot starts with.
    pub const FIRST: Self = Self(0);

    /// Half the counter space; the pivot of wrap-aware ordering.
    const DIFF_MAX: u32 = 1u32 << 31;

    /// The generation after `versions` more recycles, wrapping silently.
    #[inline(always)]
    pub const fn wrapping_add(self, versions: u32) -> Self {
        Self(self.0.wrapping_add(versions))
    }

    /// Like [`wrapping_add`](Self::wrapping_add), but also reports whether
    /// the counter wrapped (meaning old handles may now alias).
    #[inline]
    pub const fn checked_add(self, versions: u32) -> (Self, bool) {
        let raw = self.0.overflowing_add(versions);
        (Self(raw.0), raw.1)
    }
}

impl PartialOrd for EntityGeneration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl Ord for EntityGeneration {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.0.wrapping_sub(other.0) {
            0 => Ordering::Equal,
            1..Self::DIFF_MAX => Ordering::Greater,
            _ => Ordering::Less,
        }
    }
}

impl Hash for EntityGeneration {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0);
    }
}

impl Debug for EntityGeneration {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for EntityGeneration {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// Entity

/// An opaque 64-bit entity handle: slot index plus generation.
///
/// The index names a slot in the entity registry; the generation
/// distinguishes successive occupants of that slot, so a handle goes stale
/// the moment its entity is despawned.
///
/// # Memory layout
///
/// Guaranteed to have the same representation as a `u64` (8-byte aligned),
/// with endianness-aware field ordering so [`to_bits`](Entity::to_bits) is
/// consistent across platforms.
#[derive(Clone, Copy)]
#[repr(C, align(8))]
pub struct Entity {
    #[cfg(target_endian = "little")]
    id: EntityId,
    generation: EntityGeneration,
    #[cfg(target_endian = "big")]
    id: EntityId,
}

impl Entity {
    const _LAYOUT_CHECK: () = const {
        assert!(mem::size_of::<Entity>() == mem::size_of::<u64>());
        assert!(Entity::from_bits(20260101).id.index_u32() == 20260101);
    };

    /// An invalid placeholder handle: the all-ones bit pattern, which no
    /// live entity can have because index `u32::MAX` is never allocated.
    pub const PLACEHOLDER: Self = unsafe { mem::transmute(u64::MAX) };

    /// Creates an entity from its parts.
    #[inline(always)]
    pub const fn new(id: EntityId, generation: EntityGeneration) -> Entity {
        Self { id, generation }
    }

    /// Creates an entity with the first generation.
    #[inline(always)]
    pub const fn from_id(id: EntityId) -> Entity {
        Self {
            id,
            generation: EntityGeneration::FIRST,
        }
    }

    /// Returns the slot index as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.id.index()
    }

    /// Returns the [`EntityId`] half.
    #[inline(always)]
    pub const fn id(self) -> EntityId {
        self.id
    }

    /// Returns the [`EntityGeneration`] half.
    #[inline(always)]
    pub const fn generation(self) -> EntityGeneration {
        self.generation
    }

    /// The raw `u64` representation; exact bit pattern, zero cost.
    #[inline(always)]
    pub const fn to_bits(self) -> u64 {
        unsafe { mem::transmute::<Entity, u64>(self) }
    }

    /// The inverse of [`to_bits`](Entity::to_bits).
    ///
    /// # Panics
    /// Panics when the decoded index is zero, which is reserved.
    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        unsafe {
            let entity = mem::transmute::<u64, Entity>(bits);
            assert!(mem::transmute::<EntityId, u32>(entity.id) != 0);
            entity
        }
    }
}

impl PartialEq for Entity {
    #[inline(always)]
    fn eq(&self, other: &Entity) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Eq for Entity {}

impl PartialOrd for Entity {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entity {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_bits().cmp(&other.to_bits())
    }
}

impl Hash for Entity {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.to_bits());
    }
}

impl Debug for Entity {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if *self == Self::PLACEHOLDER {
            f.pad("PLACEHOLDER")
        } else {
            f.pad(&alloc::format!("{}v{}", self.id, self.generation))
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Entity {
    #[inline(always)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.to_bits())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Entity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let bits: u64 = serde::Deserialize::deserialize(deserializer)?;

        unsafe {
            let entity = mem::transmute::<u64, Entity>(bits);
            if mem::transmute::<EntityId, u32>(entity.id) != 0 {
                Ok(entity)
            } else {
                Err(Error::custom("deserialized an invalid entity"))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Entity, EntityGeneration};

    #[test]
    fn bits_round_trip() {
        assert_eq!(
            Entity::from_bits(123456789012_u64).to_bits(),
            123456789012_u64,
        );
    }

    #[test]
    fn equality_covers_both_halves() {
        assert_eq!(Entity::from_bits(12345), Entity::from_bits(12345));
        assert_ne!(Entity::from_bits(12345), Entity::from_bits(54321));
        assert_ne!(
            Entity::from_bits(12345),
            Entity::from_bits(12345 | (1 << 40)),
        );
    }

    #[test]
    fn generation_ordering_tolerates_wrap() {
        let near_max = EntityGeneration::FIRST.wrapping_add(u32::MAX);
        let (wrapped, overflow) = near_max.checked_add(2);
        assert!(overflow);
        assert!(wrapped > near_max);
    }
}
