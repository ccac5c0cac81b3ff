//! Kernel Object Handle Pool
//!
//! A fixed-capacity table mapping external handles to internal references.
//! This is the only data structure unprivileged handles can select into,
//! so every inbound value is treated as attacker-controlled.
//!
//! # Design
//! - Each slot is one atomic machine word plus a kind tag
//! - Word values: 0 = Free, all-ones = Reserved, anything else = a Bound
//!   reference's address
//! - Legal transitions: Free -> Reserved (allocate), Reserved -> Bound
//!   (bind), Reserved -> Free (rollback), Bound -> Free (release)
//! - Translation is a lock-free load, usable from interrupt handlers
//! - Scan-then-claim sequences (allocate, reverse lookup, adopt) serialize
//!   on a spin lock; gate-level callers additionally suspend the scheduler
//!   so no task spins against a preempted lock holder
//!
//! # Security Properties
//! - `resolve` is total over all raw values and never touches memory
//!   outside the slot array
//! - A Free or Reserved slot never yields a reference
//! - A kind-tag mismatch fails translation even when the raw index is live
//! - A slot rebound mid-translation fails translation rather than yielding
//!   the new occupant

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use log::{debug, warn};
use spin::Mutex;
use static_assertions::const_assert;

use super::handle::{Handle, Kind, ObjectRef, INDEX_OFFSET};

/// Stored word of a Free slot.
const FREE_WORD: usize = 0;

/// Stored word of a Reserved slot. Rejected by [`ObjectRef::from_addr`],
/// so no Bound slot can ever collide with it.
const RESERVED_WORD: usize = usize::MAX;

const_assert!(FREE_WORD != RESERVED_WORD);
const_assert!(INDEX_OFFSET > 0);

/// Index of a pool slot.
///
/// Only minted by the pool itself, either from an allocation or from a
/// validated handle, so holders cannot aim a release at an arbitrary slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct SlotIndex(usize);

impl SlotIndex {
    /// The index value.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One pool slot: a state word and a kind tag.
///
/// The tag is meaningful only while the word holds a reference. `bind`
/// writes the tag before the release-store that publishes the word, so an
/// acquire-load that observes a Bound word also observes the matching tag.
struct Slot {
    word: AtomicUsize,
    tag: AtomicU8,
}

const FREE_SLOT: Slot = Slot {
    word: AtomicUsize::new(FREE_WORD),
    tag: AtomicU8::new(0),
};

/// Fixed-capacity handle pool. `N` is the build-time capacity supplied by
/// the embedding kernel's configuration.
pub struct HandlePool<const N: usize> {
    slots: [Slot; N],
    /// Serializes scan-then-claim sequences. Translation never takes it.
    scan_lock: Mutex<()>,
}

impl<const N: usize> HandlePool<N> {
    /// Creates a pool with every slot Free.
    #[must_use]
    pub const fn new() -> Self {
        assert!(N > 0, "handle pool capacity must be non-zero");
        assert!(
            N < u32::MAX as usize,
            "handle pool capacity must leave room for the handle offset"
        );
        Self {
            slots: [FREE_SLOT; N],
            scan_lock: Mutex::new(()),
        }
    }

    /// Capacity in slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of slots currently not Free. Diagnostic only; the answer can
    /// be stale by the time the caller reads it.
    pub fn in_use(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.word.load(Ordering::Relaxed) != FREE_WORD)
            .count()
    }

    /// Claims the lowest Free slot, marking it Reserved.
    ///
    /// First-fit keeps handle values dense and slot reuse deterministic.
    /// The Reserved sentinel holds the index stable while the caller
    /// constructs the object outside the lock.
    ///
    /// # Returns
    /// The claimed index, or `None` when every slot is taken. Exhaustion
    /// is an expected runtime condition, never fatal.
    pub fn allocate(&self) -> Option<SlotIndex> {
        let _scan = self.scan_lock.lock();
        for (index, slot) in self.slots.iter().enumerate() {
            if slot
                .word
                .compare_exchange(FREE_WORD, RESERVED_WORD, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return Some(SlotIndex(index));
            }
        }
        warn!("[POOL] exhausted: all {} slots in use", N);
        None
    }

    /// Returns a slot to Free.
    ///
    /// A single word store. Callers mask interrupts around it when the
    /// slot is reachable from interrupt handlers.
    ///
    /// # Panics
    /// Panics if the slot is already Free. A double release means a
    /// privileged caller lost track of slot ownership; continuing would
    /// let two objects share one handle.
    pub fn release(&self, index: SlotIndex) {
        assert!(index.0 < N, "slot index {} out of range", index.0);
        let prior = self.slots[index.0].word.swap(FREE_WORD, Ordering::AcqRel);
        assert!(prior != FREE_WORD, "slot {} released twice", index.0);
    }

    /// Publishes `object` in a Reserved slot and mints its handle.
    ///
    /// # Panics
    /// Panics if the slot is not Reserved. Binding over a Free or Bound
    /// slot means the allocate/bind protocol was broken.
    pub fn bind<K: Kind>(&self, index: SlotIndex, object: ObjectRef<K>) -> Handle<K> {
        assert!(index.0 < N, "slot index {} out of range", index.0);
        let slot = &self.slots[index.0];
        slot.tag.store(K::KIND as u8, Ordering::Relaxed);
        let claimed = slot.word.compare_exchange(
            RESERVED_WORD,
            object.addr(),
            Ordering::AcqRel,
            Ordering::Relaxed,
        );
        assert!(claimed.is_ok(), "slot {} bound while not reserved", index.0);
        Handle::from_index(index.0)
    }

    /// Translates an inbound handle to the reference it publishes.
    ///
    /// Total over all raw values: null, out-of-range, unbound and
    /// wrong-kind handles yield `None`. Lock-free; safe from interrupt
    /// context.
    #[inline]
    pub fn resolve<K: Kind>(&self, handle: Handle<K>) -> Option<ObjectRef<K>> {
        match self.resolve_entry(handle) {
            Some((_, object)) => Some(object),
            None => None,
        }
    }

    /// Like [`HandlePool::resolve`], also yielding the slot index so
    /// delete paths can retire the slot they translated through.
    pub(crate) fn resolve_entry<K: Kind>(
        &self,
        handle: Handle<K>,
    ) -> Option<(SlotIndex, ObjectRef<K>)> {
        let index = match handle.claimed_index() {
            Some(index) if index < N => index,
            _ => {
                debug!(
                    "[POOL] rejected {} handle {}: out of range",
                    K::KIND.name(),
                    handle.into_raw()
                );
                return None;
            }
        };
        let slot = &self.slots[index];
        let word = slot.word.load(Ordering::Acquire);
        if word == FREE_WORD || word == RESERVED_WORD {
            debug!(
                "[POOL] rejected {} handle {}: slot not bound",
                K::KIND.name(),
                handle.into_raw()
            );
            return None;
        }
        if slot.tag.load(Ordering::Relaxed) != K::KIND as u8 {
            debug!(
                "[POOL] rejected {} handle {}: kind mismatch",
                K::KIND.name(),
                handle.into_raw()
            );
            return None;
        }
        // A release and rebind between the two loads above would pair
        // the old word with the new occupant's tag; the word must still
        // match the one the tag was checked against.
        if slot.word.load(Ordering::Acquire) != word {
            debug!(
                "[POOL] rejected {} handle {}: slot rebound during translation",
                K::KIND.name(),
                handle.into_raw()
            );
            return None;
        }
        let object = ObjectRef::from_addr(word)?;
        Some((SlotIndex(index), object))
    }

    /// Finds the handle publishing `object`, if any slot does.
    ///
    /// Linear scan under the scan lock, so a concurrent allocate cannot
    /// interleave with it.
    pub fn reverse_lookup<K: Kind>(&self, object: ObjectRef<K>) -> Option<Handle<K>> {
        let _scan = self.scan_lock.lock();
        self.scan_for(object).map(Handle::from_index)
    }

    /// Slot index currently publishing `object`, under the scan lock.
    pub(crate) fn position_of<K: Kind>(&self, object: ObjectRef<K>) -> Option<SlotIndex> {
        let _scan = self.scan_lock.lock();
        self.scan_for(object).map(SlotIndex)
    }

    /// Lock-free reverse lookup for interrupt handlers.
    ///
    /// May miss a bind that is racing with the scan; never blocks and
    /// never adopts. Interrupt callers accept the miss as a translation
    /// failure.
    pub fn reverse_lookup_from_isr<K: Kind>(&self, object: ObjectRef<K>) -> Option<Handle<K>> {
        self.scan_for(object).map(Handle::from_index)
    }

    /// Reverse lookup that adopts unknown references: on a miss the object
    /// is bound into the lowest Free slot. This is how objects constructed
    /// outside the create path (the idle task, the timer daemon) become
    /// visible to unprivileged code.
    ///
    /// The scan matches Bound slots only. An object whose create call has
    /// reserved but not yet bound a slot would be adopted into a second
    /// slot, so callers must pass only references to fully constructed
    /// objects.
    ///
    /// # Returns
    /// `None` only when the object is unknown and the pool is full.
    pub fn adopt<K: Kind>(&self, object: ObjectRef<K>) -> Option<Handle<K>> {
        let _scan = self.scan_lock.lock();
        if let Some(index) = self.scan_for(object) {
            return Some(Handle::from_index(index));
        }
        for (index, slot) in self.slots.iter().enumerate() {
            if slot
                .word
                .compare_exchange(FREE_WORD, RESERVED_WORD, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                slot.tag.store(K::KIND as u8, Ordering::Relaxed);
                slot.word.store(object.addr(), Ordering::Release);
                debug!(
                    "[POOL] adopted {} {:#x} into slot {}",
                    K::KIND.name(),
                    object.addr(),
                    index
                );
                return Some(Handle::from_index(index));
            }
        }
        warn!(
            "[POOL] exhausted: cannot adopt {} {:#x}",
            K::KIND.name(),
            object.addr()
        );
        None
    }

    /// Index of the Bound slot whose word and tag match `object`.
    fn scan_for<K: Kind>(&self, object: ObjectRef<K>) -> Option<usize> {
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.word.load(Ordering::Acquire) == object.addr()
                && slot.tag.load(Ordering::Relaxed) == K::KIND as u8
            {
                return Some(index);
            }
        }
        None
    }
}
