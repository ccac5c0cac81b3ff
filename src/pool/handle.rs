//! Handle and Reference Types
//!
//! Defines the two identities a kernel object has on either side of the
//! privilege boundary.
//!
//! # Identity Split
//! ```text
//! ┌───────────────────────────┐        ┌───────────────────────────┐
//! │       Handle<K>           │        │       ObjectRef<K>        │
//! ├───────────────────────────┤  pool  ├───────────────────────────┤
//! │  raw: u32                 │ <────> │  addr: NonZeroUsize       │
//! │  (slot index + offset)    │        │  (kernel pointer or ID)   │
//! │  held by unprivileged code│        │  never leaves the kernel  │
//! └───────────────────────────┘        └───────────────────────────┘
//! ```
//!
//! Both carry a phantom kind parameter so a queue identity cannot be used
//! where a task identity is expected, without any per-call tag checks in
//! the type-correct paths.

use core::fmt;
use core::marker::PhantomData;
use core::num::NonZeroUsize;

/// Offset between a pool slot index and the external handle minted for it.
///
/// Keeps the all-zeroes value permanently invalid as a handle, so a
/// zero-initialized variable can never alias slot 0.
pub const INDEX_OFFSET: u32 = 1;

/// Runtime tag for the kind of object a pool slot publishes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum ObjectKind {
    /// A scheduled task.
    Task = 0,

    /// A message queue. Mutexes and semaphores share this kind: the kernel
    /// implements them as queues with behavior flags.
    Queue = 1,

    /// A queue set.
    QueueSet = 2,

    /// An event group.
    EventGroup = 3,

    /// A software timer.
    Timer = 4,

    /// A stream or message buffer.
    StreamBuffer = 5,
}

impl ObjectKind {
    /// Short name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Queue => "queue",
            Self::QueueSet => "queue-set",
            Self::EventGroup => "event-group",
            Self::Timer => "timer",
            Self::StreamBuffer => "stream-buffer",
        }
    }
}

/// Marker types for the pooled object kinds.
pub mod kind {
    /// A scheduled task.
    #[derive(Debug)]
    pub struct Task;

    /// A message queue, mutex or semaphore.
    #[derive(Debug)]
    pub struct Queue;

    /// A queue set.
    #[derive(Debug)]
    pub struct QueueSet;

    /// An event group.
    #[derive(Debug)]
    pub struct EventGroup;

    /// A software timer.
    #[derive(Debug)]
    pub struct Timer;

    /// A stream or message buffer.
    #[derive(Debug)]
    pub struct StreamBuffer;
}

/// Binds a kind marker to its runtime tag.
pub trait Kind {
    /// The runtime tag stored in pool slots of this kind.
    const KIND: ObjectKind;
}

impl Kind for kind::Task {
    const KIND: ObjectKind = ObjectKind::Task;
}

impl Kind for kind::Queue {
    const KIND: ObjectKind = ObjectKind::Queue;
}

impl Kind for kind::QueueSet {
    const KIND: ObjectKind = ObjectKind::QueueSet;
}

impl Kind for kind::EventGroup {
    const KIND: ObjectKind = ObjectKind::EventGroup;
}

impl Kind for kind::Timer {
    const KIND: ObjectKind = ObjectKind::Timer;
}

impl Kind for kind::StreamBuffer {
    const KIND: ObjectKind = ObjectKind::StreamBuffer;
}

/// External handle: the only object identity unprivileged code ever holds.
///
/// A plain integer with no pointer content. Inbound values are untrusted;
/// any `u32` wraps into a handle and the pool's translation is the sole
/// authority on validity.
///
/// # Security Properties
/// - Carries no kernel address, so leaking one reveals nothing
/// - Value 0 is permanently invalid (see [`INDEX_OFFSET`])
/// - Forging a value at worst selects another live object of the same kind
#[repr(transparent)]
pub struct Handle<K> {
    raw: u32,
    _kind: PhantomData<K>,
}

impl<K: Kind> Handle<K> {
    /// The null handle. Never resolves.
    pub const NULL: Self = Self::from_raw(0);

    /// Wraps a raw inbound value. Every integer is accepted; validity is
    /// decided at translation time, not here.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// The raw wire value of this handle.
    #[inline]
    #[must_use]
    pub const fn into_raw(self) -> u32 {
        self.raw
    }

    /// Whether this is the null handle.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.raw == 0
    }

    /// Mints the handle publishing the slot at `index`.
    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self::from_raw(index as u32 + INDEX_OFFSET)
    }

    /// The pool index this handle claims. Not range-checked against any
    /// particular pool; the pool does that during translation.
    #[inline]
    pub(crate) const fn claimed_index(self) -> Option<usize> {
        match self.raw.checked_sub(INDEX_OFFSET) {
            Some(index) => Some(index as usize),
            None => None,
        }
    }
}

impl<K> Clone for Handle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Handle<K> {}

impl<K> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K> Eq for Handle<K> {}

impl<K: Kind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({})", K::KIND.name(), self.raw)
    }
}

/// Internal reference: the kernel's real pointer or ID for an object.
///
/// Minted only by the kernel services implementation and stored only in
/// pool slots and privileged call frames. The wrapped word is opaque to
/// this crate; it is compared and forwarded, never dereferenced.
///
/// # Security Properties
/// - Cannot be constructed from a handle without a pool translation
/// - Zero and the all-ones word are rejected: the pool reserves them as
///   slot sentinels
#[repr(transparent)]
pub struct ObjectRef<K> {
    addr: NonZeroUsize,
    _kind: PhantomData<K>,
}

impl<K: Kind> ObjectRef<K> {
    /// Wraps a kernel-minted word.
    ///
    /// # Returns
    /// `None` for zero and the all-ones word; real kernels mint neither as
    /// an object address.
    #[must_use]
    pub const fn from_addr(addr: usize) -> Option<Self> {
        if addr == usize::MAX {
            return None;
        }
        match NonZeroUsize::new(addr) {
            Some(addr) => Some(Self {
                addr,
                _kind: PhantomData,
            }),
            None => None,
        }
    }

    /// The underlying word.
    #[inline]
    #[must_use]
    pub const fn addr(self) -> usize {
        self.addr.get()
    }
}

impl<K> Clone for ObjectRef<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for ObjectRef<K> {}

impl<K> PartialEq for ObjectRef<K> {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr
    }
}

impl<K> Eq for ObjectRef<K> {}

impl<K: Kind> fmt::Debug for ObjectRef<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef<{}>({:#x})", K::KIND.name(), self.addr.get())
    }
}

/// Handle to a task.
pub type TaskHandle = Handle<kind::Task>;
/// Handle to a queue, mutex or semaphore.
pub type QueueHandle = Handle<kind::Queue>;
/// Handle to a queue set.
pub type QueueSetHandle = Handle<kind::QueueSet>;
/// Handle to an event group.
pub type EventGroupHandle = Handle<kind::EventGroup>;
/// Handle to a software timer.
pub type TimerHandle = Handle<kind::Timer>;
/// Handle to a stream or message buffer.
pub type StreamBufferHandle = Handle<kind::StreamBuffer>;

/// Reference to a task object.
pub type TaskRef = ObjectRef<kind::Task>;
/// Reference to a queue, mutex or semaphore object.
pub type QueueRef = ObjectRef<kind::Queue>;
/// Reference to a queue set object.
pub type QueueSetRef = ObjectRef<kind::QueueSet>;
/// Reference to an event group object.
pub type EventGroupRef = ObjectRef<kind::EventGroup>;
/// Reference to a software timer object.
pub type TimerRef = ObjectRef<kind::Timer>;
/// Reference to a stream or message buffer object.
pub type StreamBufferRef = ObjectRef<kind::StreamBuffer>;
