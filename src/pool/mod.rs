//! Handle Pool
//!
//! The indirection layer between unprivileged handles and kernel object
//! references: phantom-typed identities (`handle`) and the fixed-capacity
//! translation table (`table`).

mod handle;
mod table;


pub use handle::{
    kind, EventGroupHandle, EventGroupRef, Handle, Kind, ObjectKind, ObjectRef, QueueHandle,
    QueueRef, QueueSetHandle, QueueSetRef, StreamBufferHandle, StreamBufferRef, TaskHandle,
    TaskRef, TimerHandle, TimerRef, INDEX_OFFSET,
};
pub use table::{HandlePool, SlotIndex};
