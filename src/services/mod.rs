//! Boundary Services
//!
//! The per-family call surfaces of the gate. Every operation here follows
//! the same shape: translate handles at the boundary, cross once, hand the
//! kernel real references, and never let a reference travel back out.

mod queue;
mod task;

#[cfg(feature = "event-groups")]
mod event_group;
#[cfg(feature = "queue-sets")]
mod queue_set;
#[cfg(feature = "stream-buffers")]
mod stream_buffer;
#[cfg(feature = "timers")]
mod timer;
