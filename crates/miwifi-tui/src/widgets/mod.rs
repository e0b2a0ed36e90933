//! Reusable rendering helpers shared by the panels.

pub mod bytes_fmt;
pub mod chart;
pub mod ring_buffer;

pub use ring_buffer::RingBuffer;
