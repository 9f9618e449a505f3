//! Tag assignments of a habit

pub mod descriptor;
pub mod dto;
pub mod handlers;

pub use descriptor::HabitTagDescriptor;
