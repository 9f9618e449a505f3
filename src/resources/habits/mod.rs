//! Habits: the tracked routines and their CRUD endpoints

pub mod descriptor;
pub mod dto;
pub mod handlers;
pub mod model;
pub mod patch;

pub use descriptor::HabitDescriptor;
pub use dto::HabitDto;
pub use model::Habit;
