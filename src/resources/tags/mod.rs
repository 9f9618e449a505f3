//! Tags that can be assigned to habits

pub mod descriptor;
pub mod dto;
pub mod handlers;
pub mod model;

pub use descriptor::TagDescriptor;
pub use dto::TagDto;
pub use model::Tag;
