//! Users: read-only profile lookups

pub mod descriptor;
pub mod dto;
pub mod handlers;
pub mod model;

pub use descriptor::UserDescriptor;
pub use dto::UserDto;
pub use model::User;
