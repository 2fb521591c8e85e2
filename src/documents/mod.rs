pub mod access;
pub mod error;
pub mod service;

pub use access::{filter_members, permissions_for, role_of, UserRole, UserType};
pub use error::DocumentError;
