//! Request authentication and authorization

pub mod auth;
pub mod permissions;

pub use auth::AuthUser;
pub use permissions::Permission;
