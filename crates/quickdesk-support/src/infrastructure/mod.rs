//! Infrastructure layer

pub mod persistence;
pub mod mail;

pub use persistence::*;
pub use mail::LogMailer;
