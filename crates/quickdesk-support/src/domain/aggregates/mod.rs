//! Aggregates
pub mod ticket;
pub mod user;
pub mod category;
pub mod chat;
pub mod notification;
pub mod rating;
pub use ticket::{Ticket, TicketStatus, Comment};
pub use user::{User, Role, AgentProfile};
pub use category::Category;
pub use chat::{ChatLog, ChatMessage};
pub use notification::{Notification, NotificationKind};
pub use rating::RatingRecord;
