//! Application layer
//!
//! Services that orchestrate the use cases over the repository ports.

pub mod dto;
pub mod tickets;
pub mod chat;
pub mod notifications;
pub mod agents;
pub mod categories;
pub mod users;

pub use tickets::TicketService;
pub use chat::ChatService;
pub use notifications::NotificationService;
pub use agents::AgentService;
pub use categories::CategoryService;
pub use users::UserService;
