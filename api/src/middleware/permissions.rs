//! Role permissions

use quickdesk_support::Role;
use std::collections::HashSet;

/// Permission enum for role-based access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    // Chat
    ChatParticipate,

    // Agents
    AgentsRate,

    // Categories
    CategoriesWrite,

    // Users
    UsersRead,

    // Admin
    Admin,
}

impl Permission {
    /// Get all permissions for a role
    pub fn for_role(role: Role) -> HashSet<Permission> {
        match role {
            Role::Admin => Self::all(),
            Role::Agent | Role::User => Self::member(),
        }
    }

    fn all() -> HashSet<Permission> {
        use Permission::*;
        [
            ChatParticipate,
            AgentsRate,
            CategoriesWrite,
            UsersRead,
            Admin,
        ].into_iter().collect()
    }

    /// Users and agents share a set; what differs between them is scoped per ticket.
    fn member() -> HashSet<Permission> {
        use Permission::*;
        [ChatParticipate, AgentsRate].into_iter().collect()
    }
}

/// Check if a set of permissions allows an action
pub fn has_permission(permissions: &HashSet<Permission>, required: Permission) -> bool {
    permissions.contains(&Permission::Admin) || permissions.contains(&required)
}
