//! Permission string construction.
//!
//! Documents carry their grants as strings like `read("user:abc")`.

/// A grantee in a permission string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role(String);

impl Role {
    /// Everyone, authenticated or not.
    pub fn any() -> Self {
        Self("any".to_string())
    }

    /// One specific account.
    pub fn user(id: &str) -> Self {
        Self(format!("user:{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Factory for the grant strings the document API accepts.
pub struct Permission;

impl Permission {
    pub fn read(role: Role) -> String {
        format!("read(\"{}\")", role.as_str())
    }

    pub fn update(role: Role) -> String {
        format!("update(\"{}\")", role.as_str())
    }

    pub fn delete(role: Role) -> String {
        format!("delete(\"{}\")", role.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_scoped_grants() {
        assert_eq!(Permission::read(Role::user("u1")), r#"read("user:u1")"#);
        assert_eq!(Permission::update(Role::user("u1")), r#"update("user:u1")"#);
        assert_eq!(Permission::delete(Role::user("u1")), r#"delete("user:u1")"#);
    }

    #[test]
    fn test_any_role_grant() {
        assert_eq!(Permission::read(Role::any()), r#"read("any")"#);
    }
}
