//! Document and file id generation.

use uuid::Uuid;

/// Mints a platform-valid unique id (32 lowercase hex chars).
pub fn unique() -> String {
    Uuid::new_v4().simple().to_string()
}
