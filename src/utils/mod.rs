pub mod http;
pub mod parse;
pub mod time;


use teloxide::types::User;

/// Best-effort display name for a Telegram user.
pub fn display_name(user: &User) -> String {
    if let Some(username) = &user.username {
        return format!("@{}", username);
    }

    let full_name = user.full_name();
    let full_name = full_name.trim();
    if full_name.is_empty() {
        user.id.to_string()
    } else {
        full_name.to_string()
    }
}
