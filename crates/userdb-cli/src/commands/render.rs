//! Rendering of command outcomes for stdout

use userdb_core::errors::{ExError, ExErrorKind};
use userdb_core::model::User;
use userdb_engine::{UserCommandResult, UserOp};

use crate::config::OutputFormat;

/// Render an outcome in the requested format
///
/// # Errors
/// * `Serialization` - The outcome could not be written as JSON
pub fn render(result: &UserCommandResult, format: OutputFormat) -> Result<String, ExError> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => serde_json::to_string_pretty(result).map_err(serialization_error),
    }
}

fn serialization_error(err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("render")
        .with_message(err.to_string())
}

/// Human-readable message, one line per user for listings
pub fn render_text(result: &UserCommandResult) -> String {
    match result {
        UserCommandResult::Initialized { .. } => "Database Initialized".to_string(),
        UserCommandResult::Found { user } | UserCommandResult::Created { user } => {
            user.to_string()
        }
        UserCommandResult::AllUsers { users } => user_lines(users, "No users found"),
        UserCommandResult::EmailChanged { user } => {
            format!("Updated {}'s email to {}", user.username, user.email)
        }
        UserCommandResult::Deleted { username } => format!("{} deleted", username),
        UserCommandResult::Matches { users } | UserCommandResult::Page { users, .. } => {
            user_lines(users, "No users found..")
        }
        UserCommandResult::NotFound { op, username } => match op {
            UserOp::ChangeEmail => format!("{} not found! Unable to update email.", username),
            UserOp::DeleteUser => format!("{} not found! Unable to delete user.", username),
            _ => format!("{} not found!", username),
        },
        UserCommandResult::Conflict { .. } => "Username or email already taken!".to_string(),
    }
}

fn user_lines(users: &[User], empty: &str) -> String {
    if users.is_empty() {
        return empty.to_string();
    }
    users
        .iter()
        .map(User::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> User {
        User::new(
            id,
            name.to_string(),
            format!("{}@mail.com", name),
            "$argon2id$secret".to_string(),
        )
    }

    #[test]
    fn test_not_found_messages_per_op() {
        let msg = |op| {
            render_text(&UserCommandResult::NotFound {
                op,
                username: "ghost".to_string(),
            })
        };
        assert_eq!(msg(UserOp::GetUser), "ghost not found!");
        assert_eq!(
            msg(UserOp::ChangeEmail),
            "ghost not found! Unable to update email."
        );
        assert_eq!(
            msg(UserOp::DeleteUser),
            "ghost not found! Unable to delete user."
        );
    }

    #[test]
    fn test_empty_listings_differ_by_op() {
        assert_eq!(
            render_text(&UserCommandResult::AllUsers { users: vec![] }),
            "No users found"
        );
        assert_eq!(
            render_text(&UserCommandResult::Matches { users: vec![] }),
            "No users found.."
        );
    }

    #[test]
    fn test_listing_prints_one_line_per_user() {
        let text = render_text(&UserCommandResult::AllUsers {
            users: vec![user(1, "bob"), user(2, "amy")],
        });
        assert_eq!(
            text,
            "User(id=1, username=bob, email=bob@mail.com)\n\
             User(id=2, username=amy, email=amy@mail.com)"
        );
    }

    #[test]
    fn test_mutation_messages() {
        assert_eq!(
            render_text(&UserCommandResult::EmailChanged { user: user(1, "bob") }),
            "Updated bob's email to bob@mail.com"
        );
        assert_eq!(
            render_text(&UserCommandResult::Deleted {
                username: "bob".to_string()
            }),
            "bob deleted"
        );
        assert_eq!(
            render_text(&UserCommandResult::Conflict {
                username: "bob".to_string(),
                email: "bob@mail.com".to_string()
            }),
            "Username or email already taken!"
        );
    }

    #[test]
    fn test_json_omits_password() {
        let found = UserCommandResult::Found { user: user(1, "bob") };
        let json = render(&found, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["outcome"], "found");
        assert_eq!(value["user"]["username"], "bob");
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_json_failure_maps_to_serialization_kind() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        let err = serialization_error(cause);

        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.code(), "ERR_SERIALIZATION");
        assert_eq!(err.op(), Some("render"));
    }
}
