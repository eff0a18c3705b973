//! User subcommands
//!
//! Usage:
//!   userdb get-user <USERNAME>
//!   userdb change-email <USERNAME> <NEW_EMAIL>
//!   userdb create-user <USERNAME> <EMAIL> <PASSWORD>
//!   userdb delete-user <USERNAME>
//!   userdb find-user [USERNAME] [EMAIL] [--username <U>] [--email <E>]
//!   userdb list-n-users [LIMIT] [OFFSET]

use clap::Args;
use userdb_core::model::{
    NewUser, PageRequest, UserSearch, DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_OFFSET,
};
use userdb_engine::{apply_user_command, UserCommand};
use userdb_store::Database;

use crate::commands::render;
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct GetUserArgs {
    /// The username of the user to retrieve
    pub username: String,
}

#[derive(Debug, Args)]
pub struct ChangeEmailArgs {
    /// The username of the user whose email is to be changed
    pub username: String,

    /// The new email address
    pub new_email: String,
}

#[derive(Debug, Args)]
pub struct CreateUserArgs {
    /// The username of the new user
    pub username: String,

    /// The email of the new user
    pub email: String,

    /// The password of the new user
    pub password: String,
}

#[derive(Debug, Args)]
pub struct DeleteUserArgs {
    /// The username of the user to delete
    pub username: String,
}

#[derive(Debug, Args)]
pub struct FindUserArgs {
    /// Username substring to search for
    #[arg(value_name = "USERNAME")]
    pub username: Option<String>,

    /// Email substring to search for
    #[arg(value_name = "EMAIL")]
    pub email: Option<String>,

    /// Username substring (overrides the positional)
    #[arg(long = "username", value_name = "USERNAME")]
    pub username_opt: Option<String>,

    /// Email substring (overrides the positional)
    #[arg(long = "email", value_name = "EMAIL")]
    pub email_opt: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListNUsersArgs {
    /// The number of users to list
    #[arg(default_value_t = DEFAULT_PAGE_LIMIT)]
    pub limit: u32,

    /// The number of users to skip
    #[arg(default_value_t = DEFAULT_PAGE_OFFSET)]
    pub offset: u32,
}

impl From<GetUserArgs> for UserCommand {
    fn from(args: GetUserArgs) -> Self {
        UserCommand::GetUser {
            username: args.username,
        }
    }
}

impl From<ChangeEmailArgs> for UserCommand {
    fn from(args: ChangeEmailArgs) -> Self {
        UserCommand::ChangeEmail {
            username: args.username,
            new_email: args.new_email,
        }
    }
}

impl From<CreateUserArgs> for UserCommand {
    fn from(args: CreateUserArgs) -> Self {
        UserCommand::CreateUser {
            new_user: NewUser::new(args.username, args.email, args.password),
        }
    }
}

impl From<DeleteUserArgs> for UserCommand {
    fn from(args: DeleteUserArgs) -> Self {
        UserCommand::DeleteUser {
            username: args.username,
        }
    }
}

impl From<FindUserArgs> for UserCommand {
    fn from(args: FindUserArgs) -> Self {
        UserCommand::FindUser {
            search: UserSearch::new(
                args.username_opt.or(args.username),
                args.email_opt.or(args.email),
            ),
        }
    }
}

impl From<ListNUsersArgs> for UserCommand {
    fn from(args: ListNUsersArgs) -> Self {
        UserCommand::ListNUsers {
            page: PageRequest::new(args.limit, args.offset),
        }
    }
}

/// Run one command against the configured database and print its outcome
pub fn execute(
    command: UserCommand,
    global: &GlobalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open_lazy(&global.db);
    tracing::debug!(db = %global.db.display(), op = %command.op(), "dispatching");

    let result = apply_user_command(command, &mut db)?;

    println!("{}", render::render(&result, global.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_args(
        username: Option<&str>,
        email: Option<&str>,
        username_opt: Option<&str>,
        email_opt: Option<&str>,
    ) -> FindUserArgs {
        FindUserArgs {
            username: username.map(String::from),
            email: email.map(String::from),
            username_opt: username_opt.map(String::from),
            email_opt: email_opt.map(String::from),
        }
    }

    fn search_of(cmd: UserCommand) -> UserSearch {
        match cmd {
            UserCommand::FindUser { search } => search,
            other => panic!("Expected FindUser, got {:?}", other),
        }
    }

    #[test]
    fn test_find_named_options_override_positionals() {
        let search = search_of(find_args(Some("bob"), Some("mail"), Some("amy"), None).into());
        assert_eq!(search.username.as_deref(), Some("amy"));
        assert_eq!(search.email.as_deref(), Some("mail"));
    }

    #[test]
    fn test_find_email_only_via_option() {
        let search = search_of(find_args(None, None, None, Some("corp")).into());
        assert_eq!(search.username, None);
        assert_eq!(search.email.as_deref(), Some("corp"));
    }

    #[test]
    fn test_find_empty_needle_is_absent() {
        let search = search_of(find_args(Some(""), None, None, None).into());
        assert!(search.is_unfiltered());
    }

    #[test]
    fn test_list_args_map_to_page() {
        let cmd: UserCommand = ListNUsersArgs { limit: 3, offset: 6 }.into();
        match cmd {
            UserCommand::ListNUsers { page } => assert_eq!(page, PageRequest::new(3, 6)),
            other => panic!("Expected ListNUsers, got {:?}", other),
        }
    }
}
