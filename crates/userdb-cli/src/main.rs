//! userdb CLI
//!
//! Command-line interface for the users database

use clap::{Parser, Subcommand};
use userdb_core::logging_facility;
use userdb_core_types::InvocationId;
use userdb_engine::UserCommand;

mod commands;
mod config;

use commands::users;
use config::GlobalArgs;

#[derive(Debug, Parser)]
#[command(name = "userdb")]
#[command(about = "userdb - Manage users in a SQLite database", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reset the database and insert the default user
    Initialize,
    /// Print a user by exact username
    GetUser(users::GetUserArgs),
    /// Print every user
    GetAllUsers,
    /// Change a user's email address
    ChangeEmail(users::ChangeEmailArgs),
    /// Create a new user
    CreateUser(users::CreateUserArgs),
    /// Delete a user by exact username
    DeleteUser(users::DeleteUserArgs),
    /// Search users by username and/or email substring
    #[command(alias = "finduser")]
    FindUser(users::FindUserArgs),
    /// Print one page of users
    #[command(alias = "listnusers")]
    ListNUsers(users::ListNUsersArgs),
}

impl From<Commands> for UserCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Initialize => UserCommand::Initialize,
            Commands::GetUser(args) => args.into(),
            Commands::GetAllUsers => UserCommand::GetAllUsers,
            Commands::ChangeEmail(args) => args.into(),
            Commands::CreateUser(args) => args.into(),
            Commands::DeleteUser(args) => args.into(),
            Commands::FindUser(args) => args.into(),
            Commands::ListNUsers(args) => args.into(),
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logging_facility::init(cli.global.log_format.profile(), cli.global.log_filter());
    let invocation_id = InvocationId::new();
    let span = tracing::info_span!("invocation", invocation_id = %invocation_id);
    let _guard = span.enter();

    if let Err(e) = users::execute(cli.command.into(), &cli.global) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use config::OutputFormat;
    use userdb_core::model::PageRequest;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_defaults() {
        let cli = Cli::try_parse_from(["userdb", "list-n-users"]).unwrap();
        match UserCommand::from(cli.command) {
            UserCommand::ListNUsers { page } => assert_eq!(page, PageRequest::default()),
            other => panic!("Expected ListNUsers, got {:?}", other),
        }
    }

    #[test]
    fn test_aliases_parse() {
        let cli = Cli::try_parse_from(["userdb", "listnusers", "5", "1"]).unwrap();
        assert!(matches!(
            UserCommand::from(cli.command),
            UserCommand::ListNUsers { page } if page == PageRequest::new(5, 1)
        ));

        let cli = Cli::try_parse_from(["userdb", "finduser", "bob"]).unwrap();
        assert!(matches!(
            UserCommand::from(cli.command),
            UserCommand::FindUser { .. }
        ));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "userdb",
            "get-all-users",
            "--db",
            "/tmp/other.db",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.global.db, std::path::PathBuf::from("/tmp/other.db"));
        assert_eq!(cli.global.format, OutputFormat::Json);
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn test_create_user_requires_password() {
        assert!(Cli::try_parse_from(["userdb", "create-user", "amy", "amy@mail.com"]).is_err());
    }
}
