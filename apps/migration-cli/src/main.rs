use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use pickem::{connect_db, DbKind, DbProfile};
use tracing::error;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(c: Command) -> Self {
        match c {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Prod,
    Test,
}

/// Postgres only: an in-memory SQLite database would vanish with the process.
#[derive(Parser)]
#[command(name = "migration", about = "pickem database migration tool")]
struct Args {
    #[arg(value_enum)]
    command: Command,

    /// Which database (PROD_DB or TEST_DB) to target
    #[arg(short, long, value_enum, default_value = "test")]
    profile: Profile,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();
    let profile = match args.profile {
        Profile::Prod => DbProfile::Prod,
        Profile::Test => DbProfile::Test,
    };

    let conn = match connect_db(DbKind::Postgres, profile).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "could not connect");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command.into()).await {
        error!(error = %e, "migration failed");
        std::process::exit(1);
    }
}
