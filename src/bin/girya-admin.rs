//! Operational CLI: migrations and admin promotion.

use clap::{Parser, Subcommand};

use girya::services::{users, ServiceError};
use girya::{config, db};

#[derive(Parser)]
#[command(name = "girya-admin", about = "Girya operational tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending database migrations
    Migrate,
    /// Grant the admin auth group to an existing user
    Promote {
        /// E-mail address of the user to promote
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = config::config();
    let pool = db::connect(&config.database).await?;

    match cli.command {
        Commands::Migrate => {
            db::migrate(&pool).await?;
            println!("Migrations applied");
        }
        Commands::Promote { email } => {
            let mut conn = pool.acquire().await?;
            match users::promote_to_admin(&mut conn, &email).await {
                Ok(()) => println!("Made '{email}' an admin"),
                Err(ServiceError::NotFound(_)) => {
                    eprintln!("Could not find user '{email}'");
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
