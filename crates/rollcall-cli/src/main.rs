use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use rollcall_access::AccessEngine;
use rollcall_auth::create_access_token;
use rollcall_cli::explain;
use rollcall_config::{DatabaseConfig, JwtConfig};
use rollcall_db::{PgAccessRepository, init_db_pool};
use rollcall_models::{ResourceId, ResourceKind, Role, SchoolId, UserId};
use rollcall_observability::init_basic_console_logging;

#[derive(Parser)]
#[command(name = "rollcall-cli")]
#[command(about = "Rollcall CLI - Operator tools for the access engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a bearer token signed with JWT_SECRET
    IssueToken {
        /// Subject user ID
        #[arg(short = 's', long)]
        subject: UserId,

        /// Role claim (super_admin, school_admin, principal, teacher, parent)
        #[arg(short = 'r', long)]
        role: Role,

        /// Advisory school claim; never used for access decisions
        #[arg(long)]
        school_id: Option<SchoolId>,
    },
    /// Resolve a token against the database and show its scope
    Explain {
        /// Bearer token to inspect
        #[arg(short = 't', long)]
        token: String,

        /// Resource kind (e.g. students, classes, events)
        #[arg(short = 'k', long)]
        kind: ResourceKind,

        /// Resource ID to decide access for
        #[arg(long)]
        id: Option<ResourceId>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    init_basic_console_logging();

    let cli = Cli::parse();
    let jwt_config = JwtConfig::from_env();

    let result = match cli.command {
        Commands::IssueToken {
            subject,
            role,
            school_id,
        } => create_access_token(subject, role, school_id, &jwt_config)
            .map(|token| println!("{}", token))
            .map_err(|e| anyhow::anyhow!("{}", e.error)),
        Commands::Explain { token, kind, id } => run_explain(jwt_config, &token, kind, id).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_explain(
    jwt_config: JwtConfig,
    token: &str,
    kind: ResourceKind,
    id: Option<ResourceId>,
) -> anyhow::Result<()> {
    let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
    let engine = AccessEngine::new(jwt_config, Arc::new(PgAccessRepository::new(pool.clone())));

    let explanation = explain(&engine, token, kind, id).await;
    pool.close().await;

    println!("{}", serde_json::to_string_pretty(&explanation?)?);
    Ok(())
}
