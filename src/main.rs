//! authz - Back-office authorization CLI
//!
//! Resolves effective permissions, evaluates access requirements and walks
//! the route table from the command line.

use anyhow::{Context, bail};
use backoffice_authz::AccessRequirement;
use backoffice_authz::auth::guard::explain;
use backoffice_authz::auth::rbac::{Action, Resource, Role, RoleSet, resolve_permissions};
use backoffice_authz::auth::session::{Identity, SessionSnapshot};
use backoffice_authz::config::Config;
use backoffice_authz::navigation::{RouteOutcome, RouteTable};
use backoffice_authz::utils::crypto::hash_password;
use backoffice_authz::utils::logging::init_logging;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("AUTHZ_GIT_HASH"), ")");

/// Exit code reported when access is denied
const EXIT_DENIED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "authz", version, long_version = LONG_VERSION)]
#[command(about = "Back-office permission resolution and route authorization")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, env = "AUTHZ_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the effective permissions of a role set
    Resolve {
        /// Comma-separated roles, e.g. ADMIN,SALES
        #[arg(long, default_value = "")]
        roles: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate one access requirement against a role set
    Check(CheckArgs),
    /// Resolve a back-office path for a signed-in user
    Route {
        /// Requested path
        #[arg(long)]
        path: String,

        /// Comma-separated roles; omit to resolve as a signed-out visitor
        #[arg(long)]
        roles: Option<String>,

        /// Configuration file with route definitions
        #[arg(long, env = "AUTHZ_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Hash a password for the users section of the configuration
    HashPassword {
        password: String,
    },
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Comma-separated roles
    #[arg(long, default_value = "")]
    roles: String,

    /// Resource for a permission check
    #[arg(long, requires = "action", conflicts_with_all = ["allow", "policy"])]
    resource: Option<Resource>,

    /// Action for a permission check
    #[arg(long, requires = "resource")]
    action: Option<Action>,

    /// Allow-list of roles
    #[arg(long, value_delimiter = ',', num_args = 1.., conflicts_with = "policy")]
    allow: Option<Vec<Role>>,

    /// Fixed policy outcome
    #[arg(long)]
    policy: Option<bool>,
}

impl CheckArgs {
    fn requirement(&self) -> anyhow::Result<AccessRequirement> {
        if let (Some(resource), Some(action)) = (self.resource, self.action) {
            return Ok(AccessRequirement::permission(resource, action));
        }
        if let Some(allow) = &self.allow {
            return Ok(AccessRequirement::roles(allow.iter().copied()));
        }
        if let Some(policy) = self.policy {
            return Ok(AccessRequirement::policy(policy));
        }
        bail!("one of --resource/--action, --allow or --policy is required")
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level, cli.json_logs) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Resolve { roles, json } => {
            let roles = RoleSet::parse_list(&roles)?;
            let permissions = resolve_permissions(&roles);

            if json {
                println!("{}", permissions.to_json()?);
            } else {
                println!("roles: {}", roles);
                for resource in Resource::ALL {
                    let actions: Vec<&str> = permissions
                        .actions_on(resource)
                        .into_iter()
                        .map(Action::as_str)
                        .collect();
                    println!("  {:<10} {}", resource.as_str(), actions.join(","));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check(args) => {
            let roles = RoleSet::parse_list(&args.roles)?;
            let requirement = args.requirement()?;
            let decision = explain(&requirement, &roles);
            debug!("{} for {} -> {:?}", requirement, roles, decision);

            if decision.granted {
                println!("allow");
                Ok(ExitCode::SUCCESS)
            } else {
                match decision.reason {
                    Some(reason) => println!("deny: {}", reason),
                    None => println!("deny"),
                }
                Ok(ExitCode::from(EXIT_DENIED))
            }
        }
        Command::Route {
            path,
            roles,
            config,
        } => {
            let config = match config {
                Some(file) => Config::from_file(&file)
                    .await
                    .with_context(|| format!("loading {}", file.display()))?,
                None => Config::default(),
            };
            let table = RouteTable::from_config(&config);

            let session = match roles {
                Some(roles) => {
                    let roles = RoleSet::parse_list(&roles)?;
                    let identity = Identity::new("cli@localhost", "CLI", roles);
                    SessionSnapshot::authenticated(identity, Utc::now())
                }
                None => SessionSnapshot::unauthenticated(),
            };

            match table.resolve(&path, &session) {
                RouteOutcome::Allow => {
                    println!("allow");
                    Ok(ExitCode::SUCCESS)
                }
                RouteOutcome::Redirect(target) => {
                    println!("redirect {}", target);
                    Ok(ExitCode::from(EXIT_DENIED))
                }
                RouteOutcome::NotFound => {
                    println!("not found");
                    Ok(ExitCode::from(EXIT_DENIED))
                }
            }
        }
        Command::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
