use portal_shell::{AppConfig, Env, NavigationOutcome, build_shell};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point: loads configuration, initializes logging,
/// assembles the navigation core and runs the interactive shell loop used to
/// drive and inspect it.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Prioritizes RUST_LOG, falling back to sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "portal_shell=debug".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!(edition = %config.edition, "portal shell starting in {:?} mode", config.env);

    // 4. Navigation Core Assembly
    // A defective base route table is fatal here, before any interaction.
    let navigator = build_shell(&config).expect("FATAL: base route table is invalid");

    tracing::info!(
        routes = navigator.table().flatten().len(),
        "route table built"
    );

    print_routes(&navigator);
    println!("commands: <route-name> | :login <role> | :logout | :routes | :quit");

    // 5. Shell Loop
    // One transition per line; decisions print as the host UI would act on
    // them.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.split_once(' ') {
            _ if input == ":quit" => break,
            _ if input == ":logout" => {
                navigator.session().logout();
                println!("logged out");
            }
            _ if input == ":routes" => print_routes(&navigator),
            Some((":login", role)) => {
                navigator.session().login("dev-token", role.trim());
                println!("logged in as '{}'", role.trim());
            }
            _ => match navigator.navigate(input).await {
                Ok(NavigationOutcome::Entered { route, view }) => {
                    println!("-> entered '{}' ({})", route, view.title());
                }
                Ok(NavigationOutcome::Redirected { decision, to }) => {
                    println!("-> {} (showing '{}')", decision, to);
                }
                Err(err) => println!("!! {}", err),
            },
        }
    }
}

/// print_routes
///
/// Renders the effective route tree in menu order, with each node's full
/// path and declared access requirements.
fn print_routes(navigator: &portal_shell::Navigator) {
    let table = navigator.table();
    println!("route table (edition: {}):", table.edition());
    for node in table.flatten() {
        let path = table.path_of(&node.name).unwrap_or_default();
        let roles = if node.meta.roles.is_empty() {
            String::new()
        } else {
            format!(
                " roles={}",
                node.meta
                    .roles
                    .iter()
                    .map(|r| r.as_str())
                    .collect::<Vec<_>>()
                    .join("|")
            )
        };
        println!(
            "  {:<24} {:<40}{}{}{}",
            node.name,
            path,
            if node.meta.requires_auth { " auth" } else { "" },
            roles,
            if node.meta.extended_only {
                " extended-only"
            } else {
                ""
            },
        );
    }
}
