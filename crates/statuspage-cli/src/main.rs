//! statuspage CLI
//!
//! Command-line interface for managing a StatusPage.io page

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use serde::Serialize;
use statuspage_api::{ComponentStatus, IncidentFilter, NewIncident, SubscriberContact};
use statuspage_client::StatusPageClient;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "statuspage")]
#[command(about = "Manage a StatusPage.io status page", long_about = None, version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Page to operate on (defaults to the configured page)
    #[arg(short, long, global = true, env = "STATUSPAGE_PAGE_ID")]
    page: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the page profile
    #[command(subcommand)]
    Page(PageCommand),

    /// Manage components
    #[command(subcommand)]
    Components(ComponentCommand),

    /// Manage incidents
    #[command(subcommand)]
    Incidents(IncidentCommand),

    /// Manage subscribers
    #[command(subcommand)]
    Subscribers(SubscriberCommand),

    /// List metrics providers
    Providers {
        /// Only providers configured on the page
        #[arg(long)]
        for_page: bool,
    },
}

#[derive(Subcommand)]
enum PageCommand {
    /// Print the page profile
    Show,
    /// Change the page's display name
    Rename { name: String },
}

#[derive(Subcommand)]
enum ComponentCommand {
    /// List components
    List,
    /// Create a component
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a component's name and/or status
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// operational, under_maintenance, degraded_performance, partial_outage, major_outage
        #[arg(long)]
        status: Option<ComponentStatus>,
    },
    /// Delete a component
    Delete { id: String },
}

#[derive(Subcommand)]
enum IncidentCommand {
    /// List incidents
    List {
        /// all, unresolved, scheduled, upcoming, active-maintenance
        #[arg(long, default_value = "all")]
        filter: IncidentFilter,
    },
    /// Open a realtime incident
    Create {
        name: String,
        /// First update message
        #[arg(long)]
        body: Option<String>,
        /// Affected component id (repeatable)
        #[arg(long = "component")]
        components: Vec<String>,
        /// Do not notify subscribers
        #[arg(long)]
        quiet: bool,
    },
    /// Delete an incident
    Delete { id: String },
}

#[derive(Subcommand)]
enum SubscriberCommand {
    /// List subscribers
    List,
    /// Subscribe an email address
    AddEmail { email: String },
    /// Subscribe a phone number for SMS
    AddPhone {
        number: String,
        /// ISO 3166-1 alpha-2 country code
        country: String,
    },
    /// Remove a subscriber
    Delete { id: String },
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    }
    .with_env();

    init_tracing(&config.log_level, cli.json_logs);

    let client = StatusPageClient::new(config.client_config()?)?;

    match cli.command {
        Commands::Page(command) => {
            let page_id = config.page_id(cli.page)?;
            page(&client, &page_id, command).await
        }
        Commands::Components(command) => {
            let page_id = config.page_id(cli.page)?;
            components(&client, &page_id, command).await
        }
        Commands::Incidents(command) => {
            let page_id = config.page_id(cli.page)?;
            incidents(&client, &page_id, command).await
        }
        Commands::Subscribers(command) => {
            let page_id = config.page_id(cli.page)?;
            subscribers(&client, &page_id, command).await
        }
        Commands::Providers { for_page: true } => {
            let page_id = config.page_id(cli.page)?;
            print_json(&client.get_metric_providers_for_page(&page_id).await?)
        }
        Commands::Providers { for_page: false } => {
            print_json(&client.get_metric_providers().await?)
        }
    }
}

async fn page(client: &StatusPageClient, page_id: &str, command: PageCommand) -> Result<()> {
    match command {
        PageCommand::Show => print_json(&client.get_page_profile(page_id).await?),
        PageCommand::Rename { name } => {
            let mut page = client.get_page_profile(page_id).await?;
            page.name = name;
            print_json(&client.update_page_profile(&page).await?)
        }
    }
}

async fn components(
    client: &StatusPageClient,
    page_id: &str,
    command: ComponentCommand,
) -> Result<()> {
    match command {
        ComponentCommand::List => {
            for component in client.get_components(page_id).await? {
                println!("{}\t{}\t{}", component.id, component.status, component.name);
            }
            Ok(())
        }
        ComponentCommand::Create { name, description } => {
            let mut new = statuspage_api::NewComponent::new(name);
            if let Some(description) = description {
                new = new.with_description(description);
            }
            print_json(&client.create_component_with(page_id, &new).await?)
        }
        ComponentCommand::Update { id, name, status } => {
            let mut component = client.get_component(page_id, &id).await?;
            if let Some(name) = name {
                component.name = name;
            }
            if let Some(status) = status {
                component.status = status;
            }
            print_json(&client.update_component(page_id, &component).await?)
        }
        ComponentCommand::Delete { id } => {
            client.delete_component(page_id, &id).await?;
            tracing::info!(component = %id, "component deleted");
            Ok(())
        }
    }
}

async fn incidents(
    client: &StatusPageClient,
    page_id: &str,
    command: IncidentCommand,
) -> Result<()> {
    match command {
        IncidentCommand::List { filter } => {
            for incident in client.list_incidents(page_id, filter).await? {
                println!("{}\t{}\t{}", incident.id, incident.status, incident.name);
            }
            Ok(())
        }
        IncidentCommand::Create {
            name,
            body,
            components,
            quiet,
        } => {
            let mut new = NewIncident::realtime(name);
            if let Some(body) = body {
                new = new.with_body(body);
            }
            for component in components {
                new = new.with_component(component);
            }
            if quiet {
                new = new.deliver_notifications(false);
            }
            print_json(&client.create_incident(page_id, &new).await?)
        }
        IncidentCommand::Delete { id } => {
            client.delete_incident(page_id, &id).await?;
            tracing::info!(incident = %id, "incident deleted");
            Ok(())
        }
    }
}

async fn subscribers(
    client: &StatusPageClient,
    page_id: &str,
    command: SubscriberCommand,
) -> Result<()> {
    match command {
        SubscriberCommand::List => {
            for subscriber in client.get_subscribers(page_id).await? {
                let contact = match subscriber.contact() {
                    Some(SubscriberContact::Email(email)) => email.to_string(),
                    Some(SubscriberContact::Phone { number, country }) => {
                        format!("{number} ({country})")
                    }
                    Some(SubscriberContact::Webhook(endpoint)) => endpoint.to_string(),
                    None => "-".to_string(),
                };
                println!("{}\t{contact}", subscriber.id);
            }
            Ok(())
        }
        SubscriberCommand::AddEmail { email } => {
            print_json(&client.create_email_subscriber(page_id, &email).await?)
        }
        SubscriberCommand::AddPhone { number, country } => print_json(
            &client
                .create_phone_subscriber(page_id, &number, &country)
                .await?,
        ),
        SubscriberCommand::Delete { id } => {
            client.delete_subscriber(page_id, &id).await?;
            tracing::info!(subscriber = %id, "subscriber deleted");
            Ok(())
        }
    }
}
