//! Terminal front-end for the client records engine.
//!
//! Drives the same controllers a graphical view would: the creation form,
//! the list view with inline edit, and delete with confirmation.

use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use client_records::config::validation::validate_config;
use client_records::config::{default_config, load_config, ConfigError};
use client_records::domain::{ClientField, Cliente};
use client_records::forms::{CommitOutcome, SubmitOutcome};
use client_records::lifecycle::signals::shutdown_signal;
use client_records::observability::logging;
use client_records::repository::Snapshot;
use client_records::views::{ClientListView, Confirm, DeleteOutcome};
use client_records::Services;

#[derive(Parser)]
#[command(name = "client-records")]
#[command(about = "Manage client records over a REST backend", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override backend.base_url
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the client list
    List,
    /// Print the client list every time it changes, until Ctrl+C
    Watch,
    /// Create a client through the creation form
    Create(CreateArgs),
    /// Edit one client inline and save it
    Edit {
        id: String,
        #[command(flatten)]
        changes: EditArgs,
    },
    /// Delete a client
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    nombre: String,
    #[arg(long)]
    apellido1: String,
    #[arg(long)]
    apellido2: String,
    #[arg(long)]
    direccion: String,
    #[arg(long)]
    telefono: String,
    /// hombre | mujer
    #[arg(long)]
    sexo: String,
}

impl CreateArgs {
    fn values(&self) -> [(ClientField, &str); 6] {
        [
            (ClientField::Nombre, self.nombre.as_str()),
            (ClientField::Apellido1, self.apellido1.as_str()),
            (ClientField::Apellido2, self.apellido2.as_str()),
            (ClientField::Direccion, self.direccion.as_str()),
            (ClientField::Telefono, self.telefono.as_str()),
            (ClientField::Sexo, self.sexo.as_str()),
        ]
    }
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    nombre: Option<String>,
    #[arg(long)]
    apellido1: Option<String>,
    #[arg(long)]
    apellido2: Option<String>,
    #[arg(long)]
    direccion: Option<String>,
    #[arg(long)]
    telefono: Option<String>,
    #[arg(long)]
    sexo: Option<String>,
}

impl EditArgs {
    fn changes(&self) -> Vec<(ClientField, &str)> {
        [
            (ClientField::Nombre, &self.nombre),
            (ClientField::Apellido1, &self.apellido1),
            (ClientField::Apellido2, &self.apellido2),
            (ClientField::Direccion, &self.direccion),
            (ClientField::Telefono, &self.telefono),
            (ClientField::Sexo, &self.sexo),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

/// Yes/no prompt on the terminal.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí"),
            Err(_) => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let load_timeout = Duration::from_secs(config.backend.request_timeout_secs + 1);
    let services = Services::from_config(config)?;

    match cli.command {
        Commands::List => {
            let mut view = services.list_view();
            let snapshot = first_snapshot(&mut view, load_timeout).await?;
            print_rows(&snapshot);
        }
        Commands::Watch => {
            let mut view = services.list_view();
            let shutdown = shutdown_signal();
            tokio::pin!(shutdown);
            loop {
                tokio::select! {
                    snapshot = view.next_snapshot() => match snapshot {
                        Some(snapshot) => print_rows(&snapshot),
                        None => break,
                    },
                    _ = &mut shutdown => break,
                }
            }
        }
        Commands::Create(args) => {
            let mut form = services.creation_form();
            for (field, value) in args.values() {
                form.input(field, value);
            }
            match form.submit().await {
                SubmitOutcome::Created(created) => {
                    println!("{}", serde_json::to_string_pretty(&created)?);
                }
                SubmitOutcome::Rejected => {
                    for field in ClientField::ALL {
                        if let Some(message) = form.field_error(field) {
                            eprintln!("{}: {}", field, message);
                        }
                    }
                    return Err("client not created: invalid fields".into());
                }
                SubmitOutcome::Failed(e) => return Err(e.into()),
            }
        }
        Commands::Edit { id, changes } => {
            let mut view = services.list_view();
            let snapshot = first_snapshot(&mut view, load_timeout).await?;
            let record = find_row(&snapshot, &id)?;

            view.start_edit(&record)?;
            for (field, raw) in changes.changes() {
                match view.field_input(field, raw) {
                    Some(stored) if stored != raw => {
                        eprintln!("{}: stored as '{}'", field, stored);
                    }
                    Some(_) => {}
                    None => eprintln!("{}: '{}' ignored", field, raw),
                }
            }

            match view.commit().await {
                CommitOutcome::Committed(updated) => {
                    println!("{}", serde_json::to_string_pretty(&updated)?);
                }
                CommitOutcome::Invalid => {
                    for field in ClientField::ALL {
                        if let Some(message) = view.field_error(field) {
                            eprintln!("{}: {}", field, message);
                        }
                    }
                    return Err("client not updated: invalid fields".into());
                }
                CommitOutcome::Failed(e) | CommitOutcome::Superseded(Err(e)) => return Err(e.into()),
                CommitOutcome::Superseded(Ok(_)) | CommitOutcome::NotEditing => {}
            }
        }
        Commands::Delete { id, yes } => {
            let mut view = services.list_view();
            let snapshot = first_snapshot(&mut view, load_timeout).await?;
            let record = find_row(&snapshot, &id)?;

            let outcome = if yes {
                view.delete_row(&record, &|_: &str| true).await
            } else {
                view.delete_row(&record, &StdinConfirm).await
            };
            match outcome {
                DeleteOutcome::Deleted => println!("Deleted {}", id),
                DeleteOutcome::Declined => println!("Cancelled"),
                DeleteOutcome::Failed(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

async fn first_snapshot(
    view: &mut ClientListView,
    limit: Duration,
) -> Result<Snapshot, Box<dyn std::error::Error>> {
    match tokio::time::timeout(limit, view.wait_for(1)).await {
        Ok(Some(snapshot)) => Ok(snapshot),
        Ok(None) => Err("client list feed stopped".into()),
        Err(_) => match view.load_failure() {
            Some(failure) => Err(format!("could not load the client list: {}", failure.message).into()),
            None => Err("timed out loading the client list".into()),
        },
    }
}

fn find_row(snapshot: &Snapshot, id: &str) -> Result<Cliente, Box<dyn std::error::Error>> {
    snapshot
        .clients
        .iter()
        .find(|c| c.id.as_ref().is_some_and(|cid| cid.to_string() == id))
        .cloned()
        .ok_or_else(|| format!("no client with id {}", id).into())
}

fn print_rows(snapshot: &Snapshot) {
    println!("-- generation {} ({} clients)", snapshot.generation, snapshot.clients.len());
    for client in snapshot.clients.iter() {
        let id = client.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        let f = &client.fields;
        println!(
            "{:>6}  {} {} {}  |  {}  |  {}  |  {}",
            id, f.nombre, f.apellido1, f.apellido2, f.direccion, f.telefono, f.sexo
        );
    }
}
