use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use client_core::{normalize_api_url, ClientError, ContactApi, ContactClient, DEFAULT_API_URL};
use shared::domain::{sorted_by, ContactId, NewContact, SortCriterion};

#[derive(Parser, Debug)]
#[command(
    name = "contacts",
    about = "Manage contacts held by a remote contact service"
)]
struct Args {
    /// Base URL of the contact service. Falls back to CONTACT_API_URL,
    /// then to the default local address.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the collection and print it in the requested order.
    List {
        #[arg(long, default_value_t = SortCriterion::Newest)]
        sort: SortCriterion,
    },
    /// Create a new contact and print the server-assigned id.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Delete a contact by id, after confirmation.
    Delete {
        id: String,
        /// Skip the interactive confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let api_url = resolve_api_url(args.api_url)?;
    let client = ContactClient::new(api_url);

    match args.command {
        Command::List { sort } => {
            let contacts = match client.list_contacts().await {
                Ok(contacts) => contacts,
                Err(err) => bail!(failure_text("Failed to fetch contacts", &err)),
            };
            if contacts.is_empty() {
                println!("No contacts yet. Add your first contact!");
                return Ok(());
            }
            println!("Contacts ({})", contacts.len());
            for contact in sorted_by(&contacts, sort) {
                print_contact(&contact);
            }
        }
        Command::Add {
            name,
            email,
            phone,
            message,
        } => {
            let draft = NewContact {
                name,
                email,
                phone,
                message,
            };
            match client.create_contact(&draft).await {
                Ok(created) => println!("Contact added successfully! id={}", created.id),
                Err(err) => bail!(failure_text("Failed to add contact", &err)),
            }
        }
        Command::Delete { id, yes } => {
            let id = ContactId(id);
            if !yes && !confirm_deletion(&id)? {
                println!("Aborted; contact {id} was not deleted.");
                return Ok(());
            }
            match client.delete_contact(&id).await {
                Ok(()) => println!("Contact deleted successfully!"),
                Err(err) => bail!(failure_text("Failed to delete contact", &err)),
            }
        }
    }

    Ok(())
}

fn resolve_api_url(flag: Option<String>) -> Result<String> {
    let raw = flag
        .or_else(|| std::env::var("CONTACT_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    Ok(normalize_api_url(&raw)?)
}

fn print_contact(contact: &shared::domain::Contact) {
    let stamp = contact
        .created_at
        .with_timezone(&Local)
        .format("%b %e, %Y %I:%M %p");
    println!("{}  {}", contact.id, contact.name);
    println!("    added {stamp}");
    println!("    email {}  phone {}", contact.email, contact.phone);
    if let Some(message) = contact.message_text() {
        println!("    \"{message}\"");
    }
}

fn confirm_deletion(id: &ContactId) -> Result<bool> {
    print!("Are you sure you want to delete contact {id}? [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

// Server-reported errors surface verbatim; everything else gets the
// operation's generic text plus the transport cause.
fn failure_text(generic: &str, err: &ClientError) -> String {
    match err.server_message() {
        Some(message) => message.to_string(),
        None => format!("{generic}: {err}"),
    }
}
