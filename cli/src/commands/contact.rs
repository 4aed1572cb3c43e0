// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Contact commands
//!
//! Commands: list, show, add, edit, remove, apply-suggestion, bulk-trust,
//! bulk-delete, tags

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use std::collections::HashSet;

use super::{print_pager, truncate, trust_badge};
use crate::embedded::Directory;
use trustlist_core::domain::contact::{Contact, ContactId, ContactUpdate, NewContact, TrustLevel};
use trustlist_core::domain::query::ContactQuery;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ContactCommand {
    /// List contacts, filtered and paged
    List {
        /// Case-insensitive text matched against address, name, role and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Only contacts with at least one of these tags (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Only contacts at or above this trust level
        #[arg(long, value_name = "LEVEL")]
        min_trust: Option<i64>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show contact details and suggested trust level
    Show {
        #[arg(value_name = "CONTACT_ID")]
        id: String,

        /// Print contact and suggestion as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a contact
    Add {
        /// Wallet address (0x followed by 40 hex characters)
        #[arg(value_name = "ADDRESS")]
        address: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Trust level 1-10 (default from configuration)
        #[arg(long, value_name = "LEVEL", allow_negative_numbers = true)]
        trust: Option<i64>,
    },

    /// Edit a contact. Omitted fields are left unchanged
    Edit {
        #[arg(value_name = "CONTACT_ID")]
        id: String,

        /// New name (empty string clears it)
        #[arg(long)]
        name: Option<String>,

        /// New role (empty string resets to "Unknown")
        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Replace all tags with these (repeatable)
        #[arg(short, long = "tag", value_name = "TAG", conflicts_with = "clear_tags")]
        tags: Vec<String>,

        /// Remove every tag
        #[arg(long)]
        clear_tags: bool,

        #[arg(long, value_name = "LEVEL", allow_negative_numbers = true)]
        trust: Option<i64>,
    },

    /// Remove a contact
    Remove {
        #[arg(value_name = "CONTACT_ID")]
        id: String,
    },

    /// Set the trust level to the suggested value
    ApplySuggestion {
        #[arg(value_name = "CONTACT_ID")]
        id: String,
    },

    /// Set one trust level on several contacts
    BulkTrust {
        #[arg(value_name = "LEVEL", allow_negative_numbers = true)]
        level: i64,

        #[arg(value_name = "CONTACT_ID", required = true)]
        ids: Vec<String>,
    },

    /// Remove several contacts
    BulkDelete {
        #[arg(value_name = "CONTACT_ID", required = true)]
        ids: Vec<String>,
    },

    /// List tags in use
    Tags {
        /// Include the predefined vocabulary
        #[arg(long)]
        available: bool,
    },
}

impl ContactCommand {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ContactCommand::Add { .. }
                | ContactCommand::Edit { .. }
                | ContactCommand::Remove { .. }
                | ContactCommand::ApplySuggestion { .. }
                | ContactCommand::BulkTrust { .. }
                | ContactCommand::BulkDelete { .. }
        )
    }
}

pub async fn handle_command(command: ContactCommand, directory: &Directory) -> Result<()> {
    match command {
        ContactCommand::List {
            search,
            tags,
            min_trust,
            page,
            json,
        } => {
            let mut query = ContactQuery::new().with_tags(tags);
            if let Some(term) = search {
                query = query.with_search(term);
            }
            if let Some(level) = min_trust {
                query = query.with_min_trust_level(TrustLevel::new(level));
            }
            list(directory, &query, page, json).await
        }
        ContactCommand::Show { id, json } => show(directory, &ContactId::from(id), json).await,
        ContactCommand::Add {
            address,
            name,
            role,
            notes,
            tags,
            trust,
        } => {
            let draft = NewContact {
                address,
                name,
                role,
                notes,
                tags,
                trust_level: trust.map(TrustLevel::new),
            };
            let contact = directory.contacts.add_contact(draft).await?;
            println!(
                "{}",
                format!("✓ Contact added: {} ({})", contact.display_name(), contact.id).green()
            );
            Ok(())
        }
        ContactCommand::Edit {
            id,
            name,
            role,
            notes,
            tags,
            clear_tags,
            trust,
        } => {
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };
            let update = ContactUpdate {
                name,
                role,
                notes,
                tags,
                trust_level: trust.map(TrustLevel::new),
            };
            if update.is_empty() {
                println!("{}", "Nothing to change.".yellow());
                return Ok(());
            }
            let contact = directory.contacts.update_contact(&ContactId::from(id), update).await?;
            println!("{}", format!("✓ Contact updated: {}", contact.display_name()).green());
            Ok(())
        }
        ContactCommand::Remove { id } => {
            directory.contacts.delete_contact(&ContactId::from(id.as_str())).await?;
            println!("{}", format!("✓ Contact removed: {}", id).green());
            Ok(())
        }
        ContactCommand::ApplySuggestion { id } => {
            let level = directory.contacts.apply_suggestion(&ContactId::from(id.as_str())).await?;
            println!(
                "{}",
                format!("✓ Trust level for {} set to suggested {}", id, level).green()
            );
            Ok(())
        }
        ContactCommand::BulkTrust { level, ids } => {
            let level = TrustLevel::new(level);
            let updated = directory.contacts.bulk_set_trust_level(&id_set(ids), level).await?;
            println!(
                "{}",
                format!("✓ Trust level {} applied to {} contact(s)", level, updated).green()
            );
            Ok(())
        }
        ContactCommand::BulkDelete { ids } => {
            let removed = directory.contacts.bulk_delete(&id_set(ids)).await?;
            println!("{}", format!("✓ {} contact(s) removed", removed).green());
            Ok(())
        }
        ContactCommand::Tags { available } => {
            let tags = if available {
                directory.contacts.available_tags().await?
            } else {
                directory.contacts.used_tags().await?
            };
            for tag in tags {
                println!("  {}", tag);
            }
            Ok(())
        }
    }
}

fn id_set(ids: Vec<String>) -> HashSet<ContactId> {
    ids.into_iter().map(ContactId::from).collect()
}

async fn list(directory: &Directory, query: &ContactQuery, page_number: usize, json: bool) -> Result<()> {
    let page = directory.contacts.list_page(query, page_number).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.total_items == 0 {
        if query.is_empty() {
            println!("{}", "No contacts yet. Add one with 'trustlist contact add <ADDRESS>'.".yellow());
        } else {
            println!("{}", "No contacts match the current filters.".yellow());
        }
        return Ok(());
    }
    if page.items.is_empty() {
        println!(
            "{}",
            format!("Page {} is past the end ({} page(s)).", page_number, page.total_pages).yellow()
        );
        return Ok(());
    }

    println!(
        "{:<10} {:<15} {:<18} {:<24} {:<8} {}",
        "ID".bold(),
        "ADDRESS".bold(),
        "NAME".bold(),
        "ROLE".bold(),
        "TRUST".bold(),
        "TAGS".bold()
    );
    for contact in &page.items {
        print_row(contact);
    }
    print_pager(&page, "contacts");
    Ok(())
}

fn print_row(contact: &Contact) {
    let name = contact.name.as_deref().unwrap_or("-");
    println!(
        "{:<10} {:<15} {:<18} {:<24} {:<8} {}",
        truncate(contact.id.as_str(), 10),
        contact.address.short(),
        truncate(name, 18),
        truncate(contact.role_or_unknown(), 24),
        trust_badge(contact.trust_level),
        contact.tags.iter().collect::<Vec<_>>().join(", ").cyan()
    );
}

async fn show(directory: &Directory, id: &ContactId, json: bool) -> Result<()> {
    let contact = directory.contacts.get_contact(id).await?;
    let suggestion = directory.contacts.suggest_trust(id).await?;

    if json {
        let value = serde_json::json!({ "contact": contact, "suggestion": suggestion });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", contact.display_name().bold());
    println!("  ID:           {}", contact.id);
    println!("  Address:      {}", contact.address);
    println!("  Role:         {}", contact.role_or_unknown());
    println!(
        "  Trust:        {} ({})",
        trust_badge(contact.trust_level),
        contact.trust_level.band()
    );
    println!("  Interactions: {}", contact.interaction_count);
    if let Some(last) = contact.last_interaction {
        println!("  Last seen:    {}", last.format("%Y-%m-%d"));
    }
    if !contact.tags.is_empty() {
        println!("  Tags:         {}", contact.tags.iter().collect::<Vec<_>>().join(", ").cyan());
    }
    if !contact.notes.is_empty() {
        println!("  Notes:        {}", contact.notes);
    }
    println!();

    println!("{}", "Suggested trust level:".bold());
    println!("  Interaction base: {:.1}", suggestion.base);
    if suggestion.positive_bonus {
        println!("  Positive tags:    {}", "+2".green());
    }
    if suggestion.negative_penalty {
        println!("  Negative tags:    {}", "-3".red());
    }
    println!("  Suggested:        {}", trust_badge(suggestion.level));
    if suggestion.differs_from(contact.trust_level) {
        println!(
            "{}",
            format!(
                "  Apply with 'trustlist contact apply-suggestion {}'",
                contact.id
            )
            .dimmed()
        );
    }
    Ok(())
}
