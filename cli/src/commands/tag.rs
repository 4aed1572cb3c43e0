// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Tag catalog commands
//!
//! Commands: list, show, create, edit, remove

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::{print_pager, truncate};
use crate::embedded::Directory;
use trustlist_tags::domain::{ModifierPolarity, TagDraft, TagSummary, TrustModifier};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TagCommand {
    /// List tags with usage counts
    List {
        /// Case-insensitive text matched against name and description
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one tag
    Show {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Create a tag
    Create {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Trust modifier, clamped to -5..=5
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        modifier: i64,
    },

    /// Edit a tag. Renaming updates every contact carrying it
    Edit {
        #[arg(value_name = "NAME")]
        name: String,

        /// New name
        #[arg(long = "name", value_name = "NEW_NAME")]
        rename: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long, allow_negative_numbers = true)]
        modifier: Option<i64>,
    },

    /// Remove one or more tags. Contacts keep the tag text
    Remove {
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },
}

impl TagCommand {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            TagCommand::Create { .. } | TagCommand::Edit { .. } | TagCommand::Remove { .. }
        )
    }
}

pub async fn handle_command(command: TagCommand, directory: &Directory) -> Result<()> {
    match command {
        TagCommand::List { search, page, json } => {
            list(directory, search.as_deref().unwrap_or(""), page, json).await
        }
        TagCommand::Show { name } => {
            let summary = directory.tags.get_tag(&name).await?;
            let tag = &summary.tag;
            println!("{}", tag.name.bold());
            if !tag.description.is_empty() {
                println!("  Description: {}", tag.description);
            }
            println!("  Modifier:    {}", modifier_badge(tag.trust_modifier));
            println!("  Contacts:    {}", summary.usage_count);
            println!("  Created:     {}", tag.created_at.format("%Y-%m-%d"));
            Ok(())
        }
        TagCommand::Create {
            name,
            description,
            modifier,
        } => {
            let draft = TagDraft::new(name)
                .with_description(description)
                .with_modifier(modifier);
            let tag = directory.tags.create_tag(draft).await?;
            println!("{}", format!("✓ Tag created: {}", tag.name).green());
            Ok(())
        }
        TagCommand::Edit {
            name,
            rename,
            description,
            modifier,
        } => {
            let current = directory.tags.get_tag(&name).await?.tag;
            let draft = TagDraft {
                name: rename.unwrap_or_else(|| current.name.clone()),
                description: description.unwrap_or_else(|| current.description.clone()),
                trust_modifier: modifier.map(TrustModifier::new).unwrap_or(current.trust_modifier),
            };
            let tag = directory.tags.update_tag(&name, draft).await?;
            println!("{}", format!("✓ Tag updated: {}", tag.name).green());
            Ok(())
        }
        TagCommand::Remove { names } => {
            if let [name] = names.as_slice() {
                directory.tags.delete_tag(name).await?;
                println!("{}", format!("✓ Tag removed: {}", name.trim()).green());
            } else {
                let removed = directory.tags.delete_tags(&names).await?;
                println!("{}", format!("✓ {} tag(s) removed", removed).green());
            }
            Ok(())
        }
    }
}

async fn list(directory: &Directory, search: &str, page_number: usize, json: bool) -> Result<()> {
    let page = directory.tags.list_page(search, page_number).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.total_items == 0 {
        if search.trim().is_empty() {
            println!("{}", "No tags defined.".yellow());
        } else {
            println!("{}", format!("No tags match '{}'.", search).yellow());
        }
        return Ok(());
    }

    println!(
        "{:<20} {:<40} {:<8} {}",
        "NAME".bold(),
        "DESCRIPTION".bold(),
        "MOD".bold(),
        "CONTACTS".bold()
    );
    for TagSummary { tag, usage_count } in &page.items {
        println!(
            "{:<20} {:<40} {:<8} {}",
            truncate(&tag.name, 20),
            truncate(&tag.description, 40),
            modifier_badge(tag.trust_modifier),
            usage_count
        );
    }
    print_pager(&page, "tags");
    Ok(())
}

fn modifier_badge(modifier: TrustModifier) -> colored::ColoredString {
    let text = modifier.to_string();
    match modifier.polarity() {
        ModifierPolarity::Positive => text.green(),
        ModifierPolarity::Neutral => text.normal(),
        ModifierPolarity::Negative => text.red(),
    }
}
