use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use salon_site::catalog::{format_date, format_price, DEFAULT_RECENT_POSTS};
use salon_site::content::ResourceKey;
use salon_site::forms::{FormSchema, FormValues};
use salon_site::submissions::{attach_item, LogNotifier, SubmissionKind};
use salon_site::{Config, Salon};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "salon", version, about = "Spike Salon content and booking tool")]
struct Cli {
    /// TOML config file; SALON_* environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one content collection and print it as JSON.
    Content {
        key: String,
        /// Fail instead of using the bundled copy when nothing else answers.
        #[arg(long)]
        no_fallback: bool,
    },
    /// Load every collection the pages need.
    Prefetch,
    /// List services, optionally filtered.
    Services {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// List blog posts, newest first.
    Posts {
        #[arg(long)]
        tag: Option<String>,
        #[arg(long, default_value_t = DEFAULT_RECENT_POSTS)]
        recent: usize,
    },
    /// Validate form fields given as name=value pairs.
    Validate {
        form: FormKind,
        fields: Vec<String>,
    },
    /// Validate and store a submission.
    Submit {
        form: FormKind,
        /// Service or package id the booking is for.
        #[arg(long)]
        item: Option<String>,
        fields: Vec<String>,
    },
    /// Show or clear stored submissions.
    Records {
        form: FormKind,
        #[arg(long)]
        clear: bool,
    },
    /// Set or remove the local override for a collection.
    Override {
        key: String,
        #[arg(long, conflicts_with = "remove")]
        file: Option<PathBuf>,
        #[arg(long)]
        remove: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormKind {
    Booking,
    Contact,
}

impl From<FormKind> for SubmissionKind {
    fn from(kind: FormKind) -> Self {
        match kind {
            FormKind::Booking => SubmissionKind::Booking,
            FormKind::Contact => SubmissionKind::Contact,
        }
    }
}

fn parse_fields(pairs: &[String]) -> Result<FormValues> {
    pairs
        .iter()
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("Expected name=value, got {pair:?}"))?;
            Ok((name.trim().to_string(), value.to_string()))
        })
        .collect()
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    salon_site::init_tracing();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let salon = Salon::from_config(config)?;

    match cli.command {
        Command::Content { key, no_fallback } => {
            let key = ResourceKey::new(key);
            let value: Value = if no_fallback {
                salon.cache.resolve(&key, None).await?
            } else {
                let fallback = salon_site::catalog::bundled::fallback_for(&key)
                    .map(serde_json::from_str::<Value>)
                    .transpose()?;
                salon.cache.resolve(&key, fallback).await?
            };
            print_json(&value)?;
        }
        Command::Prefetch => {
            let loaded = salon.catalog.prefetch().await;
            println!("Loaded {loaded} collections");
        }
        Command::Services { category, search } => {
            let services = match (category, search) {
                (Some(category), _) => salon.catalog.services_by_category(&category).await?,
                (None, Some(query)) => salon.catalog.search_services(&query).await?,
                (None, None) => salon.catalog.services().await?,
            };
            for service in services {
                println!(
                    "{:<28} {:<20} {:>12}  {} ({})",
                    service.name,
                    service.category,
                    format_price(service.price),
                    service.duration,
                    service.payment_type
                );
            }
        }
        Command::Posts { tag, recent } => {
            let posts = match tag {
                Some(tag) => salon.catalog.blog_posts_by_tag(&tag).await?,
                None => salon.catalog.recent_blog_posts(recent).await?,
            };
            for post in posts {
                println!("{}  {} by {}", format_date(post.date), post.title, post.author);
            }
        }
        Command::Validate { form, fields } => {
            let schema = match form {
                FormKind::Booking => FormSchema::booking(),
                FormKind::Contact => FormSchema::contact(),
            };
            let report = salon.validator.validate_form(&schema, &parse_fields(&fields)?);
            print_json(&report)?;
            if !report.is_valid() {
                bail!("{} field(s) failed validation", report.errors.len());
            }
        }
        Command::Submit { form, item, fields } => {
            let mut values = parse_fields(&fields)?;
            if let Some(id) = item {
                let Some(item) = salon.catalog.booking_item(&id).await? else {
                    bail!("No service or package with id {id:?}");
                };
                if let Some(deposit) = item.deposit() {
                    info!(deposit = %format_price(deposit), "Deposit required to secure this booking");
                }
                attach_item(&mut values, &item);
            }
            let submitter = salon.submitter(form.into(), Arc::new(LogNotifier));
            let record = submitter.submit(values).await?;
            print_json(&record)?;
        }
        Command::Records { form, clear } => {
            let store = salon.store(form.into());
            if clear {
                store.clear()?;
            } else {
                print_json(&store.list()?)?;
            }
        }
        Command::Override { key, file, remove } => {
            let key = ResourceKey::new(key);
            match (file, remove) {
                (_, true) => salon.cache.remove_override(&key)?,
                (Some(path), false) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    let value: Value = serde_json::from_str(&raw)
                        .with_context(|| format!("{} is not valid JSON", path.display()))?;
                    salon.cache.set_override(&key, &value)?;
                }
                (None, false) => bail!("Pass --file <path> or --remove"),
            }
        }
    }

    Ok(())
}
