use anyhow::Context;
use clap::Parser;
use commentgate::application::{
    init::init, ConfigService, CreateCommentService, FetchCommentsService, PublishService,
    UpdateCommentService,
};
use commentgate::cli::{format_comment, format_comment_list, Cli, Commands};
use commentgate::domain::{CandidateFilter, CommentId, CommentPayload, RoleSet};
use commentgate::error::GateError;
use commentgate::infrastructure::{init_logging, FileSystemRepository};
use std::io::Read;
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => match e.downcast_ref::<GateError>() {
            Some(gate) => {
                eprintln!("Error: {}", gate.display_with_suggestions());
                std::process::exit(gate.exit_code());
            }
            None => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        },
    }
}

fn open_store() -> anyhow::Result<FileSystemRepository> {
    let repo = FileSystemRepository::discover()?;
    let config = repo.load_config()?;
    init_logging(&config.effective_log_filter());
    Ok(repo)
}

fn read_payload(file: Option<&Path>) -> anyhow::Result<CommentPayload> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read payload from stdin")?;
            buffer
        }
    };

    let payload: CommentPayload =
        serde_json::from_str(&raw).map_err(|e| GateError::InvalidPayload(e.to_string()))?;
    Ok(payload)
}

fn not_found(id: &CommentId) -> anyhow::Error {
    GateError::CommentNotFound(id.to_string()).into()
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init { path } => {
            let directive =
                std::env::var("COMMENTGATE_LOG").unwrap_or_else(|_| "warn".to_string());
            init_logging(&directive);
            init(&path)?;
            println!("Initialized commentgate store at {}", path.display());
            Ok(())
        }
        Commands::Get {
            id,
            periods,
            fields,
            roles,
        } => {
            let repo = open_store()?;
            let id = id.as_deref().map(CommentId::parse).transpose()?;
            let filter = CandidateFilter::from_request(id, periods);
            let roles = RoleSet::parse(&roles);

            let fields = if fields.is_empty() {
                repo.load_config()?.default_fields
            } else {
                fields
            };

            let comments =
                FetchCommentsService::new(repo).execute(&filter, fields.as_slice(), &roles)?;
            println!("{}", format_comment_list(&comments)?);
            Ok(())
        }
        Commands::Create { file } => {
            let repo = open_store()?;
            let payload = read_payload(file.as_deref())?;
            let comment = CreateCommentService::new(repo).execute(payload)?;
            println!("{}", format_comment(&comment)?);
            Ok(())
        }
        Commands::Update { id, file } => {
            let repo = open_store()?;
            let id = CommentId::parse(&id)?;
            let payload = read_payload(file.as_deref())?;
            let comment = UpdateCommentService::new(repo)
                .execute(&id, payload)?
                .ok_or_else(|| not_found(&id))?;
            println!("{}", format_comment(&comment)?);
            Ok(())
        }
        Commands::Publish { id } => {
            let repo = open_store()?;
            let id = CommentId::parse(&id)?;
            let comment = PublishService::new(repo)
                .publish(&id)?
                .ok_or_else(|| not_found(&id))?;
            println!("{}", format_comment(&comment)?);
            Ok(())
        }
        Commands::Unpublish { id } => {
            let repo = open_store()?;
            let id = CommentId::parse(&id)?;
            let comment = PublishService::new(repo)
                .unpublish(&id)?
                .ok_or_else(|| not_found(&id))?;
            println!("{}", format_comment(&comment)?);
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(open_store()?);

            if list {
                let config = service.list()?;
                println!("default_fields = {}", config.default_fields.join(","));
                println!("log_filter = {}", config.log_filter);
                println!("created = {}", config.created.to_rfc3339());
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: commentgate config [--list | <key> [<value>]]");
                println!("Valid keys: default_fields, log_filter, created");
            }
            Ok(())
        }
    }
}
