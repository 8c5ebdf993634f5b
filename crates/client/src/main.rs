use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codenote_client::access::AccessGate;
use codenote_client::config::ClientConfig;
use codenote_client::editor::{EditorOptions, NoteEditor, SaveOutcome};
use codenote_client::home::HomeView;
use codenote_client::identity::LocalIdentity;
use codenote_client::notify::{Notifier, ToastKind};
use codenote_client::route::Route;
use codenote_client::store::{HttpNoteStore, SharedStore};
use codenote_core::note_code::NoteCode;
use codenote_core::owner::OwnerId;

use crate::cli::{Cli, Command};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codenote_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    let owner = LocalIdentity::load_or_create(&config.identity_file).await?;
    let store: SharedStore = Arc::new(
        HttpNoteStore::new(&config.api_url, config.request_timeout)
            .context("Failed to build HTTP client")?,
    );

    let notifier = Notifier::default();
    let mut toasts = notifier.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(toast) = toasts.recv().await {
            match toast.kind {
                ToastKind::Success => eprintln!("{}", toast.message),
                ToastKind::Error => eprintln!("error: {}", toast.message),
            }
        }
    });

    let result = run(cli.command, &config, store, owner, notifier).await;

    // All notifier clones are gone once `run` returns, which closes the
    // channel and lets the printer drain and exit.
    let _ = printer.await;
    result
}

async fn run(
    command: Command,
    config: &ClientConfig,
    store: SharedStore,
    owner: OwnerId,
    notifier: Notifier,
) -> anyhow::Result<()> {
    let editor_options = EditorOptions {
        autosave_delay: config.autosave_delay,
        conflict_policy: config.conflict_policy,
        owner: Some(owner.clone()),
    };

    match command {
        Command::List => {
            let mut home = HomeView::new(store, owner, notifier);
            let notes = home.refresh().await?;
            if notes.is_empty() {
                println!("No notes yet.");
            }
            for note in notes {
                println!(
                    "{}  {}  {}",
                    note.code,
                    note.updated_at.format("%Y-%m-%d %H:%M"),
                    note.label()
                );
            }
        }
        Command::New { title, content } => {
            let mut home = HomeView::new(store.clone(), owner, notifier.clone());
            let route = home.create_note().await?;
            println!("{route}");

            if let Route::Note(code) = route {
                let editor = NoteEditor::new(code, store, notifier, editor_options);
                if title.is_some() || content.is_some() {
                    apply_edits(&editor, title, content);
                    editor.manual_save().await?;
                }
                println!("{}", editor.share_message());
            }
        }
        Command::Access { code } => {
            let gate = AccessGate::new(store, notifier);
            let route = gate.resolve(&code).await?;
            println!("{route}");
        }
        Command::Show { code } => {
            let code = NoteCode::parse(&code)?;
            let editor = NoteEditor::open(code, store, notifier, editor_options).await?;
            let note = editor.snapshot();
            println!("{}", note.title);
            println!();
            println!("{}", note.content);
        }
        Command::Edit {
            code,
            title,
            content,
        } => {
            let code = NoteCode::parse(&code)?;
            let editor = NoteEditor::open(code, store, notifier, editor_options).await?;
            apply_edits(&editor, title, content);
            match editor.manual_save().await? {
                SaveOutcome::Saved(note) => {
                    tracing::info!(code = %note.code, "Saved at {}", note.updated_at);
                }
                SaveOutcome::Unchanged => println!("Nothing to save."),
            }
        }
        Command::Delete { code } => {
            let code = NoteCode::parse(&code)?;
            let mut home = HomeView::new(store, owner, notifier);
            home.delete_note(&code).await?;
        }
    }

    Ok(())
}

fn apply_edits(editor: &NoteEditor, title: Option<String>, content: Option<String>) {
    if let Some(title) = title {
        editor.set_title(title);
    }
    if let Some(content) = content {
        editor.set_content(content);
    }
}
