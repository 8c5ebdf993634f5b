//! Autosave and save-conflict behaviour of `NoteEditor`, driven on a paused
//! tokio clock against the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use tokio::time::sleep;

use codenote_client::editor::{EditorOptions, NoteEditor, SaveOutcome};
use codenote_client::home::HomeView;
use codenote_client::notify::{self, Notifier, ToastKind};
use codenote_client::route::Route;
use codenote_client::store::{MemoryNoteStore, SharedStore};
use codenote_client::ClientError;
use codenote_core::conflict::ConflictPolicy;
use codenote_core::note_code::NoteCode;
use codenote_core::owner::OwnerId;

fn code(s: &str) -> NoteCode {
    NoteCode::parse(s).unwrap()
}

async fn seeded_store(code_str: &str, title: &str, content: &str) -> Arc<MemoryNoteStore> {
    let memory = Arc::new(MemoryNoteStore::new());
    memory.seed(&code(code_str), title, content, None).await;
    memory
}

async fn open(memory: &Arc<MemoryNoteStore>, code_str: &str, options: EditorOptions) -> NoteEditor {
    let store: SharedStore = memory.clone();
    NoteEditor::open(code(code_str), store, Notifier::default(), options)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn load_populates_buffer_with_stored_note() {
    let memory = seeded_store("4821", "Groceries", "milk\neggs").await;
    let stored = memory.stored(&code("4821")).await.unwrap();

    let editor = open(&memory, "4821", EditorOptions::default()).await;
    let buffer = editor.snapshot();

    assert_eq!(buffer.title, "Groceries");
    assert_eq!(buffer.content, "milk\neggs");
    assert_eq!(buffer.persisted_title, "Groceries");
    assert_eq!(buffer.persisted_content, "milk\neggs");
    assert_eq!(editor.last_saved(), Some(stored.updated_at));
    assert!(!editor.is_dirty());
}

// ---------------------------------------------------------------------------
// Debounced autosave
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn edits_within_quiet_period_do_not_write() {
    let memory = seeded_store("4821", "", "").await;
    let editor = open(&memory, "4821", EditorOptions::default()).await;

    editor.set_title("G");
    sleep(Duration::from_millis(500)).await;
    editor.set_title("Gr");
    sleep(Duration::from_millis(900)).await;

    assert_eq!(memory.save_calls(), 0);
    assert!(editor.autosave_pending());
}

#[tokio::test(start_paused = true)]
async fn quiet_period_triggers_exactly_one_write() {
    let memory = seeded_store("4821", "", "").await;
    let editor = open(&memory, "4821", EditorOptions::default()).await;

    for title in ["G", "Gr", "Gro", "Groceries"] {
        editor.set_title(title);
        sleep(Duration::from_millis(200)).await;
    }
    sleep(Duration::from_secs(1)).await;

    assert_eq!(memory.save_calls(), 1);
    assert_eq!(memory.stored(&code("4821")).await.unwrap().title, "Groceries");
    assert!(!editor.is_dirty());
    assert!(!editor.autosave_pending());

    sleep(Duration::from_secs(5)).await;
    assert_eq!(memory.save_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn autosave_skips_write_when_buffer_matches_watermarks() {
    let memory = seeded_store("4821", "Groceries", "").await;
    let editor = open(&memory, "4821", EditorOptions::default()).await;

    editor.set_title("Groceries!");
    editor.set_title("Groceries");
    sleep(Duration::from_secs(2)).await;

    assert_eq!(memory.save_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn edit_during_inflight_save_is_saved_afterwards() {
    let memory = seeded_store("4821", "", "").await;
    let editor = open(&memory, "4821", EditorOptions::default()).await;
    memory.set_latency(Duration::from_secs(1));

    editor.set_content("a");
    // Timer fires at 1s; the save is in flight until 2s.
    sleep(Duration::from_millis(1500)).await;
    assert!(editor.is_saving());
    editor.set_content("ab");

    sleep(Duration::from_millis(600)).await;
    // First save landed with "a"; the buffer still holds unsaved "ab".
    assert!(!editor.is_saving());
    assert_eq!(editor.snapshot().persisted_content, "a");
    assert!(editor.is_dirty());

    sleep(Duration::from_secs(2)).await;
    assert_eq!(memory.save_calls(), 2);
    assert_eq!(memory.stored(&code("4821")).await.unwrap().content, "ab");
    assert!(!editor.is_dirty());
}

#[tokio::test(start_paused = true)]
async fn dropping_editor_cancels_pending_autosave() {
    let memory = seeded_store("4821", "", "").await;
    let editor = open(&memory, "4821", EditorOptions::default()).await;

    editor.set_content("never saved");
    drop(editor);
    sleep(Duration::from_secs(3)).await;

    assert_eq!(memory.save_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn autosave_delay_is_configurable() {
    let memory = seeded_store("4821", "", "").await;
    let options = EditorOptions {
        autosave_delay: Duration::from_millis(250),
        ..EditorOptions::default()
    };
    let editor = open(&memory, "4821", options).await;

    editor.set_content("quick");
    sleep(Duration::from_millis(300)).await;

    assert_eq!(memory.save_calls(), 1);
}

// ---------------------------------------------------------------------------
// Manual save
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn manual_save_without_changes_does_not_write() {
    let memory = seeded_store("4821", "Groceries", "milk").await;
    let editor = open(&memory, "4821", EditorOptions::default()).await;

    assert_matches!(editor.manual_save().await, Ok(SaveOutcome::Unchanged));
    assert_eq!(memory.save_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn manual_save_writes_and_cancels_pending_autosave() {
    let memory = seeded_store("4821", "", "").await;
    let notifier = Notifier::default();
    let mut toasts = notifier.subscribe();
    let store: SharedStore = memory.clone();
    let editor = NoteEditor::open(code("4821"), store, notifier, EditorOptions::default())
        .await
        .unwrap();

    editor.set_content("typed");
    assert!(editor.autosave_pending());

    let outcome = editor.manual_save().await.unwrap();
    assert_matches!(outcome, SaveOutcome::Saved(ref note) if note.content == "typed");
    assert!(!editor.autosave_pending());

    sleep(Duration::from_secs(3)).await;
    assert_eq!(memory.save_calls(), 1);

    let toast = toasts.recv().await.unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, notify::NOTE_SAVED);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn created_note_title_survives_reload() {
    let memory = Arc::new(MemoryNoteStore::new());
    let store: SharedStore = memory.clone();
    let notifier = Notifier::default();
    let mut home = HomeView::new(store.clone(), OwnerId::generate(), notifier.clone());

    let route = home.create_note().await.unwrap();
    let code = match route {
        Route::Note(code) => code,
        other => panic!("expected note route, got {other:?}"),
    };
    let n: u16 = code.as_str().parse().unwrap();
    assert!((1000..=9999).contains(&n));

    let editor = NoteEditor::open(
        code.clone(),
        store.clone(),
        notifier.clone(),
        EditorOptions::default(),
    )
    .await
    .unwrap();
    editor.set_title("Groceries");
    sleep(Duration::from_millis(1100)).await;
    drop(editor);

    let reloaded = NoteEditor::open(code, store, notifier, EditorOptions::default())
        .await
        .unwrap();
    assert_eq!(reloaded.title(), "Groceries");
}

/// Two tabs load the same note. A saves "X" at t=0 (lands at t=1s), B saves
/// "Y" at t=0.5s (lands at t=2s).
async fn two_tab_race(policy: ConflictPolicy) -> (Arc<MemoryNoteStore>, Result<SaveOutcome, ClientError>) {
    let memory = seeded_store("2222", "", "").await;
    let options = EditorOptions {
        conflict_policy: policy,
        ..EditorOptions::default()
    };
    let tab_a = open(&memory, "2222", options.clone()).await;
    let tab_b = open(&memory, "2222", options).await;

    tab_a.set_content("X");
    tab_b.set_content("Y");
    memory.set_latency(Duration::from_secs(1));

    let save_a = tab_a.manual_save();
    let save_b = async {
        sleep(Duration::from_millis(500)).await;
        memory.set_latency(Duration::from_millis(1500));
        tab_b.manual_save().await
    };
    let (result_a, result_b) = tokio::join!(save_a, save_b);

    assert_matches!(result_a, Ok(SaveOutcome::Saved(_)));
    (memory, result_b)
}

#[tokio::test(start_paused = true)]
async fn last_write_wins_keeps_later_completion() {
    let (memory, result_b) = two_tab_race(ConflictPolicy::LastWriteWins).await;

    assert_matches!(result_b, Ok(SaveOutcome::Saved(_)));
    assert_eq!(memory.stored(&code("2222")).await.unwrap().content, "Y");
}

#[tokio::test(start_paused = true)]
async fn reject_stale_refuses_outdated_save() {
    let (memory, result_b) = two_tab_race(ConflictPolicy::RejectStale).await;

    assert_matches!(result_b, Err(ClientError::Conflict(_)));
    assert_eq!(memory.stored(&code("2222")).await.unwrap().content, "X");
}

#[tokio::test(start_paused = true)]
async fn reject_stale_allows_sequential_saves_from_one_tab() {
    let memory = seeded_store("3333", "", "").await;
    let options = EditorOptions {
        conflict_policy: ConflictPolicy::RejectStale,
        ..EditorOptions::default()
    };
    let editor = open(&memory, "3333", options).await;

    editor.set_content("one");
    editor.manual_save().await.unwrap();
    editor.set_content("two");
    editor.manual_save().await.unwrap();

    assert_eq!(memory.stored(&code("3333")).await.unwrap().content, "two");
}
