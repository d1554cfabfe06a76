//! Integration tests for a chat session driven end to end with a paused clock.

use pretty_assertions::assert_eq;
use schema_pilot::catalog::CatalogKey;
use schema_pilot::classifier::KeywordClassifier;
use schema_pilot::config::Config;
use schema_pilot::display::{DisplaySurface, SchemaTab, SchemaView};
use schema_pilot::export;
use schema_pilot::generation::Completion;
use schema_pilot::session::Session;
use schema_pilot::store::{Action, Role, GENERATED_REPLY};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

fn session(latency_ms: u64) -> (Session<SchemaView>, UnboundedReceiver<Completion>) {
    let mut config = Config::default();
    config.generation.latency_ms = latency_ms;
    Session::new(&config, Arc::new(KeywordClassifier::new()), SchemaView::new())
}

#[tokio::test(start_paused = true)]
async fn test_conversation_produces_exportable_schema() {
    let (mut session, mut completions) = session(1500);

    assert!(session.submit("I want to build a blog platform").is_applied());
    assert!(session.store().is_generating());

    tokio::time::sleep(Duration::from_millis(1499)).await;
    assert!(completions.try_recv().is_err());

    let completion = completions.recv().await.unwrap();
    assert!(session.complete(completion).is_applied());

    let thread = session.store().active_thread();
    let roles: Vec<Role> = thread.messages().iter().map(|m| m.role()).collect();
    assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
    assert_eq!(thread.messages()[2].content(), GENERATED_REPLY);

    let view = session.surface();
    assert_eq!(view.bundle().map(|b| b.key), Some(CatalogKey::Blog));
    assert_eq!(view.tab(), SchemaTab::Sql);

    let artifact = view.artifact().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = export::save_to_file(dir.path(), &artifact.filename, &artifact.content).unwrap();
    let saved = std::fs::read_to_string(path).unwrap();
    assert!(saved.contains("CREATE TABLE posts"));
}

#[tokio::test(start_paused = true)]
async fn test_second_thread_does_not_see_first_result() {
    let (mut session, mut completions) = session(100);

    session.submit("an online shop");
    let first = session.store().active_id();
    session.dispatch(Action::NewThread);
    let second = session.store().active_id();

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(completions.try_recv().is_err(), "timer should be cancelled");
    assert!(!session.store().is_generating());
    assert!(session.surface().bundle().is_none());

    // The abandoned submission left only the user's message behind.
    assert_eq!(session.store().thread(first).unwrap().messages().len(), 2);
    assert_eq!(session.store().thread(second).unwrap().messages().len(), 1);

    session.submit("ecommerce store with reviews");
    let completion = completions.recv().await.unwrap();
    assert_eq!(completion.thread_id, second);
    session.complete(completion);
    assert_eq!(
        session.surface().bundle().map(|b| b.key),
        Some(CatalogKey::Ecommerce)
    );
}

#[tokio::test(start_paused = true)]
async fn test_clearing_surface_directly() {
    let (mut session, mut completions) = session(10);

    session.submit("blog");
    let completion = completions.recv().await.unwrap();
    session.complete(completion);
    assert!(session.surface().bundle().is_some());

    session.surface_mut().clear();
    assert!(session.surface().bundle().is_none());
    // The store still remembers the last bundle it handed out
    assert_eq!(session.store().display().map(|b| b.key), Some(CatalogKey::Blog));
}
