//! Integration tests for the real dispatcher schema using teloxide_tests
//!
//! Run with: cargo test --test handlers_integration_test

#![allow(clippy::unwrap_used, clippy::expect_used)]

use serial_test::serial;
use std::sync::Arc;
use teloxide::dptree;
use teloxide_tests::{MockBot, MockCallbackQuery, MockMessageText};

use codifybot::telegram::handlers::SessionStorage;
use codifybot::telegram::{schema, HandlerDeps};
use codifycore::router::labels;
use codifycore::{initialize_database, ContentRepository, CourseStore, EventLog, Router};

/// Router over a fresh seeded database in a temp dir and the bundled content.
fn create_test_deps(dir: &tempfile::TempDir) -> HandlerDeps {
    let path = dir.path().join("codify.db");
    let db = initialize_database(path.to_str().unwrap()).expect("Failed to create test database");
    let content = ContentRepository::builtin().expect("Bundled content must parse");
    let router = Router::new(
        CourseStore::new(Arc::new(db.pool)),
        Arc::new(content),
        EventLog::new("codify::test"),
    );
    HandlerDeps::new(Arc::new(router))
}

/// Texts of every message the bot has sent so far.
macro_rules! sent_texts {
    ($bot:expr) => {
        $bot.get_responses()
            .sent_messages
            .iter()
            .filter_map(|msg| msg.text().map(str::to_string))
            .collect::<Vec<String>>()
    };
}

#[tokio::test]
#[serial]
async fn test_start_sends_welcome_and_main_menu() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = MockBot::new(MockMessageText::new().text("/start"), schema(create_test_deps(&dir)));
    bot.dependencies(dptree::deps![SessionStorage::new()]);

    bot.dispatch().await;

    let texts = sent_texts!(bot);
    assert_eq!(texts, vec![labels::WELCOME.to_string(), labels::MAIN_MENU_PROMPT.to_string()]);
}

#[tokio::test]
#[serial]
async fn test_unknown_text_is_unrecognized() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = MockBot::new(MockMessageText::new().text("hello"), schema(create_test_deps(&dir)));
    bot.dependencies(dptree::deps![SessionStorage::new()]);

    bot.dispatch().await;

    assert_eq!(sent_texts!(bot), vec![labels::UNRECOGNIZED.to_string()]);
}

#[tokio::test]
#[serial]
async fn test_session_survives_between_updates() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = MockBot::new(MockMessageText::new().text("SQL"), schema(create_test_deps(&dir)));
    bot.dependencies(dptree::deps![SessionStorage::new()]);

    bot.dispatch().await;
    let texts = sent_texts!(bot);
    assert_eq!(texts[0], labels::subscribed_to("SQL"));

    bot.update(MockMessageText::new().text(labels::START_NOW));
    bot.dispatch().await;

    let texts = sent_texts!(bot);
    let section = texts.last().expect("first section is sent");
    assert!(section.contains("1/3"), "unexpected section text: {}", section);
}

/// Subscribes to SQL and opens it on the first section.
macro_rules! open_sql_course {
    ($bot:expr) => {
        $bot.dispatch().await;
        $bot.update(MockMessageText::new().text(labels::START_NOW));
        $bot.dispatch().await;
    };
}

#[tokio::test]
#[serial]
async fn test_next_edits_section_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = MockBot::new(MockMessageText::new().text("SQL"), schema(create_test_deps(&dir)));
    bot.dependencies(dptree::deps![SessionStorage::new()]);
    open_sql_course!(bot);

    bot.update(MockCallbackQuery::new().data("next"));
    bot.dispatch().await;

    let responses = bot.get_responses();
    assert!(!responses.answered_callback_queries.is_empty());
    let edited = responses.edited_messages_text.last().expect("section is edited");
    let text = edited.message.text().expect("edited message has text");
    assert!(text.contains("2/3"), "unexpected section text: {}", text);
}

#[tokio::test]
#[serial]
async fn test_exit_course_deletes_section_and_shows_courses() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = MockBot::new(MockMessageText::new().text("SQL"), schema(create_test_deps(&dir)));
    bot.dependencies(dptree::deps![SessionStorage::new()]);
    open_sql_course!(bot);

    bot.update(MockCallbackQuery::new().data("exit_course"));
    bot.dispatch().await;

    let responses = bot.get_responses();
    assert!(!responses.deleted_messages.is_empty(), "section message is deleted");
    let texts = sent_texts!(bot);
    assert_eq!(texts.last().map(String::as_str), Some(labels::COURSES_MENU_PROMPT));
}

#[tokio::test]
#[serial]
async fn test_next_without_course_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut bot = MockBot::new(MockCallbackQuery::new().data("next"), schema(create_test_deps(&dir)));
    bot.dependencies(dptree::deps![SessionStorage::new()]);

    bot.dispatch().await;

    let responses = bot.get_responses();
    let edited = responses.edited_messages_text.last().expect("callback message is edited");
    assert_eq!(edited.message.text(), Some(labels::NO_ACTIVE_COURSE));
}
