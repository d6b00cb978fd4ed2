//! Dispatcher schema and handler chain builders

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{sender_of, HandlerDeps, HandlerError, SessionDialogue, SessionStorage};
use crate::telegram::bot::Command;
use crate::telegram::render::{send_replies, ReplyTarget};
use codifycore::{BotCommand, InboundEvent, Sender, Session};

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Sessions are kept per user, not per chat: each endpoint opens the
/// sender's dialogue in the shared [`SessionStorage`], so members of one group
/// chat never share a reading position.
///
/// # Arguments
/// * `deps` - Handler dependencies (the event router)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        // Command handler must come before plain text
        .branch(command_handler(deps_commands))
        // Reply-keyboard buttons and free text
        .branch(message_handler(deps_messages))
        // Inline navigation buttons
        .branch(callback_handler(deps_callback))
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command, storage: Arc<SessionStorage>| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);
                let event = match cmd {
                    Command::Start => InboundEvent::Command(BotCommand::Start),
                };
                let sender = sender_of(msg.from.as_ref(), msg.chat.id);
                let target = ReplyTarget::chat(msg.chat.id);
                route(&bot, &deps, storage, &sender, target, event).await
            }
        },
    ))
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_map(|msg: Message| msg.text().map(str::to_string))
        .endpoint(
            move |bot: Bot, msg: Message, text: String, storage: Arc<SessionStorage>| {
                let deps = deps.clone();
                async move {
                    let sender = sender_of(msg.from.as_ref(), msg.chat.id);
                    let target = ReplyTarget::chat(msg.chat.id);
                    route(&bot, &deps, storage, &sender, target, InboundEvent::TextButton(text)).await
                }
            },
        )
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(
        move |bot: Bot, q: CallbackQuery, storage: Arc<SessionStorage>| {
            let deps = deps.clone();
            async move {
                // Stop the client's loading indicator whatever happens next.
                if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                    log::warn!("Failed to answer callback query: {}", e);
                }

                let Some(message) = q.message.as_ref() else {
                    log::warn!("Callback query from user {} without a message", q.from.id);
                    return Ok(());
                };
                let chat_id = message.chat().id;
                let target = ReplyTarget::callback(chat_id, message.id());
                let sender = sender_of(Some(&q.from), chat_id);
                let event = InboundEvent::Callback(q.data.clone().unwrap_or_default());
                route(&bot, &deps, storage, &sender, target, event).await
            }
        },
    )
}

/// Runs the router on one event, stores the session, then sends the replies.
///
/// Send failures are logged and swallowed so one blocked chat never stops
/// the dispatcher; session storage failures are returned.
async fn route(
    bot: &Bot,
    deps: &HandlerDeps,
    storage: Arc<SessionStorage>,
    sender: &Sender,
    target: ReplyTarget,
    event: InboundEvent,
) -> Result<(), HandlerError> {
    let dialogue = session_dialogue(storage, sender);
    let mut session: Session = dialogue.get_or_default().await?;
    let replies = deps.router.handle(sender, &mut session, event);
    dialogue.update(session).await?;

    if let Err(e) = send_replies(bot, target, replies).await {
        log::error!("❌ Failed to send replies to chat {}: {}", target.chat_id, e);
    }
    Ok(())
}

/// Dialogue keyed by the sender's id; for private chats this equals the chat id.
fn session_dialogue(storage: Arc<SessionStorage>, sender: &Sender) -> SessionDialogue {
    SessionDialogue::new(storage, ChatId(sender.platform_id))
}
