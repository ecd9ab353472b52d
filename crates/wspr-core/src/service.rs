//! Query handlers: parse inbound events, consult the directory and the
//! secret store, and produce typed replies.
//!
//! Every inline query produces a reply, including malformed input; expected
//! outcomes (not found, denied, missing target or body) are rendered as
//! descriptive cards or alerts, never as failures.

use crate::{
    directory::UserDirectory,
    domain::{Principal, UserId},
    events::{
        delete_token, parse_callback_data, parse_inline_query, reveal_token, CallbackAction,
        InlineCommand,
    },
    formatting::{escape_html, truncate_text},
    replies::{Button, CallbackReply, InlineCard, InlineReply},
    store::{DeleteOutcome, RevealOutcome, SecretStore},
};

/// Cache hint for whisper-compose answers. Kept minimal so each keystroke
/// registers a fresh whisper id.
const WHISPER_CACHE_SECS: u32 = 1;

/// Cache hint for info-lookup answers.
const INFO_CACHE_SECS: u32 = 60;

/// Telegram caps callback alert text; revealed bodies are clipped to fit.
const ALERT_TEXT_LIMIT: usize = 200;

pub struct WhisperService {
    directory: UserDirectory,
    secrets: SecretStore,
}

impl WhisperService {
    pub fn new(directory: UserDirectory, secrets: SecretStore) -> Self {
        Self { directory, secrets }
    }

    pub fn secrets(&self) -> &SecretStore {
        &self.secrets
    }

    /// Records the interacting user so later `resolve` calls can find them.
    /// Upsert failures are logged and otherwise ignored; they must not take
    /// down the interaction.
    pub async fn observe(&self, principal: &Principal) {
        if let Err(e) = self.directory.upsert(principal.clone()).await {
            tracing::warn!(error = %e, user = %principal.id, "profile upsert failed");
        }
    }

    /// Handles one inline query from `from`.
    pub async fn handle_inline_query(&self, from: Principal, query: &str) -> InlineReply {
        let sender = from.id;
        self.observe(&from).await;

        match parse_inline_query(query) {
            InlineCommand::Whisper { target, body } => {
                self.compose_whisper(sender, target, body).await
            }
            InlineCommand::Info { target } => self.info_lookup(target).await,
            InlineCommand::Unrecognized => usage_reply(),
        }
    }

    /// Handles one button press from `from`.
    pub async fn handle_callback(&self, from: Principal, data: &str) -> CallbackReply {
        let presser = from.id;
        self.observe(&from).await;

        match parse_callback_data(data) {
            None => CallbackReply::ack(),
            Some(CallbackAction::Reveal(id)) => match self.secrets.reveal(id, presser).await {
                RevealOutcome::Revealed(body) => {
                    CallbackReply::alert(truncate_text(&body, ALERT_TEXT_LIMIT))
                }
                RevealOutcome::Denied => CallbackReply::alert("This message is not for you."),
                RevealOutcome::NotFound => {
                    CallbackReply::alert("This message has expired or does not exist.")
                }
            },
            Some(CallbackAction::Delete(id)) => match self.secrets.delete(id, presser).await {
                DeleteOutcome::Deleted => CallbackReply {
                    text: Some("Message deleted.".to_string()),
                    show_alert: true,
                    edit_to: Some("🗑 <b>This message has been deleted.</b>".to_string()),
                },
                DeleteOutcome::Denied => {
                    CallbackReply::alert("Only the sender can delete this message.")
                }
                DeleteOutcome::NotFound => {
                    CallbackReply::alert("This message has already been deleted.")
                }
            },
        }
    }

    async fn compose_whisper(
        &self,
        sender: UserId,
        target: Option<String>,
        body: Option<String>,
    ) -> InlineReply {
        let Some(target) = target else {
            return notice_reply("Give a username", "You didn't type a username or ID.");
        };

        let recipient = match self.directory.resolve(&target).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                return notice_reply("User not found", "Make sure the username or ID is correct.")
            }
            Err(e) => {
                tracing::warn!(error = %e, target, "profile lookup failed");
                return notice_reply("Something went wrong", "Please try again.");
            }
        };

        let Some(body) = body else {
            return notice_reply("Type your message", "You didn't type your message.");
        };

        let id = self.secrets.register(recipient.id, sender, &body).await;
        tracing::debug!(whisper = %id, recipient = %recipient.id, "whisper registered");

        let card = InlineCard {
            title: recipient.display_name.clone(),
            description: body,
            message_html: format!(
                "🔒 <b>Secret message</b> for {}",
                escape_html(&recipient.label())
            ),
            buttons: vec![
                vec![
                    Button::Callback {
                        label: "📖 Show message".to_string(),
                        data: reveal_token(id),
                    },
                    Button::Callback {
                        label: "🗑 Delete".to_string(),
                        data: delete_token(id),
                    },
                ],
                vec![Button::SwitchInline {
                    label: "📝 New message".to_string(),
                    query: format!("wspr {target} "),
                }],
            ],
        };

        InlineReply {
            cards: vec![card],
            cache_time: WHISPER_CACHE_SECS,
        }
    }

    async fn info_lookup(&self, target: Option<String>) -> InlineReply {
        let Some(target) = target else {
            return notice_reply("Give a username", "You didn't type a username or ID.");
        };

        let found = match self.directory.resolve(&target).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                return notice_reply(&format!("Can't find user: {target}"), "User not found")
            }
            Err(e) => {
                tracing::warn!(error = %e, target, "profile lookup failed");
                return notice_reply("Something went wrong", "Please try again.");
            }
        };

        let card = InlineCard {
            title: found.display_name.clone(),
            description: "Touch me".to_string(),
            message_html: crate::formatting::profile_html(&found),
            buttons: vec![vec![
                Button::Url {
                    label: "Private".to_string(),
                    url: found.deep_link(),
                },
                Button::SwitchInline {
                    label: "Secret message".to_string(),
                    query: format!("wspr {} Hello 👋", found.handle_or_id()),
                },
            ]],
        };

        InlineReply {
            cards: vec![card],
            cache_time: INFO_CACHE_SECS,
        }
    }
}

fn notice_reply(title: &str, text: &str) -> InlineReply {
    InlineReply {
        cards: vec![InlineCard::notice(title, text)],
        cache_time: WHISPER_CACHE_SECS,
    }
}

fn usage_reply() -> InlineReply {
    notice_reply(
        "Whisper bot",
        "Use `wspr <user> <message>` to send a secret message, or `msg <user>` to look up a user.",
    )
}
