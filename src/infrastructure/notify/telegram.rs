//! Telegram Bot API notifier

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::TelegramCfg;
use crate::domain::change::{ChangeKind, ClassifiedListing};
use crate::shared::errors::NotifyError;
use super::Notifier;

/// Telegram caps photo captions at 1024 characters
const CAPTION_LIMIT: usize = 1024;

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Bot token and chat id come from the environment variables named in `cfg`
    pub fn from_env(cfg: &TelegramCfg) -> Result<Self, NotifyError> {
        let read = |var: &str| {
            std::env::var(var)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| NotifyError::NotConfigured(format!("{var} is not set")))
        };
        let token = read(&cfg.bot_token_env)?;
        let chat_id = read(&cfg.chat_id_env)?;
        Ok(Self::new(cfg.api_base.clone(), token, chat_id))
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> Result<(), NotifyError> {
        let response = self.client.post(self.method_url(method)).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        match serde_json::from_str::<TelegramResponse>(&text) {
            Ok(reply) if !reply.ok => Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: reply.description.unwrap_or(text),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, item: &ClassifiedListing) -> Result<(), NotifyError> {
        let caption = render_caption(item);
        debug!("Sending {} to chat {}", item.listing.id, self.chat_id);

        if item.listing.image_url.is_empty() {
            self.call(
                "sendMessage",
                json!({ "chat_id": self.chat_id, "text": caption, "parse_mode": "HTML" }),
            )
            .await
        } else {
            self.call(
                "sendPhoto",
                json!({
                    "chat_id": self.chat_id,
                    "photo": item.listing.image_url,
                    "caption": caption,
                    "parse_mode": "HTML",
                }),
            )
            .await
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render_caption(item: &ClassifiedListing) -> String {
    let listing = &item.listing;
    let headline = match &item.kind {
        ChangeKind::Changed { previous } => {
            format!("📉 <b>Price changed</b>: {} → {}", escape_html(previous), escape_html(&listing.price_text))
        }
        _ => format!("🆕 <b>New listing</b>: {}", escape_html(&listing.price_text)),
    };
    let link = format!("<a href=\"{}\">View product</a>", escape_html(&listing.link));

    // Budget the title so the link always survives the caption limit
    let fixed = headline.chars().count() + link.chars().count() + 2;
    let room = CAPTION_LIMIT.saturating_sub(fixed);
    let mut title: String = listing.title.chars().take(room).collect();
    if room > 0 && title.chars().count() < listing.title.chars().count() {
        title.pop();
        title.push('…');
    }

    format!("{}\n{}\n{}", headline, escape_html(&title), link)
}
