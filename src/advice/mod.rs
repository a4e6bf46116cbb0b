//! Spending insights from a hosted text model. The gateway never fails:
//! missing configuration and every request error turn into fixed messages.

mod gemini;
mod task;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{error, info, warn};

pub(crate) use gemini::GeminiClient;
pub(crate) use task::InsightDispatcher;

use crate::config::AiConfig;
use crate::models::{Transaction, TransactionKind};

pub(crate) const MISSING_KEY_MESSAGE: &str =
    "API_KEY environment variable is not set. Please configure it to use AI insights.";
pub(crate) const FALLBACK_MESSAGE: &str =
    "Sorry, I couldn't generate insights at the moment. Please try again later.";

pub(crate) type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// A text model that turns a prompt into a reply.
pub(crate) trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

/// The only fields sent off-device for each transaction.
#[derive(Debug, Serialize)]
struct PromptRow<'a> {
    #[serde(rename = "type")]
    kind: TransactionKind,
    amount: Decimal,
    category: &'a str,
    date: NaiveDate,
}

pub(crate) fn build_prompt(txns: &[Transaction]) -> Result<String> {
    let rows: Vec<PromptRow<'_>> = txns
        .iter()
        .map(|t| PromptRow {
            kind: t.kind,
            amount: t.amount,
            category: &t.category,
            date: t.date,
        })
        .collect();
    let listing = serde_json::to_string_pretty(&rows)?;
    Ok(format!(
        "You are a friendly financial advisor. Analyze the following list of personal \
         financial transactions and provide some simple, actionable insights and recommendations.\n\
         Focus on spending habits, potential savings, and positive reinforcement. \
         Keep the tone encouraging and easy to understand.\n\
         Format the output in markdown.\n\n\
         Transactions:\n{listing}\n"
    ))
}

#[derive(Clone)]
pub(crate) struct AdviceGateway {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AdviceGateway {
    /// A gateway backed by Gemini when a key is configured, otherwise one
    /// that always answers with [`MISSING_KEY_MESSAGE`]. A client that cannot
    /// be built leaves the gateway answering with [`FALLBACK_MESSAGE`].
    pub(crate) fn from_config(config: &AiConfig) -> Self {
        match config.api_key() {
            Some(key) => {
                let client = GeminiClient::new(&config.endpoint, &config.model, key)
                    .map(|c| Arc::new(c) as Arc<dyn TextGenerator>);
                info!(model = %config.model, "insights enabled");
                Self::from_built(client)
            }
            None => {
                info!("insights disabled, no api key");
                Self::unconfigured()
            }
        }
    }

    fn from_built(built: Result<Arc<dyn TextGenerator>>) -> Self {
        match built {
            Ok(generator) => Self::with_generator(generator),
            Err(e) => {
                error!("insights client unavailable: {e:#}");
                Self::with_generator(Arc::new(Unavailable(format!("{e:#}"))))
            }
        }
    }

    pub(crate) fn unconfigured() -> Self {
        Self { generator: None }
    }

    pub(crate) fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub(crate) fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Ask for advice on `txns`. Always resolves to displayable text.
    pub(crate) async fn request_insights(&self, txns: Vec<Transaction>) -> String {
        let Some(generator) = &self.generator else {
            return MISSING_KEY_MESSAGE.to_string();
        };
        let prompt = match build_prompt(&txns) {
            Ok(p) => p,
            Err(e) => {
                warn!("could not build insights prompt: {e:#}");
                return FALLBACK_MESSAGE.to_string();
            }
        };
        match generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("insights response was empty");
                FALLBACK_MESSAGE.to_string()
            }
            Err(e) => {
                warn!("insights request failed: {e:#}");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

/// Stands in for a client that failed to build; every request fails.
struct Unavailable(String);

impl TextGenerator for Unavailable {
    fn generate<'a>(&'a self, _prompt: &'a str) -> GenerateFuture<'a> {
        let reason = self.0.clone();
        Box::pin(async move { Err::<String, _>(anyhow::anyhow!("client unavailable: {reason}")) })
    }
}
