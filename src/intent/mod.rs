//! Server side message classifier. Each utterance is matched against
//! the keyword rules and turned into exactly one reply.

pub mod reply;
pub mod rules;
pub use reply::Reply;
pub use rules::{Intent, classify};

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::CatalogSampler;
use rules::{
    GREETING, NO_PRODUCTS, NOT_UNDERSTOOD, PROCESSING_ERROR, RECOMMENDATION_COUNT, STORE_HOURS,
};

/// The result of handling one utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// A rule fired and produced its reply
    Reply { intent: Intent, reply: Reply },
    /// The catalog failed or timed out while answering
    Fault { reply: Reply },
}

impl Answer {
    pub fn reply(&self) -> &Reply {
        match self {
            Answer::Reply { reply, .. } => reply,
            Answer::Fault { reply } => reply,
        }
    }

    pub fn into_reply(self) -> Reply {
        match self {
            Answer::Reply { reply, .. } => reply,
            Answer::Fault { reply } => reply,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Answer::Fault { .. })
    }
}

#[derive(Clone)]
pub struct IntentResponder {
    sampler: Arc<dyn CatalogSampler>,
    sampler_timeout: Duration,
}

impl IntentResponder {
    pub fn new(sampler: Arc<dyn CatalogSampler>, sampler_timeout: Duration) -> Self {
        Self {
            sampler,
            sampler_timeout,
        }
    }

    /// Answer a single utterance. Never returns an error: catalog
    /// failures are logged and come back as `Answer::Fault`.
    pub async fn respond(&self, utterance: Option<&str>) -> Answer {
        let intent = classify(utterance);
        tracing::debug!("Matched intent {:?}", intent);

        let reply = match intent {
            Intent::Greeting => Reply::text(GREETING),
            Intent::StoreHours => Reply::text(STORE_HOURS),
            Intent::Recommend => return self.recommend().await,
            Intent::Fallback => Reply::text(NOT_UNDERSTOOD),
        };

        Answer::Reply { intent, reply }
    }

    async fn recommend(&self) -> Answer {
        let sample = tokio::time::timeout(
            self.sampler_timeout,
            self.sampler.sample_random(RECOMMENDATION_COUNT),
        )
        .await;

        let mut products = match sample {
            Ok(Ok(products)) => products,
            Ok(Err(e)) => {
                tracing::error!("Catalog sampling failed: {}. Root cause: {}", e, e.root_cause());
                return Answer::Fault {
                    reply: Reply::text(PROCESSING_ERROR),
                };
            }
            Err(_) => {
                tracing::error!(
                    "Catalog sampling timed out after {}ms",
                    self.sampler_timeout.as_millis()
                );
                return Answer::Fault {
                    reply: Reply::text(PROCESSING_ERROR),
                };
            }
        };

        // The sampler is allowed to over deliver, the reply is not
        products.truncate(RECOMMENDATION_COUNT);

        let reply = if products.is_empty() {
            Reply::text(NO_PRODUCTS)
        } else {
            Reply::ProductList(products)
        };

        Answer::Reply {
            intent: Intent::Recommend,
            reply,
        }
    }
}
