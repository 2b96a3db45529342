//! Keyword rules checked in priority order. The first rule whose
//! trigger appears in the case folded utterance wins, otherwise the
//! fallback applies.

pub const GREETING: &str = "Hello! How can I assist you today?";
pub const STORE_HOURS: &str = "Our store hours are: Monday-Friday: 9:00 AM - 9:00 PM, Saturday-Sunday: 10:00 AM - 8:00 PM.";
pub const NO_PRODUCTS: &str = "No products available at the moment.";
pub const NOT_UNDERSTOOD: &str = "I didn't understand that.";
pub const PROCESSING_ERROR: &str = "There was an error processing your request.";

/// How many products a recommendation asks the catalog for.
pub const RECOMMENDATION_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    StoreHours,
    Recommend,
    Fallback,
}

pub struct IntentRule {
    pub trigger: &'static str,
    pub intent: Intent,
}

impl IntentRule {
    fn matches(&self, folded: &str) -> bool {
        folded.contains(self.trigger)
    }
}

pub const RULES: &[IntentRule] = &[
    IntentRule {
        trigger: "hello",
        intent: Intent::Greeting,
    },
    IntentRule {
        trigger: "store hours",
        intent: Intent::StoreHours,
    },
    IntentRule {
        trigger: "recommend",
        intent: Intent::Recommend,
    },
];

/// Pick the intent for an utterance. A missing utterance never
/// matches a keyword rule.
pub fn classify(utterance: Option<&str>) -> Intent {
    let Some(text) = utterance else {
        return Intent::Fallback;
    };
    let folded = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&folded))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Fallback)
}
