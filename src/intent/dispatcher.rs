use super::classifier::PrimaryClassifier;
use super::interpreters::{self, InterpreterContext};
use super::types::{FilterOutcome, IntentCategory, Interpretation, Utterance};
use crate::kernel::telemetry::ActionLog;
use crate::services::ClassifierGateway;
use crate::store::Storefront;
use tracing::{info, warn};

pub const NOT_RECOGNIZED: &str = "Sorry, I didn't understand that command";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub category: IntentCategory,
    pub handled: bool,
    /// The single status line shown to the shopper for this command.
    pub status: String,
    /// Set when a category navigation chained into filter interpretation.
    pub chained_filters: Option<FilterOutcome>,
}

/// Classifies an utterance and routes it to its interpreter.
#[derive(Clone)]
pub struct CommandDispatcher {
    classifier: PrimaryClassifier,
    ctx: InterpreterContext,
}

impl CommandDispatcher {
    pub fn new(gateway: ClassifierGateway, storefront: Storefront) -> Self {
        let classifier = PrimaryClassifier::new(gateway.clone(), storefront.catalog.categories());
        Self {
            classifier,
            ctx: InterpreterContext::new(gateway, storefront),
        }
    }

    pub fn context(&self) -> &InterpreterContext {
        &self.ctx
    }

    /// Runs one command end to end. Never fails: an unhandled command is
    /// recorded and leaves external state untouched.
    pub async fn dispatch(&self, utterance: &Utterance, log: &mut ActionLog) -> DispatchOutcome {
        let (category, (interpretation, chained_filters)) = if interpreters::general::matches_clear_phrase(utterance) {
            // deterministic phrase family, no classifier round trip
            (IntentCategory::GeneralCommand, (interpreters::filters::clear_filters(&self.ctx), None))
        } else {
            let category = self.classifier.classify_primary_intent(utterance).await;
            (category, self.route(category, utterance).await)
        };

        let handled = interpretation.is_handled();
        let mut status = match interpretation {
            Interpretation::Handled(summary) => summary,
            Interpretation::NotHandled(Some(reason)) => reason,
            Interpretation::NotHandled(None) => NOT_RECOGNIZED.to_string(),
        };
        if let Some(FilterOutcome::FiltersUpdated(summary)) = &chained_filters {
            status = format!("{}. {}", status, summary);
        }

        if handled {
            info!(category = %category, "Command handled: {}", status);
        } else {
            warn!(category = %category, "Command not handled: {}", status);
        }

        log.append(format!("{}: {}", category, status), handled, Some(category));
        self.ctx.storefront.notifier.status(&status);

        DispatchOutcome { category, handled, status, chained_filters }
    }

    async fn route(&self, category: IntentCategory, utterance: &Utterance) -> (Interpretation, Option<FilterOutcome>) {
        let ctx = &self.ctx;
        let interpretation = match category {
            IntentCategory::Navigation => interpreters::navigation::interpret(ctx, utterance).await,
            IntentCategory::OrderCompletion => interpreters::order::interpret(ctx, utterance).await,
            IntentCategory::UserInfo => interpreters::user_info::interpret(ctx, utterance).await,
            IntentCategory::Cart => interpreters::cart::interpret(ctx, utterance).await,
            IntentCategory::ProductAction => interpreters::product::interpret(ctx, utterance).await,
            IntentCategory::ProductNavigation => interpreters::product_nav::interpret(ctx, utterance).await,
            IntentCategory::ApplyFilter => interpreters::filters::interpret_filter_command(ctx, utterance).await.into(),
            IntentCategory::RemoveFilter => interpreters::filters::interpret_filter_removal(ctx, utterance).await.into(),
            IntentCategory::ClearFilters => interpreters::filters::clear_filters(ctx),
            IntentCategory::GeneralCommand | IntentCategory::Unrecognized => {
                interpreters::general::interpret(ctx, utterance).await
            }
            IntentCategory::CategoryNavigation => {
                let navigated = interpreters::category::interpret(ctx, utterance).await;
                if !navigated.is_handled() {
                    return (navigated, None);
                }
                // same utterance may also carry filters, e.g. "yoga mats under fifty in blue"
                let filtered = interpreters::filters::interpret_filter_command(ctx, utterance).await;
                return (navigated, Some(filtered));
            }
        };
        (interpretation, None)
    }
}
