use super::{loose_string, InterpreterContext};
use crate::intent::types::{Interpretation, Utterance};
use crate::services::prompts;
use crate::store::{ProfileField, ProfileUpdate};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProfilePayload {
    #[serde(deserialize_with = "loose_string")]
    name: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    email: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    address: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    phone: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    card_holder: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    card_number: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    expiry: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    cvv: Option<String>,
}

impl From<ProfilePayload> for ProfileUpdate {
    fn from(p: ProfilePayload) -> Self {
        ProfileUpdate {
            name: p.name,
            email: p.email,
            address: p.address,
            phone: p.phone,
            card_holder: p.card_holder,
            // spoken card numbers come back with spaces or dashes
            card_number: p.card_number.map(|n| n.chars().filter(char::is_ascii_digit).collect()),
            expiry: p.expiry,
            cvv: p.cvv,
        }
    }
}

pub fn summarize(changed: &[ProfileField]) -> String {
    let labels: Vec<&str> = changed.iter().map(ProfileField::label).collect();
    match labels.as_slice() {
        [] => "Your details are already up to date".to_string(),
        [only] => format!("Updated your {}", only),
        [init @ .., last] => format!("Updated your {} and {}", init.join(", "), last),
    }
}

pub async fn interpret(ctx: &InterpreterContext, utterance: &Utterance) -> Interpretation {
    let Ok(payload) = ctx
        .gateway
        .classify_json::<ProfilePayload>(prompts::USER_INFO, &[("utterance", utterance.as_str())])
        .await
    else {
        return Interpretation::not_handled();
    };

    let update = ProfileUpdate::from(payload);
    if update.present_fields().is_empty() {
        return Interpretation::not_handled();
    }

    let store = &ctx.storefront.profile;
    let mut preview = store.read_snapshot();
    let changed = preview.merge(&update);
    store.merge_update(&update);

    for field in &changed {
        if let Some(value) = update.get(*field) {
            info!(field = field.label(), value = field.loggable(value), "Profile field updated");
        }
    }

    let summary = summarize(&changed);
    if !changed.is_empty() {
        ctx.storefront.notifier.profile_updated(&summary, &changed);
    }
    Interpretation::Handled(summary)
}
