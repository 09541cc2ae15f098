use std::io;
use std::sync::{Arc, Mutex};

use voxcart::intent::interpreters::{cart, category, filters, general, navigation, order, product, product_nav, user_info};
use voxcart::intent::interpreters::InterpreterContext;
use voxcart::intent::{FilterOutcome, Interpretation, Utterance};
use voxcart::services::llm::ScriptedGenerator;
use voxcart::services::ClassifierGateway;
use voxcart::store::memory::{InMemoryPage, InMemoryStorefront, Notice};
use voxcart::store::{FilterSelection, FilterStore, PriceRange, ProfileField, ProfileStore, Route, UserProfile};

fn context(shop: &InMemoryStorefront, generator: &Arc<ScriptedGenerator>) -> InterpreterContext {
    InterpreterContext::new(ClassifierGateway::new(generator.clone()), shop.storefront())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn complete_profile() -> UserProfile {
    UserProfile {
        name: Some("Sam Rivera".into()),
        email: Some("sam@example.com".into()),
        address: Some("12 Harbour Road".into()),
        card_number: Some("4111111111111111".into()),
        expiry: Some("09/29".into()),
        cvv: Some("123".into()),
        ..Default::default()
    }
}

// === Navigation & cart ===

#[tokio::test]
async fn test_navigation_actions() {
    let shop = InMemoryStorefront::new().on_page(InMemoryPage::new(Route::Cart));
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply(r#"{"action": "payment"}"#)
            .reply(r#"{"action": "back"}"#)
            .reply(r#"{"action": "none"}"#)
            .reply(r#"{"action": "teleport"}"#),
    );
    let ctx = context(&shop, &generator);

    let paid = navigation::interpret(&ctx, &Utterance::new("go to payment")).await;
    assert!(paid.is_handled());
    assert_eq!(shop.page.route(), Route::Payment);

    let back = navigation::interpret(&ctx, &Utterance::new("go back")).await;
    assert!(back.is_handled());
    assert_eq!(shop.page.route(), Route::Cart);
    assert_eq!(shop.page.back_count(), 1);

    assert_eq!(navigation::interpret(&ctx, &Utterance::new("hmm")).await, Interpretation::not_handled());
    assert_eq!(navigation::interpret(&ctx, &Utterance::new("beam me up")).await, Interpretation::not_handled());
    assert_eq!(shop.page.navigations(), vec![Route::Payment]);
}

#[tokio::test]
async fn test_cart_actions() {
    let shop = InMemoryStorefront::new();
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply(r#"{"action": "viewCart"}"#)
            .reply(r#"{"action": "checkout"}"#)
            .reply(r#"{"action": "continueShopping"}"#)
            .reply("not json"),
    );
    let ctx = context(&shop, &generator);

    for utterance in ["show my cart", "check out", "keep shopping"] {
        assert!(cart::interpret(&ctx, &Utterance::new(utterance)).await.is_handled());
    }
    assert!(!cart::interpret(&ctx, &Utterance::new("what")).await.is_handled());
    assert_eq!(shop.page.navigations(), vec![Route::Cart, Route::Payment, Route::Home]);
}

// === Order completion ===

#[tokio::test]
async fn test_order_off_payment_page_navigates_there() {
    let shop = InMemoryStorefront::new().on_page(InMemoryPage::new(Route::Cart));
    let generator = Arc::new(ScriptedGenerator::new());
    let ctx = context(&shop, &generator);

    let result = order::interpret(&ctx, &Utterance::new("place my order")).await;

    assert!(result.is_handled());
    assert_eq!(shop.page.route(), Route::Payment);
    assert_eq!(shop.page.submit_count(), 0);
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_order_with_complete_profile_submits() {
    let shop = InMemoryStorefront::new()
        .on_page(InMemoryPage::new(Route::Payment))
        .with_profile(complete_profile());
    let generator = Arc::new(ScriptedGenerator::new());
    let ctx = context(&shop, &generator);

    let result = order::interpret(&ctx, &Utterance::new("place my order")).await;

    assert_eq!(result, Interpretation::Handled("Placing your order".to_string()));
    assert_eq!(shop.page.submit_count(), 1);
    assert!(shop.page.navigations().is_empty(), "No navigation fallback expected");
}

#[tokio::test]
async fn test_order_without_submit_control_goes_to_confirmation() {
    let shop = InMemoryStorefront::new()
        .on_page(InMemoryPage::new(Route::Payment).with_submit_control(false))
        .with_profile(complete_profile());
    let generator = Arc::new(ScriptedGenerator::new());
    let ctx = context(&shop, &generator);

    let result = order::interpret(&ctx, &Utterance::new("complete my order")).await;

    assert!(result.is_handled());
    assert_eq!(shop.page.route(), Route::Confirmation);
}

#[tokio::test]
async fn test_order_with_missing_fields_lists_them() {
    let mut profile = complete_profile();
    profile.cvv = None;
    profile.email = Some("   ".into());
    let shop = InMemoryStorefront::new()
        .on_page(InMemoryPage::new(Route::Payment))
        .with_profile(profile);
    let generator = Arc::new(ScriptedGenerator::new());
    let ctx = context(&shop, &generator);

    let result = order::interpret(&ctx, &Utterance::new("place my order")).await;

    let Interpretation::NotHandled(Some(reason)) = result else {
        panic!("Expected an explanation, got {:?}", result);
    };
    assert!(reason.contains(ProfileField::Cvv.label()));
    assert!(reason.contains(ProfileField::Email.label()));
    assert_eq!(shop.page.submit_count(), 0);
}

// === User info ===

#[tokio::test]
async fn test_user_info_merges_only_returned_fields() {
    let shop = InMemoryStorefront::new().with_profile(UserProfile {
        name: Some("Sam Rivera".into()),
        address: Some("12 Harbour Road".into()),
        ..Default::default()
    });
    let generator = Arc::new(ScriptedGenerator::new().reply(
        r#"{"email": "sam@example.com", "cardNumber": "4111 1111-1111 1111", "name": "Sam Rivera"}"#,
    ));
    let ctx = context(&shop, &generator);

    let result = user_info::interpret(&ctx, &Utterance::new("my email is sam at example dot com")).await;

    assert_eq!(result, Interpretation::Handled("Updated your email and card number".to_string()));
    let stored = shop.profile.read_snapshot();
    assert_eq!(stored.email.as_deref(), Some("sam@example.com"));
    assert_eq!(stored.card_number.as_deref(), Some("4111111111111111"));
    assert_eq!(stored.address.as_deref(), Some("12 Harbour Road"));

    let notices = shop.notifier.notices();
    assert_eq!(
        notices,
        vec![Notice::ProfileUpdated {
            summary: "Updated your email and card number".to_string(),
            fields: vec![ProfileField::Email, ProfileField::CardNumber],
        }]
    );
}

#[tokio::test]
async fn test_user_info_empty_payload_changes_nothing() {
    let original = complete_profile();
    let shop = InMemoryStorefront::new().with_profile(original.clone());
    let generator = Arc::new(ScriptedGenerator::new().reply("{}").reply("nonsense"));
    let ctx = context(&shop, &generator);

    assert!(!user_info::interpret(&ctx, &Utterance::new("um")).await.is_handled());
    assert!(!user_info::interpret(&ctx, &Utterance::new("um")).await.is_handled());
    assert_eq!(shop.profile.read_snapshot(), original);
    assert!(shop.notifier.notices().is_empty());
}

#[test]
fn test_sensitive_fields_are_masked() {
    assert_eq!(ProfileField::CardNumber.loggable("4111111111111111"), "****");
    assert_eq!(ProfileField::Cvv.loggable("123"), "****");
    assert_eq!(ProfileField::Email.loggable("sam@example.com"), "sam@example.com");
    assert_eq!(user_info::summarize(&[]), "Your details are already up to date");
    assert_eq!(
        user_info::summarize(&[ProfileField::Name, ProfileField::Email, ProfileField::Phone]),
        format!(
            "Updated your {}, {} and {}",
            ProfileField::Name.label(),
            ProfileField::Email.label(),
            ProfileField::Phone.label()
        )
    );
}

/// Collects formatted log output for inspection.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_malformed_profile_reply_keeps_card_out_of_logs() {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let shop = InMemoryStorefront::new();
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply(r#"{"cardNumber": "4111 1111 1111 1111", "cvv": "987"} Done."#)
            .reply(r#"{"cardNumber": "5500000000000004", "cvv": "321"}"#),
    );
    let ctx = context(&shop, &generator);

    let malformed = user_info::interpret(&ctx, &Utterance::new("update my card")).await;
    let accepted = user_info::interpret(&ctx, &Utterance::new("update my card")).await;

    assert!(!malformed.is_handled());
    assert!(accepted.is_handled());
    let logs = buffer.contents();
    assert!(logs.contains("Unparsable classifier response"), "got: {}", logs);
    for secret in ["4111 1111 1111 1111", "987", "5500000000000004", "321"] {
        assert!(!logs.contains(secret), "{} leaked into logs: {}", secret, logs);
    }
}

// === Product page ===

#[tokio::test]
async fn test_product_action_requires_product_page() {
    let shop = InMemoryStorefront::new().on_page(InMemoryPage::new(Route::Category("yoga".into())));
    let generator = Arc::new(ScriptedGenerator::new().reply(r#"{"action": "addToCart"}"#));
    let ctx = context(&shop, &generator);

    let result = product::interpret(&ctx, &Utterance::new("add it to my cart")).await;

    assert!(!result.is_handled());
    assert_eq!(generator.call_count(), 0, "Precondition must be checked before the gateway");
    assert_eq!(shop.product_page.cart_adds(), 0);
}

#[tokio::test]
async fn test_product_size_quantity_and_cart() {
    let shop = InMemoryStorefront::new().on_page(InMemoryPage::new(Route::Product("p-005".into())));
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply(r#"{"action": "size", "value": "xl"}"#)
            .reply(r#"{"action": "size", "value": "XXL"}"#)
            .reply(r#"{"action": "quantity", "value": "2"}"#)
            .reply(r#"{"action": "quantity", "value": 0}"#)
            .reply(r#"{"action": "addToCart"}"#),
    );
    let ctx = context(&shop, &generator);

    assert!(product::interpret(&ctx, &Utterance::new("size extra large")).await.is_handled());
    assert_eq!(shop.product_page.selected_size().as_deref(), Some("XL"));

    // Not offered for this product
    assert!(!product::interpret(&ctx, &Utterance::new("double extra large")).await.is_handled());
    assert_eq!(shop.product_page.selected_size().as_deref(), Some("XL"));

    assert!(product::interpret(&ctx, &Utterance::new("two of them")).await.is_handled());
    assert_eq!(shop.product_page.quantity(), 2);

    assert!(!product::interpret(&ctx, &Utterance::new("zero")).await.is_handled());
    assert_eq!(shop.product_page.quantity(), 2);

    assert!(product::interpret(&ctx, &Utterance::new("add to cart")).await.is_handled());
    assert_eq!(shop.product_page.cart_adds(), 1);
}

#[tokio::test]
async fn test_product_navigation_resolves_spoken_name() {
    let shop = InMemoryStorefront::new();
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply(r#"{"product": "yoga block"}"#)
            .reply(r#"{"product": "tennis racket"}"#)
            .reply(r#"{"product": null}"#),
    );
    let ctx = context(&shop, &generator);

    let opened = product_nav::interpret(&ctx, &Utterance::new("show me the yoga block")).await;
    assert_eq!(opened, Interpretation::Handled("Opening Cork Yoga Block".to_string()));
    assert_eq!(shop.page.route(), Route::Product("p-002".into()));

    assert!(!product_nav::interpret(&ctx, &Utterance::new("tennis racket")).await.is_handled());
    assert!(!product_nav::interpret(&ctx, &Utterance::new("that one")).await.is_handled());
    assert_eq!(shop.page.navigations().len(), 1);
}

#[tokio::test]
async fn test_category_navigation_matches_keys() {
    let shop = InMemoryStorefront::new();
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply(r#"{"category": "Running"}"#)
            .reply(r#"{"category": "tennis"}"#),
    );
    let ctx = context(&shop, &generator);

    assert!(category::interpret(&ctx, &Utterance::new("running gear")).await.is_handled());
    assert_eq!(shop.page.route(), Route::Category("running".into()));
    assert!(!category::interpret(&ctx, &Utterance::new("tennis stuff")).await.is_handled());
}

// === Filters ===

#[tokio::test]
async fn test_apply_filter_normalizes_and_merges() {
    let shop = InMemoryStorefront::new().with_filters(FilterSelection {
        colors: strings(&["Red"]),
        ..Default::default()
    });
    let generator = Arc::new(ScriptedGenerator::new().reply(
        r#"```json
{"colors": ["blue", "red"], "brands": "nike", "priceRange": {"max": "$50"}}
```"#,
    ));
    let ctx = context(&shop, &generator);

    let outcome = filters::interpret_filter_command(&ctx, &Utterance::new("blue or red nike under fifty")).await;

    assert!(outcome.is_updated());
    let selection = shop.filters.snapshot();
    assert_eq!(selection.colors, strings(&["Red", "Blue"]));
    assert_eq!(selection.brands, strings(&["Nike"]));
    assert_eq!(selection.price_range, Some(PriceRange { min: 0.0, max: 50.0 }));
}

#[tokio::test]
async fn test_apply_filter_unknown_on_bad_or_empty_payload() {
    let start = FilterSelection {
        sizes: strings(&["M"]),
        ..Default::default()
    };
    let shop = InMemoryStorefront::new().with_filters(start.clone());
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply("Sure! Blue it is.")
            .reply(r#"{"colors": []}"#)
            .fail("timeout"),
    );
    let ctx = context(&shop, &generator);

    for _ in 0..3 {
        let outcome = filters::interpret_filter_command(&ctx, &Utterance::new("blue please")).await;
        assert_eq!(outcome, FilterOutcome::Unknown);
        assert_eq!(outcome.as_str(), "unknown");
    }
    assert_eq!(shop.filters.snapshot(), start);
}

#[tokio::test]
async fn test_remove_filter_only_drops_applied_values() {
    let shop = InMemoryStorefront::new().with_filters(FilterSelection {
        colors: strings(&["Red", "Blue"]),
        sizes: strings(&["M"]),
        price_range: Some(PriceRange { min: 0.0, max: 50.0 }),
        ..Default::default()
    });
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply(r#"{"colors": ["blue", "green"], "removePrice": true}"#)
            .reply(r#"{"colors": ["green"]}"#),
    );
    let ctx = context(&shop, &generator);

    let outcome = filters::interpret_filter_removal(&ctx, &Utterance::new("no blue or green, any price")).await;
    assert_eq!(outcome, FilterOutcome::FiltersUpdated("Removed filters: Blue, price range".to_string()));

    let selection = shop.filters.snapshot();
    assert_eq!(selection.colors, strings(&["Red"]));
    assert_eq!(selection.sizes, strings(&["M"]));
    assert_eq!(selection.price_range, None);

    // Nothing named is applied
    let outcome = filters::interpret_filter_removal(&ctx, &Utterance::new("drop green")).await;
    assert_eq!(outcome, FilterOutcome::Unknown);
}

#[tokio::test]
async fn test_remove_filter_with_nothing_applied_skips_gateway() {
    let shop = InMemoryStorefront::new();
    let generator = Arc::new(ScriptedGenerator::new().reply(r#"{"colors": ["red"]}"#));
    let ctx = context(&shop, &generator);

    let outcome = filters::interpret_filter_removal(&ctx, &Utterance::new("remove red")).await;

    assert_eq!(outcome, FilterOutcome::Unknown);
    assert_eq!(generator.call_count(), 0);
}

// === General fallback ===

#[tokio::test]
async fn test_general_clear_phrase_skips_gateway() {
    let shop = InMemoryStorefront::new().with_filters(FilterSelection {
        colors: strings(&["Red"]),
        ..Default::default()
    });
    let generator = Arc::new(ScriptedGenerator::new());
    let ctx = context(&shop, &generator);

    let result = general::interpret(&ctx, &Utterance::new("Please reset filters")).await;

    assert!(result.is_handled());
    assert!(shop.filters.snapshot().is_empty());
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_general_function_registry() {
    let shop = InMemoryStorefront::new();
    let generator = Arc::new(
        ScriptedGenerator::new()
            .reply(r#"{"function": "navigateToCategory", "argument": "cycling"}"#)
            .reply(r#"{"function": "goToCart"}"#)
            .reply(r#"{"function": "orderPizza"}"#),
    );
    let ctx = context(&shop, &generator);

    assert!(general::interpret(&ctx, &Utterance::new("bike stuff")).await.is_handled());
    assert!(general::interpret(&ctx, &Utterance::new("my basket")).await.is_handled());
    assert!(!general::interpret(&ctx, &Utterance::new("pizza")).await.is_handled());

    assert_eq!(shop.page.navigations(), vec![Route::Category("cycling".into()), Route::Cart]);
    assert!(generator.prompts()[0].contains("navigateToCategory"));
}
