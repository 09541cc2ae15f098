// Prompt templates. Placeholders use `{name}` and are filled by
// `ClassifierGateway::render`.

pub const PRIMARY_INTENT: &str = r#"You route voice commands for an online sports store.
Classify the utterance into exactly one category and answer with the category tag only.

Categories:
- navigation: go back, go home, open the cart or the payment page
- order_completion: place, complete, confirm or submit the order, pay now
- user_info: the shopper states their name, email, address, phone or card details
- cart: view the cart, proceed to checkout, continue shopping
- product_action: choose a size or quantity, add the current product to the cart
- product_navigation: open a specific product by name
- remove_filter: remove specific filters or the price limit
- category_navigation: browse a category ({categories}), possibly with filters
- apply_filter: narrow the current listing by color, size, material, gender, brand, type or price
- clear_filters: clear or reset every filter
- general_command: anything else

Utterance: "{utterance}"
Category:"#;

pub const NAVIGATION: &str = r#"Decide where the shopper wants to go.
Answer with JSON only: {"action": "back" | "home" | "cart" | "payment" | "none"}

Utterance: "{utterance}"
JSON:"#;

pub const USER_INFO: &str = r#"Extract the shopper details stated in the utterance.
Answer with JSON only, including only the fields that were mentioned:
{"name": string, "email": string, "address": string, "phone": string,
 "cardHolder": string, "cardNumber": string, "expiry": "MM/YY", "cvv": string}
Spoken emails use "at" and "dot"; write them as a normal address.

Utterance: "{utterance}"
JSON:"#;

pub const CART: &str = r#"The shopper is talking about their cart.
Answer with JSON only: {"action": "viewCart" | "checkout" | "continueShopping" | "none"}

Utterance: "{utterance}"
JSON:"#;

pub const PRODUCT_ACTION: &str = r#"The shopper is on the page for "{product}". Available sizes: {sizes}.
Answer with JSON only, one of:
{"action": "size", "value": "<size>"}
{"action": "quantity", "value": <number>}
{"action": "addToCart"}
{"action": "none"}

Utterance: "{utterance}"
JSON:"#;

pub const PRODUCT_NAVIGATION: &str = r#"The shopper wants to open a product. Known products:
{products}
Answer with JSON only: {"product": "<product name as spoken or from the list>"}
Use {"product": null} when no product is mentioned.

Utterance: "{utterance}"
JSON:"#;

pub const CATEGORY_NAVIGATION: &str = r#"The shopper wants to browse a category. Categories: {categories}.
Answer with JSON only: {"category": "<one of the categories>"}
Use {"category": null} when none fits.

Utterance: "{utterance}"
JSON:"#;

pub const APPLY_FILTER: &str = r#"Extract product filters from the utterance.
Known values:
colors: {colors}
sizes: {sizes}
materials: {materials}
genders: {genders}
brands: {brands}
subCategories: {subCategories}
Answer with JSON only, including only the filters that were mentioned:
{"colors": [], "sizes": [], "materials": [], "genders": [], "brands": [], "subCategories": [],
 "priceRange": {"min": number, "max": number}}
Answer {} when no filter is mentioned.

Utterance: "{utterance}"
JSON:"#;

pub const REMOVE_FILTER: &str = r#"The shopper wants to remove filters. Currently applied: {applied}.
Answer with JSON only, listing only what should be removed:
{"colors": [], "sizes": [], "materials": [], "genders": [], "brands": [], "subCategories": [],
 "removePrice": true | false}

Utterance: "{utterance}"
JSON:"#;

pub const GENERAL_COMMAND: &str = r#"Pick the store function that matches the utterance.
Functions:
{functions}
Answer with JSON only: {"function": "<name>", "argument": "<optional argument>"}
Use {"function": "none"} when nothing matches.

Utterance: "{utterance}"
JSON:"#;
