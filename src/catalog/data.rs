use super::{FilterDimension, Product};
use std::collections::HashMap;

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn categories() -> Vec<String> {
    owned(&["gym", "yoga", "running", "cycling", "swimming"])
}

pub fn filter_values() -> HashMap<FilterDimension, Vec<String>> {
    let mut values = HashMap::new();
    values.insert(
        FilterDimension::Colors,
        owned(&[
            "Black", "White", "Grey", "Red", "Blue", "Navy", "Green", "Yellow", "Orange", "Pink",
            "Purple",
        ]),
    );
    values.insert(FilterDimension::Sizes, owned(&["XS", "S", "M", "L", "XL", "XXL"]));
    values.insert(
        FilterDimension::Materials,
        owned(&["Cotton", "Polyester", "Nylon", "Spandex", "Rubber", "Foam", "Cork", "Mesh"]),
    );
    values.insert(FilterDimension::Genders, owned(&["Men", "Women", "Unisex", "Kids"]));
    values.insert(
        FilterDimension::Brands,
        owned(&["Nike", "Adidas", "Puma", "Reebok", "Under Armour", "Lululemon", "Asics", "Manduka"]),
    );
    values.insert(
        FilterDimension::SubCategories,
        owned(&[
            "Yoga Mats",
            "Yoga Blocks",
            "Dumbbells",
            "Kettlebells",
            "Resistance Bands",
            "Running Shoes",
            "Shorts",
            "Leggings",
            "T-Shirts",
            "Water Bottles",
            "Jackets",
            "Swimwear",
        ]),
    );
    values
}

fn product(id: &str, name: &str, description: &str, sizes: &[&str]) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        sizes: owned(sizes),
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product("p-001", "Classic Yoga Mat", "6mm natural rubber mat with a grippy top layer", &[]),
        product("p-002", "Cork Yoga Block", "Dense cork block for supported poses", &[]),
        product("p-003", "Adjustable Dumbbell Set", "Pair of dumbbells adjustable from 2 to 24 kg", &[]),
        product("p-004", "Competition Kettlebell", "Steel kettlebell with a flat base", &[]),
        product("p-005", "Trail Running Shoes", "Lightweight shoes with an aggressive outsole", &["S", "M", "L", "XL"]),
        product("p-006", "Seamless Leggings", "High-waisted leggings with four-way stretch", &["XS", "S", "M", "L"]),
        product("p-007", "Breathable Training Tee", "Mesh-panel t-shirt for hard sessions", &["S", "M", "L", "XL", "XXL"]),
        product("p-008", "Insulated Water Bottle", "Keeps drinks cold for 24 hours", &[]),
        product("p-009", "Windproof Cycling Jacket", "Packable shell with reflective trim", &["S", "M", "L", "XL"]),
        product("p-010", "Racer Back Swimsuit", "Chlorine-resistant one-piece swimsuit", &["XS", "S", "M", "L"]),
    ]
}
