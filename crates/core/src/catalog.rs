//! Built-in example documents.
//!
//! Each entry is one of the repository `samples/*.tspl` files, embedded at
//! compile time together with a short description and a category used to
//! group related labels.

use serde::Serialize;

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Example {
    /// Stable identifier; also the sample file stem.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Grouping key (e.g. `"retail"`).
    pub category: &'static str,
    /// Document text.
    #[serde(skip)]
    pub code: &'static str,
}

macro_rules! example {
    ($id:literal, $name:literal, $description:literal, $category:literal) => {
        Example {
            id: $id,
            name: $name,
            description: $description,
            category: $category,
            code: include_str!(concat!("../../../samples/", $id, ".tspl")),
        }
    };
}

static EXAMPLES: [Example; 10] = [
    example!("basic_text", "Basic text", "Single line of text on a small label", "basic"),
    example!("barcode", "Barcode", "Code 128 barcode with a readable line", "barcode"),
    example!("qrcode", "QR code", "QR codes with and without mask options", "qrcode"),
    example!("product_label", "Product label", "Retail product label with EAN-13", "retail"),
    example!("shipping_label", "Shipping label", "4x8 parcel label with tracking codes", "logistics"),
    example!("inventory_label", "Inventory label", "Warehouse bin label with SKU and quantity", "warehouse"),
    example!("name_badge", "Name badge", "Event visitor badge", "event"),
    example!("asset_tag", "Asset tag", "Company property tag", "asset"),
    example!("price_tag", "Price tag", "Shelf price tag", "retail"),
    example!("food_label", "Food label", "Fresh produce label with dates and lot code", "food"),
];

/// Every catalog entry, in listing order.
pub fn examples() -> &'static [Example] {
    &EXAMPLES
}

/// Look up an entry by id.
pub fn example(id: &str) -> Option<&'static Example> {
    EXAMPLES.iter().find(|e| e.id == id)
}
