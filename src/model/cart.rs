//! The cart: an ordered list of line items, one per product.
//!
//! `Cart` is a plain value. Every change produces a new `Cart` so the store can persist
//! the candidate before letting anyone see it. Order is the order in which products were
//! first added; removing or re-counting a line never moves the others.

use crate::model::{Product, ProductId};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// One product in the cart with the quantity requested.
///
/// Serialized flat: the product's fields plus `amount`, e.g.
/// `{"id":1,"title":"Tênis","price":179.9,"image":"…","amount":2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl LineItem {
    /// A new line for `product` with amount 1.
    ///
    /// A catalog field named `amount` is discarded; the line's own amount replaces it.
    pub fn new(mut product: Product) -> Self {
        product.extra.remove("amount");
        Self { product, amount: 1 }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.amount)
    }
}

/// The cart contents.
///
/// # Invariants
/// - at most one [`LineItem`] per [`ProductId`]
/// - every line has `amount >= 1`
///
/// Both hold for any `Cart` built through [`Cart::from`], [`Cart::hydrate`] or
/// deserialization, which drop offending lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from the text a previous session stored.
    ///
    /// `None` (nothing stored) gives an empty cart. Text that does not parse also gives
    /// an empty cart, after a warning.
    pub fn hydrate(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match serde_json::from_str::<Cart>(raw) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored cart");
                Self::default()
            }
        }
    }

    /// The JSON array persisted for this cart.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Amount of `id` in the cart, 0 if absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.amount)
    }

    /// Sum of all amounts (the badge count in the storefront header).
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of all line subtotals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// A copy with the amount of `id` replaced, or `None` if `id` is not in the cart.
    pub(crate) fn with_amount(&self, id: ProductId, amount: u32) -> Option<Self> {
        debug_assert!(amount >= 1, "line amounts start at 1");
        let index = self.position(id)?;
        let mut next = self.clone();
        next.items[index].amount = amount;
        Some(next)
    }

    /// A copy with a new line for `product` appended at the end.
    pub(crate) fn with_appended(&self, product: Product) -> Self {
        debug_assert!(!self.contains(product.id), "product already in cart");
        let mut next = self.clone();
        next.items.push(LineItem::new(product));
        next
    }

    /// A copy without the line for `id`, or `None` if `id` is not in the cart.
    pub(crate) fn without(&self, id: ProductId) -> Option<Self> {
        let index = self.position(id)?;
        let mut next = self.clone();
        next.items.remove(index);
        Some(next)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .map(|mut item| {
                item.product.extra.remove("amount");
                item
            })
            .filter(|item| {
                if item.amount == 0 {
                    warn!(product_id = %item.id(), "Dropping line with zero amount");
                    return false;
                }
                if !seen.insert(item.id()) {
                    warn!(product_id = %item.id(), "Dropping duplicate line");
                    return false;
                }
                true
            })
            .collect();
        Self { items }
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<LineItem>::deserialize(deserializer).map(Cart::from)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
