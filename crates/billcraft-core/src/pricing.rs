//! # Pricing Engine
//!
//! Pure monetary math for documents. All arithmetic is `f64` at full
//! floating precision; values are only rounded to two decimals when
//! formatted for display.
//!
//! ## Pricing Model
//! ```text
//! unit_total(product)    = base_price + Σ line_item.quantity × line_item.unit_price
//! product_total(product) = unit_total × product.quantity
//! subtotal(document)     = Σ product_total
//! total(document)        = subtotal + labour_charge - discount_amount
//! ```
//!
//! ## Denormalized Totals
//! `Document::subtotal` and `Document::total` are stored on the
//! document itself. Call [`recompute`] after any mutation that can
//! affect pricing; callers that forget will render stale totals.

use crate::types::{Document, Product};

// ============================================================================
// Per-product math
// ============================================================================

/// Price of ONE unit of the product: base price plus all line items.
pub fn unit_total(product: &Product) -> f64 {
    let items: f64 = product.line_items.iter().map(|item| item.line_total()).sum();
    product.base_price() + items
}

/// Price of the full product row: unit total times product quantity.
pub fn product_total(product: &Product) -> f64 {
    unit_total(product) * f64::from(product.quantity)
}

// ============================================================================
// Document totals
// ============================================================================

/// Sum of all product totals on the document.
pub fn subtotal(products: &[Product]) -> f64 {
    products.iter().map(product_total).sum()
}

/// Recomputes and stores `subtotal` and `total` on the document.
///
/// The discount is applied as-is; a discount larger than the subtotal
/// plus labour yields a negative total, which is deliberate. The
/// caller decides whether to surface that to the user.
pub fn recompute(document: &mut Document) {
    document.subtotal = subtotal(&document.products);
    document.total = document.subtotal + document.labour_charge - document.discount_amount;
}

// ============================================================================
// Display formatting
// ============================================================================

/// Formats a monetary value with exactly two decimal places.
///
/// ## Example
/// ```
/// use billcraft_core::pricing::format_amount;
/// assert_eq!(format_amount(300.0), "300.00");
/// assert_eq!(format_amount(-49.5), "-49.50");
/// ```
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Formats a quantity without trailing zeros: `3` not `3.0`, `2.5` as-is.
pub fn format_quantity(value: f64) -> String {
    value.to_string()
}

// ============================================================================
// Tests
// ============================================================================
