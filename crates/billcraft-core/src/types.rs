//! # Core Domain Types
//!
//! Entity definitions for the Billcraft domain: products built from
//! line items, documents (estimates and bills), per-document print
//! preferences, and the business settings profile.
//!
//! ## Entity Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Entity Hierarchy                           │
//! │                                                                 │
//! │   Document ──┬── products: Vec<Product>                         │
//! │              │        └── line_items: Vec<LineItem>             │
//! │              ├── preferences: DocumentPreferences               │
//! │              └── kind: DocumentKind                             │
//! │                     ├── Estimate { status }                     │
//! │                     └── Bill(BillDetails)                       │
//! │                                                                 │
//! │   SettingsProfile (business identity, shared by all documents)  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Monetary Values
//! All monetary fields are `f64`. Arithmetic runs at full floating
//! precision; rounding to two decimals happens only at display time
//! (see [`crate::pricing::format_amount`]).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Line Items
// ============================================================================

/// A priced component nested inside a product.
///
/// Line items carry their own quantity, which multiplies with the
/// parent product's quantity when totals are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Human-readable description, e.g. "Premium Silk Cotton 5kg".
    pub name: String,
    /// Per-unit-of-product quantity. Fractional values are allowed.
    pub quantity: f64,
    /// Price for a single unit of this item.
    pub unit_price: f64,
}

impl LineItem {
    /// Creates an empty line item with quantity 1.
    pub fn new() -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            quantity: 1.0,
            unit_price: 0.0,
        }
    }

    /// Total for this item within ONE unit of the parent product.
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::new()
    }
}

// ============================================================================
// Products
// ============================================================================

/// The catalog of product categories the business sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    SilkCottonBed,
    SofaCushion,
    Pillow,
    /// Free-form product; the name comes from `Product::custom_name`.
    Custom,
}

impl ProductType {
    /// Display name shown on printed documents.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::SilkCottonBed => "Silk Cotton Bed",
            ProductType::SofaCushion => "Sofa Cushion",
            ProductType::Pillow => "Pillow",
            ProductType::Custom => "Custom",
        }
    }

    /// Whether this product type is made-to-measure.
    ///
    /// Made-to-measure products get their dimensions appended to the
    /// printed name, e.g. `Silk Cotton Bed (6.5 x 5 ft)`.
    pub fn requires_dimensions(&self) -> bool {
        matches!(self, ProductType::SilkCottonBed | ProductType::SofaCushion)
    }
}

/// Unit of measure for product dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    Ft,
    In,
    Cm,
}

impl DimensionUnit {
    pub fn label(&self) -> &'static str {
        match self {
            DimensionUnit::Ft => "ft",
            DimensionUnit::In => "in",
            DimensionUnit::Cm => "cm",
        }
    }
}

/// A sellable product on a document.
///
/// ## Pricing Model
/// A product has an optional base price plus any number of nested
/// line items. Dimensions are stored as raw strings exactly as the
/// user typed them; they are display-only and never parsed as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Catalog category.
    pub product_type: ProductType,
    /// Name override used when `product_type` is `Custom`.
    pub custom_name: String,
    /// How many units of this product. Whole number.
    pub quantity: u32,
    /// Height as entered, e.g. "6.5". Empty when not applicable.
    pub height: String,
    /// Width as entered. Empty when not applicable.
    pub width: String,
    /// Unit of measure for the dimensions.
    pub unit: DimensionUnit,
    /// Optional base price per unit, before line items.
    pub unit_price: Option<f64>,
    /// Nested priced components.
    pub line_items: Vec<LineItem>,
}

impl Product {
    /// Creates an empty product of the given type with quantity 1.
    pub fn new(product_type: ProductType) -> Self {
        Product {
            id: Uuid::new_v4().to_string(),
            product_type,
            custom_name: String::new(),
            quantity: 1,
            height: String::new(),
            width: String::new(),
            unit: DimensionUnit::Ft,
            unit_price: None,
            line_items: Vec::new(),
        }
    }

    /// Base price per unit, treating "unset" as zero.
    pub fn base_price(&self) -> f64 {
        self.unit_price.unwrap_or(0.0)
    }
}

// ============================================================================
// Document Status
// ============================================================================

/// Lifecycle states for an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Draft,
    Finalized,
}

impl EstimateStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EstimateStatus::Draft => "Draft",
            EstimateStatus::Finalized => "Finalized",
        }
    }
}

/// Payment states for a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Due,
    PartiallyPaid,
    Paid,
}

impl BillStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Due => "Due",
            BillStatus::PartiallyPaid => "Partially Paid",
            BillStatus::Paid => "Paid",
        }
    }
}

/// How a bill was (or will be) paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    BankTransfer,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

// ============================================================================
// Document Kind
// ============================================================================

/// Tag distinguishing the two document flavors, without payload.
///
/// Used where only the flavor matters: numbering sequences, draft
/// type switching, and the printed title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Estimate,
    Bill,
}

impl DocumentType {
    /// Numbering prefix, e.g. `EST` in `EST-4`.
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentType::Estimate => "EST",
            DocumentType::Bill => "BILL",
        }
    }

    /// Uppercase title printed at the top of the document.
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::Estimate => "ESTIMATE",
            DocumentType::Bill => "BILL",
        }
    }
}

/// Bill-only payload: payment tracking and terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDetails {
    pub status: BillStatus,
    /// Running total of payments received.
    pub amount_paid: f64,
    pub payment_method: Option<PaymentMethod>,
    /// Terms and conditions text printed in the footer.
    pub terms: String,
    /// Id of the estimate this bill was converted from, if any.
    pub estimate_id: Option<String>,
}

impl BillDetails {
    /// Fresh bill payload: due, nothing paid, cash by default.
    pub fn new(terms: String) -> Self {
        BillDetails {
            status: BillStatus::Due,
            amount_paid: 0.0,
            payment_method: Some(PaymentMethod::Cash),
            terms,
            estimate_id: None,
        }
    }
}

/// The estimate/bill split.
///
/// Serialized with an internal `type` tag so persisted JSON reads as
/// `{"type": "estimate", "status": "draft", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocumentKind {
    Estimate { status: EstimateStatus },
    Bill(BillDetails),
}

impl DocumentKind {
    /// The payload-free flavor tag.
    pub fn doc_type(&self) -> DocumentType {
        match self {
            DocumentKind::Estimate { .. } => DocumentType::Estimate,
            DocumentKind::Bill(_) => DocumentType::Bill,
        }
    }

    /// Status text shown on badges and list views.
    pub fn status_label(&self) -> &'static str {
        match self {
            DocumentKind::Estimate { status } => status.label(),
            DocumentKind::Bill(details) => details.status.label(),
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// An estimate or a bill.
///
/// ## Stored Totals
/// `subtotal` and `total` are denormalized onto the document and must
/// be recomputed after every mutation of products, labour, or
/// discount (see [`crate::pricing::recompute`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Sequential display number, e.g. "EST-4" or "BILL-12".
    pub number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    /// Document date in ISO `YYYY-MM-DD` form.
    pub date: String,
    pub products: Vec<Product>,
    /// Flat labour/service charge added after the subtotal.
    pub labour_charge: f64,
    /// Flat discount subtracted from the total. Never negative.
    pub discount_amount: f64,
    /// Free-form notes printed in the footer.
    pub notes: String,
    /// Denormalized: sum of product totals.
    pub subtotal: f64,
    /// Denormalized: subtotal + labour - discount.
    pub total: f64,
    /// Per-document print preferences.
    pub preferences: DocumentPreferences,
    /// Estimate/bill split and flavor-specific payload.
    #[serde(flatten)]
    pub kind: DocumentKind,
}

impl Document {
    /// The payload-free flavor tag.
    pub fn doc_type(&self) -> DocumentType {
        self.kind.doc_type()
    }

    pub fn is_bill(&self) -> bool {
        matches!(self.kind, DocumentKind::Bill(_))
    }

    /// Bill payload, if this document is a bill.
    pub fn bill(&self) -> Option<&BillDetails> {
        match &self.kind {
            DocumentKind::Bill(details) => Some(details),
            DocumentKind::Estimate { .. } => None,
        }
    }

    /// Mutable bill payload, if this document is a bill.
    pub fn bill_mut(&mut self) -> Option<&mut BillDetails> {
        match &mut self.kind {
            DocumentKind::Bill(details) => Some(details),
            DocumentKind::Estimate { .. } => None,
        }
    }

    /// Outstanding amount on a bill: `total - amount_paid`.
    ///
    /// Returns `None` for estimates, which have no payment tracking.
    pub fn balance_due(&self) -> Option<f64> {
        self.bill().map(|details| self.total - details.amount_paid)
    }
}

// ============================================================================
// Print Preferences
// ============================================================================

/// Per-document toggles and labels controlling the printed output.
///
/// ## Defaults
/// Every toggle defaults to `true`; labels default to their English
/// text. An empty label string falls back to the default at render
/// time, so clearing a label never produces a blank heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentPreferences {
    pub show_date: bool,
    pub show_status: bool,
    pub show_payment_method: bool,
    pub show_terms: bool,
    pub show_notes: bool,
    /// Master switch for the whole summary block, including the QR code.
    pub show_summary: bool,
    pub show_subtotal: bool,
    pub show_labour: bool,
    pub show_discount: bool,
    pub show_total: bool,
    pub show_amount_paid: bool,
    pub show_balance: bool,
    /// Toggles the rate and amount columns of the item table.
    pub show_product_price: bool,

    pub date_label: String,
    pub terms_label: String,
    pub notes_label: String,
    pub subtotal_label: String,
    pub total_label: String,
    pub balance_label: String,
}

impl Default for DocumentPreferences {
    fn default() -> Self {
        DocumentPreferences {
            show_date: true,
            show_status: true,
            show_payment_method: true,
            show_terms: true,
            show_notes: true,
            show_summary: true,
            show_subtotal: true,
            show_labour: true,
            show_discount: true,
            show_total: true,
            show_amount_paid: true,
            show_balance: true,
            show_product_price: true,
            date_label: "Date".to_string(),
            terms_label: "Terms & Conditions".to_string(),
            notes_label: "Notes".to_string(),
            subtotal_label: "Subtotal".to_string(),
            total_label: "Total".to_string(),
            balance_label: "Balance Due".to_string(),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Font sizes (in points) used by the printable layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub business_name: u32,
    pub document_title: u32,
    pub heading: u32,
    pub body: u32,
    pub total: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        FontSizes {
            business_name: 30,
            document_title: 48,
            heading: 12,
            body: 14,
            total: 18,
        }
    }
}

/// Business-wide settings shared by every document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsProfile {
    pub business_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Logo image as a data URL, empty when none uploaded.
    pub logo: String,
    /// Currency symbol prefixed to every printed amount.
    pub currency: String,
    /// Terms applied to newly created bills.
    pub default_terms: String,
    /// UPI virtual payment address for the scan-to-pay QR code.
    pub payment_upi: String,
    /// Accent color for the printed layout, e.g. "#4f46e5".
    pub theme_color: String,
    pub font_family: String,
    pub font_sizes: FontSizes,
}

impl Default for SettingsProfile {
    fn default() -> Self {
        SettingsProfile {
            business_name: "My Business".to_string(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            logo: String::new(),
            currency: "₹".to_string(),
            default_terms: String::new(),
            payment_upi: String::new(),
            theme_color: "#4f46e5".to_string(),
            font_family: "Inter".to_string(),
            font_sizes: FontSizes::default(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_quantity_and_price() {
        let mut item = LineItem::new();
        item.quantity = 2.5;
        item.unit_price = 100.0;
        assert_eq!(item.line_total(), 250.0);
    }

    #[test]
    fn made_to_measure_types() {
        assert!(ProductType::SilkCottonBed.requires_dimensions());
        assert!(ProductType::SofaCushion.requires_dimensions());
        assert!(!ProductType::Pillow.requires_dimensions());
        assert!(!ProductType::Custom.requires_dimensions());
    }

    #[test]
    fn balance_due_only_for_bills() {
        let mut doc = sample_estimate();
        assert_eq!(doc.balance_due(), None);

        doc.kind = DocumentKind::Bill(BillDetails::new(String::new()));
        doc.total = 500.0;
        if let Some(details) = doc.bill_mut() {
            details.amount_paid = 150.0;
        }
        assert_eq!(doc.balance_due(), Some(350.0));
    }

    #[test]
    fn document_kind_round_trips_with_internal_tag() {
        let mut doc = sample_estimate();
        doc.kind = DocumentKind::Bill(BillDetails::new("Net 30".to_string()));

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"type\":\"bill\""));

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn preferences_default_everything_on() {
        let prefs = DocumentPreferences::default();
        assert!(prefs.show_summary);
        assert!(prefs.show_product_price);
        assert_eq!(prefs.balance_label, "Balance Due");
    }

    fn sample_estimate() -> Document {
        Document {
            id: "doc-1".to_string(),
            number: "EST-1".to_string(),
            customer_name: String::new(),
            customer_phone: String::new(),
            customer_address: String::new(),
            date: "2024-05-01".to_string(),
            products: Vec::new(),
            labour_charge: 0.0,
            discount_amount: 0.0,
            notes: String::new(),
            subtotal: 0.0,
            total: 0.0,
            preferences: DocumentPreferences::default(),
            kind: DocumentKind::Estimate {
                status: EstimateStatus::Draft,
            },
        }
    }
}
