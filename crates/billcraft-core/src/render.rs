//! # Render Projector
//!
//! Projects a document plus the business settings into a
//! [`RenderedDocument`]: a printable tree with every preference toggle
//! applied, every amount formatted, and the payment QR payload built.
//! UI shells and exporters consume the tree verbatim; they make no
//! business decisions of their own.
//!
//! ## Determinism
//! Projection is a pure function of `(document, settings)`. The same
//! inputs always produce an identical tree, which is what makes
//! print/PDF/image exports reproducible.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ RenderedDocument                                             │
//! │   theme      accent color, font family, font sizes           │
//! │   header     logo, business identity, title, number, date    │
//! │   bill_to    customer block ("Guest Customer" fallback)      │
//! │   status     bill status badge (bills only)                  │
//! │   payment    payment method badge (bills only)               │
//! │   table      product rows + nested line item rows            │
//! │   summary    subtotal/labour/discount/total/paid/balance, QR │
//! │   footer     terms or thank-you, notes, "Generated by" strap │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::pricing::{format_amount, format_quantity};
use crate::types::{Document, FontSizes, Product, SettingsProfile};

// ============================================================================
// Rendered tree
// ============================================================================

/// Visual theme lifted from the settings profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub color: String,
    pub font_family: String,
    pub font_sizes: FontSizes,
}

/// A caption/value pair, e.g. `Date: 05/03/2024`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

/// A caption plus a multi-line body, e.g. the terms block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledText {
    pub label: String,
    pub text: String,
}

/// Top-of-page business identity and document identification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// Logo data URL, when the business uploaded one.
    pub logo: Option<String>,
    pub business_name: String,
    pub address: String,
    pub phone: String,
    /// Shown only when the business set an email.
    pub email: Option<String>,
    /// "ESTIMATE" or "BILL".
    pub title: String,
    pub number: String,
    /// Present only when `show_date` is on and the date parses.
    pub date: Option<LabeledValue>,
}

/// Customer block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillTo {
    /// Customer name, or "Guest Customer" when none was entered.
    pub name: String,
    pub phone: String,
    /// Shown only when an address was entered.
    pub address: Option<String>,
}

/// A small captioned badge, used for status and payment method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub label: String,
    pub value: String,
}

/// One row of the item table.
///
/// `quantity`, `rate`, and `amount` are `None` when the corresponding
/// cell is suppressed; a product row with all three `None` spans the
/// full table width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Product rows are bold section headers; item rows indent under them.
    pub is_product: bool,
    pub description: String,
    pub quantity: Option<String>,
    pub rate: Option<String>,
    pub amount: Option<String>,
}

/// The item table with its column layout resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTable {
    /// Whether the rate and amount columns exist at all.
    pub has_price_columns: bool,
    pub rows: Vec<TableRow>,
}

/// Scan-to-pay payload for the summary block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QrPayload {
    /// Full `upi://pay?...` deep link to encode as a QR image.
    pub uri: String,
    pub caption: String,
}

/// The totals block. Absent lines were toggled off or suppressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub subtotal: Option<LabeledValue>,
    pub labour: Option<LabeledValue>,
    pub discount: Option<LabeledValue>,
    pub total: Option<LabeledValue>,
    pub amount_paid: Option<LabeledValue>,
    pub balance: Option<LabeledValue>,
    pub qr: Option<QrPayload>,
}

/// Bottom-of-page terms, notes, and attribution strap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footer {
    /// Bill terms, when present and enabled.
    pub terms: Option<LabeledText>,
    /// Estimates get a generic sign-off instead of terms.
    pub thank_you: Option<String>,
    pub notes: Option<LabeledText>,
    /// "Generated by {business name}".
    pub generated_by: String,
}

/// The complete printable tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub theme: Theme,
    pub header: Header,
    pub bill_to: BillTo,
    pub status: Option<Badge>,
    pub payment: Option<Badge>,
    pub table: ItemTable,
    pub summary: Option<Summary>,
    pub footer: Footer,
}

// ============================================================================
// Projection
// ============================================================================

/// Projects a document into its printable tree.
///
/// Pure and deterministic: no clock reads, no randomness, no I/O.
pub fn project(doc: &Document, settings: &SettingsProfile) -> RenderedDocument {
    let prefs = &doc.preferences;

    let date = if prefs.show_date {
        format_date(&doc.date).map(|value| LabeledValue {
            label: label_or(&prefs.date_label, "Date"),
            value,
        })
    } else {
        None
    };

    let header = Header {
        logo: non_empty(&settings.logo),
        business_name: settings.business_name.clone(),
        address: settings.address.clone(),
        phone: settings.phone.clone(),
        email: non_empty(&settings.email),
        title: doc.doc_type().title().to_string(),
        number: doc.number.clone(),
        date,
    };

    let bill_to = BillTo {
        name: if doc.customer_name.is_empty() {
            "Guest Customer".to_string()
        } else {
            doc.customer_name.clone()
        },
        phone: doc.customer_phone.clone(),
        address: non_empty(&doc.customer_address),
    };

    let status = doc.bill().filter(|_| prefs.show_status).map(|details| Badge {
        label: "Status".to_string(),
        value: details.status.label().to_string(),
    });

    let payment = doc
        .bill()
        .filter(|_| prefs.show_payment_method)
        .and_then(|details| details.payment_method)
        .map(|method| Badge {
            label: "Payment".to_string(),
            value: method.label().to_string(),
        });

    RenderedDocument {
        theme: Theme {
            color: settings.theme_color.clone(),
            font_family: settings.font_family.clone(),
            font_sizes: settings.font_sizes.clone(),
        },
        header,
        bill_to,
        status,
        payment,
        table: project_table(doc, settings),
        summary: project_summary(doc, settings),
        footer: project_footer(doc, settings),
    }
}

fn project_table(doc: &Document, settings: &SettingsProfile) -> ItemTable {
    let show_rates = doc.preferences.show_product_price;
    let mut rows = Vec::new();

    for product in &doc.products {
        let base = product.base_price();
        let name = full_product_name(product);
        let qty = f64::from(product.quantity);

        if base > 0.0 {
            rows.push(TableRow {
                is_product: true,
                description: name,
                quantity: Some(format_quantity(qty)),
                rate: show_rates.then(|| money(settings, base)),
                amount: show_rates.then(|| money(settings, base * qty)),
            });
        } else {
            // No base price: the name row spans the table, with the
            // quantity folded into the description when it matters.
            let description = if product.quantity > 1 {
                format!("{} x {}", product.quantity, name)
            } else {
                name
            };
            rows.push(TableRow {
                is_product: true,
                description,
                quantity: None,
                rate: None,
                amount: None,
            });
        }

        for item in &product.line_items {
            let effective_qty = item.quantity * qty;
            rows.push(TableRow {
                is_product: false,
                description: item.name.clone(),
                quantity: Some(format_quantity(effective_qty)),
                rate: show_rates.then(|| money(settings, item.unit_price)),
                amount: show_rates.then(|| money(settings, effective_qty * item.unit_price)),
            });
        }
    }

    ItemTable {
        has_price_columns: show_rates,
        rows,
    }
}

fn project_summary(doc: &Document, settings: &SettingsProfile) -> Option<Summary> {
    let prefs = &doc.preferences;
    if !prefs.show_summary {
        return None;
    }

    let subtotal = prefs.show_subtotal.then(|| LabeledValue {
        label: label_or(&prefs.subtotal_label, "Subtotal"),
        value: money(settings, doc.subtotal),
    });

    let labour = (prefs.show_labour && doc.labour_charge > 0.0).then(|| LabeledValue {
        label: "Labour Charge".to_string(),
        value: money(settings, doc.labour_charge),
    });

    let discount = (prefs.show_discount && doc.discount_amount > 0.0).then(|| LabeledValue {
        label: "Discount".to_string(),
        value: format!("-{}", money(settings, doc.discount_amount)),
    });

    let total = prefs.show_total.then(|| LabeledValue {
        label: label_or(&prefs.total_label, "Total"),
        value: money(settings, doc.total),
    });

    let amount_paid = doc
        .bill()
        .filter(|_| prefs.show_amount_paid)
        .map(|details| LabeledValue {
            label: "Amount Paid".to_string(),
            value: money(settings, details.amount_paid),
        });

    let balance = doc
        .balance_due()
        .filter(|_| prefs.show_balance)
        .map(|due| LabeledValue {
            label: label_or(&prefs.balance_label, "Balance Due"),
            value: money(settings, due),
        });

    Some(Summary {
        subtotal,
        labour,
        discount,
        total,
        amount_paid,
        balance,
        qr: project_qr(doc, settings),
    })
}

/// Builds the scan-to-pay payload when all the gates are open:
/// a bill, a configured UPI address, a positive balance, and neither
/// the balance nor the amount-paid line hidden.
fn project_qr(doc: &Document, settings: &SettingsProfile) -> Option<QrPayload> {
    let prefs = &doc.preferences;
    if !doc.is_bill()
        || settings.payment_upi.trim().is_empty()
        || !prefs.show_balance
        || !prefs.show_amount_paid
    {
        return None;
    }
    let balance = doc.balance_due()?;
    if balance <= 0.0 {
        return None;
    }

    // Payee name has a length limit in the UPI deep link scheme.
    let payee: String = settings.business_name.chars().take(25).collect();
    let note = format!("Bill #{}", doc.number);
    let uri = format!(
        "upi://pay?pa={}&pn={}&am={}&cu=INR&tn={}",
        form_encode(settings.payment_upi.trim()),
        form_encode(&payee),
        form_encode(&format_amount(balance)),
        form_encode(&note),
    );

    Some(QrPayload {
        uri,
        caption: "Scan to Pay".to_string(),
    })
}

fn project_footer(doc: &Document, settings: &SettingsProfile) -> Footer {
    let prefs = &doc.preferences;

    let (terms, thank_you) = match doc.bill() {
        Some(details) if prefs.show_terms && !details.terms.is_empty() => (
            Some(LabeledText {
                label: label_or(&prefs.terms_label, "Terms & Conditions"),
                text: details.terms.clone(),
            }),
            None,
        ),
        Some(_) => (None, None),
        None if prefs.show_terms => (None, Some("Thank you for your business!".to_string())),
        None => (None, None),
    };

    let notes = (prefs.show_notes && !doc.notes.is_empty()).then(|| LabeledText {
        label: label_or(&prefs.notes_label, "Notes"),
        text: doc.notes.clone(),
    });

    Footer {
        terms,
        thank_you,
        notes,
        generated_by: format!("Generated by {}", settings.business_name),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Full printed product name, dimensions appended for made-to-measure
/// types when both height and width were entered.
fn full_product_name(product: &Product) -> String {
    let mut name = match product.product_type {
        crate::types::ProductType::Custom => {
            if product.custom_name.is_empty() {
                "Custom Product".to_string()
            } else {
                product.custom_name.clone()
            }
        }
        other => other.display_name().to_string(),
    };

    if product.product_type.requires_dimensions()
        && !product.height.is_empty()
        && !product.width.is_empty()
    {
        name.push_str(&format!(
            " ({} x {} {})",
            product.height,
            product.width,
            product.unit.label()
        ));
    }
    name
}

/// ISO `YYYY-MM-DD` in, `DD/MM/YYYY` out. Invalid or empty dates
/// yield `None` so the date line simply disappears.
fn format_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%d/%m/%Y").to_string())
}

fn label_or(custom: &str, default: &str) -> String {
    if custom.is_empty() {
        default.to_string()
    } else {
        custom.to_string()
    }
}

fn money(settings: &SettingsProfile, value: f64) -> String {
    format!("{}{}", settings.currency, format_amount(value))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Percent-encodes a query component the `application/x-www-form-urlencoded`
/// way: alphanumerics and `*-._` pass through, space becomes `+`, every
/// other byte becomes `%XX`.
fn form_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
