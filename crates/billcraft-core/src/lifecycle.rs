//! # Document Lifecycle
//!
//! Creation, numbering, and type transitions for documents.
//!
//! ## Numbering
//! Each flavor has its own sequence: `EST-1, EST-2, ...` and
//! `BILL-1, BILL-2, ...`. The next number is derived by scanning the
//! existing collection, so deleting the highest-numbered document
//! reuses its number. That matches how a paper book works and keeps
//! the scheme self-healing after imports.
//!
//! ## Transitions
//! ```text
//! new_document ──► Estimate(Draft) ──finalize──► Estimate(Finalized)
//!                        │
//!                        └──convert_to_bill──► Bill(Due)   (new id, new number)
//!
//! change_draft_type: unsaved drafts only, flips flavor in place
//! ```

use chrono::Utc;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{
    BillDetails, Document, DocumentKind, DocumentPreferences, DocumentType, EstimateStatus,
    SettingsProfile,
};

// ============================================================================
// Numbering
// ============================================================================

/// Extracts the numeric suffix of a document number.
///
/// Skips any leading non-digit characters, then parses the digit run
/// that follows. Anything unparsable counts as 0, so malformed
/// numbers never poison the sequence.
///
/// ## Example
/// ```
/// use billcraft_core::lifecycle::numeric_suffix;
/// assert_eq!(numeric_suffix("EST-42"), 42);
/// assert_eq!(numeric_suffix("BILL-007"), 7);
/// assert_eq!(numeric_suffix("draft"), 0);
/// ```
pub fn numeric_suffix(number: &str) -> u32 {
    let digits: String = number
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Next sequence number for the given flavor: max existing + 1, or 1.
///
/// Only documents of the same flavor participate; estimates and bills
/// number independently.
pub fn next_number(existing: &[Document], doc_type: DocumentType) -> u32 {
    existing
        .iter()
        .filter(|doc| doc.doc_type() == doc_type)
        .map(|doc| numeric_suffix(&doc.number))
        .max()
        .map_or(1, |max| max + 1)
}

/// Formats a sequence number as a display number, e.g. `EST-4`.
pub fn format_number(doc_type: DocumentType, n: u32) -> String {
    format!("{}-{}", doc_type.prefix(), n)
}

// ============================================================================
// Creation
// ============================================================================

/// Creates a blank document of the given flavor, numbered against the
/// existing collection.
///
/// Estimates start as drafts. Bills start due with nothing paid, cash
/// as the default method, and the business default terms attached.
/// The date is today's UTC date; callers may overwrite it.
pub fn new_document(
    doc_type: DocumentType,
    existing: &[Document],
    settings: &SettingsProfile,
) -> Document {
    let kind = match doc_type {
        DocumentType::Estimate => DocumentKind::Estimate {
            status: EstimateStatus::Draft,
        },
        DocumentType::Bill => DocumentKind::Bill(BillDetails::new(settings.default_terms.clone())),
    };

    Document {
        id: Uuid::new_v4().to_string(),
        number: format_number(doc_type, next_number(existing, doc_type)),
        customer_name: String::new(),
        customer_phone: String::new(),
        customer_address: String::new(),
        date: Utc::now().format("%Y-%m-%d").to_string(),
        products: Vec::new(),
        labour_charge: 0.0,
        discount_amount: 0.0,
        notes: String::new(),
        subtotal: 0.0,
        total: 0.0,
        preferences: DocumentPreferences::default(),
        kind,
    }
}

// ============================================================================
// Transitions
// ============================================================================

/// Converts an estimate into a new bill document.
///
/// The source estimate is left untouched; the returned bill is a
/// separate document with:
/// - a fresh id and the next `BILL-n` number
/// - all customer, product, charge, note, date, and preference data copied
/// - status `Due`, nothing paid, cash as the default method
/// - the business default terms
/// - `estimate_id` linking back to the source
///
/// ## Errors
/// Returns [`CoreError::NotAnEstimate`] when the source is already a bill.
pub fn convert_to_bill(
    source: &Document,
    existing: &[Document],
    settings: &SettingsProfile,
) -> CoreResult<Document> {
    if source.is_bill() {
        return Err(CoreError::NotAnEstimate(source.id.clone()));
    }

    let mut details = BillDetails::new(settings.default_terms.clone());
    details.estimate_id = Some(source.id.clone());

    let mut bill = source.clone();
    bill.id = Uuid::new_v4().to_string();
    bill.number = format_number(
        DocumentType::Bill,
        next_number(existing, DocumentType::Bill),
    );
    bill.kind = DocumentKind::Bill(details);
    Ok(bill)
}

/// Switches the flavor of an UNSAVED draft in place.
///
/// Once a document has been persisted its flavor is fixed; the only
/// sanctioned path from estimate to bill is [`convert_to_bill`].
/// Calling this on a persisted document, or with the flavor it
/// already has, is a no-op.
///
/// The draft keeps its id and all entered data but is renumbered into
/// the target sequence and reset to that flavor's initial status.
pub fn change_draft_type(
    draft: &mut Document,
    new_type: DocumentType,
    existing: &[Document],
    settings: &SettingsProfile,
    persisted: bool,
) {
    if persisted || draft.doc_type() == new_type {
        return;
    }

    draft.number = format_number(new_type, next_number(existing, new_type));
    draft.kind = match new_type {
        DocumentType::Estimate => DocumentKind::Estimate {
            status: EstimateStatus::Draft,
        },
        DocumentType::Bill => DocumentKind::Bill(BillDetails::new(settings.default_terms.clone())),
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BillStatus;

    fn settings() -> SettingsProfile {
        SettingsProfile {
            default_terms: "Payment due within 15 days.".to_string(),
            ..SettingsProfile::default()
        }
    }

    #[test]
    fn suffix_extraction_handles_odd_numbers() {
        assert_eq!(numeric_suffix("EST-3"), 3);
        assert_eq!(numeric_suffix("BILL-120"), 120);
        assert_eq!(numeric_suffix("EST-"), 0);
        assert_eq!(numeric_suffix(""), 0);
        // digit run ends at the first non-digit
        assert_eq!(numeric_suffix("A1B2"), 1);
    }

    #[test]
    fn sequences_are_independent_per_flavor() {
        let settings = settings();
        let mut docs: Vec<Document> = Vec::new();

        let e1 = new_document(DocumentType::Estimate, &docs, &settings);
        assert_eq!(e1.number, "EST-1");
        docs.push(e1);

        let b1 = new_document(DocumentType::Bill, &docs, &settings);
        assert_eq!(b1.number, "BILL-1");
        docs.push(b1);

        let e2 = new_document(DocumentType::Estimate, &docs, &settings);
        assert_eq!(e2.number, "EST-2");
        docs.push(e2);

        let e3 = new_document(DocumentType::Estimate, &docs, &settings);
        assert_eq!(e3.number, "EST-3");
        docs.push(e3);

        let b2 = new_document(DocumentType::Bill, &docs, &settings);
        assert_eq!(b2.number, "BILL-2");
    }

    #[test]
    fn numbering_fills_after_highest_deleted() {
        let settings = settings();
        let mut docs = vec![
            new_document(DocumentType::Estimate, &[], &settings), // EST-1
        ];
        let e2 = new_document(DocumentType::Estimate, &docs, &settings); // EST-2
        docs.push(e2);

        // delete EST-2; the next estimate reuses its number
        docs.pop();
        let next = new_document(DocumentType::Estimate, &docs, &settings);
        assert_eq!(next.number, "EST-2");
    }

    #[test]
    fn new_estimate_starts_as_draft() {
        let doc = new_document(DocumentType::Estimate, &[], &settings());
        assert_eq!(
            doc.kind,
            DocumentKind::Estimate {
                status: EstimateStatus::Draft
            }
        );
        assert!(doc.products.is_empty());
        assert_eq!(doc.total, 0.0);
        // ISO date shape
        assert_eq!(doc.date.len(), 10);
        assert_eq!(&doc.date[4..5], "-");
    }

    #[test]
    fn new_bill_carries_default_terms() {
        let doc = new_document(DocumentType::Bill, &[], &settings());
        let details = doc.bill().unwrap();
        assert_eq!(details.status, BillStatus::Due);
        assert_eq!(details.amount_paid, 0.0);
        assert_eq!(details.terms, "Payment due within 15 days.");
        assert_eq!(details.estimate_id, None);
    }

    #[test]
    fn conversion_copies_data_and_links_back() {
        let settings = settings();
        let mut estimate = new_document(DocumentType::Estimate, &[], &settings);
        estimate.customer_name = "Asha Traders".to_string();
        estimate.labour_charge = 75.0;
        estimate.notes = "Deliver Friday".to_string();
        let docs = vec![estimate.clone()];

        let bill = convert_to_bill(&estimate, &docs, &settings).unwrap();

        assert_ne!(bill.id, estimate.id);
        assert_eq!(bill.number, "BILL-1");
        assert_eq!(bill.customer_name, "Asha Traders");
        assert_eq!(bill.labour_charge, 75.0);
        assert_eq!(bill.notes, "Deliver Friday");
        assert_eq!(bill.date, estimate.date);

        let details = bill.bill().unwrap();
        assert_eq!(details.status, BillStatus::Due);
        assert_eq!(details.amount_paid, 0.0);
        assert_eq!(details.terms, settings.default_terms);
        assert_eq!(details.estimate_id.as_deref(), Some(estimate.id.as_str()));

        // source untouched
        assert!(!estimate.is_bill());
    }

    #[test]
    fn converting_a_bill_is_rejected() {
        let settings = settings();
        let bill = new_document(DocumentType::Bill, &[], &settings);
        let err = convert_to_bill(&bill, &[], &settings).unwrap_err();
        assert_eq!(err, CoreError::NotAnEstimate(bill.id));
    }

    #[test]
    fn draft_type_change_renumbers_and_resets_status() {
        let settings = settings();
        let existing = vec![new_document(DocumentType::Bill, &[], &settings)]; // BILL-1

        let mut draft = new_document(DocumentType::Estimate, &existing, &settings);
        draft.customer_name = "Kumar".to_string();

        change_draft_type(&mut draft, DocumentType::Bill, &existing, &settings, false);
        assert_eq!(draft.number, "BILL-2");
        assert!(draft.is_bill());
        assert_eq!(draft.customer_name, "Kumar");
        assert_eq!(draft.bill().unwrap().terms, settings.default_terms);
    }

    #[test]
    fn persisted_documents_never_change_flavor() {
        let settings = settings();
        let mut doc = new_document(DocumentType::Estimate, &[], &settings);
        let before = doc.clone();

        change_draft_type(&mut doc, DocumentType::Bill, &[], &settings, true);
        assert_eq!(doc, before);
    }

    #[test]
    fn same_flavor_change_is_a_no_op() {
        let settings = settings();
        let mut doc = new_document(DocumentType::Estimate, &[], &settings);
        let before = doc.clone();

        change_draft_type(&mut doc, DocumentType::Estimate, &[], &settings, false);
        assert_eq!(doc, before);
    }
}
