//! # Draft Editing Session
//!
//! A `DraftEditor` owns the document currently open in the editor and
//! funnels every mutation through one place so the denormalized
//! totals can never go stale: each mutating method ends with a
//! recompute.
//!
//! ## Persisted Flag
//! The editor tracks whether its document has ever been saved.
//! Unsaved drafts may still switch flavor (estimate <-> bill); saved
//! documents may not, the only sanctioned path being conversion.
//!
//! ```text
//! begin(type) ──► DraftEditor { persisted: false }   flavor switchable
//! edit(doc) ────► DraftEditor { persisted: true }    flavor fixed
//! ```

use billcraft_core::error::{CoreError, CoreResult};
use billcraft_core::lifecycle::{change_draft_type, new_document};
use billcraft_core::pricing::recompute;
use billcraft_core::{
    BillStatus, Document, DocumentKind, DocumentType, EstimateStatus, LineItem, PaymentMethod,
    Product, ProductType, SettingsProfile,
};

/// Coerces free-text numeric input to an amount.
///
/// Anything that does not parse as a finite number becomes 0, so a
/// half-typed value can never corrupt the totals.
pub fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// The editing session for one document.
#[derive(Debug, Clone)]
pub struct DraftEditor {
    document: Document,
    persisted: bool,
}

impl DraftEditor {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Starts a fresh, unsaved draft of the given flavor.
    pub fn begin(
        doc_type: DocumentType,
        existing: &[Document],
        settings: &SettingsProfile,
    ) -> Self {
        DraftEditor {
            document: new_document(doc_type, existing, settings),
            persisted: false,
        }
    }

    /// Opens an already-saved document for editing.
    pub fn edit(document: Document) -> Self {
        DraftEditor {
            document,
            persisted: true,
        }
    }

    /// The document as it currently stands.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consumes the editor, yielding the document for saving.
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Marks the draft as saved; the flavor is fixed from here on.
    pub fn mark_persisted(&mut self) {
        self.persisted = true;
    }

    // =========================================================================
    // Header fields
    // =========================================================================

    pub fn set_customer(&mut self, name: &str, phone: &str, address: &str) {
        self.document.customer_name = name.to_string();
        self.document.customer_phone = phone.to_string();
        self.document.customer_address = address.to_string();
    }

    pub fn set_date(&mut self, date: &str) {
        self.document.date = date.to_string();
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.document.notes = notes.to_string();
    }

    /// Sets the labour charge from raw text input.
    pub fn set_labour_charge(&mut self, raw: &str) {
        self.document.labour_charge = parse_amount(raw);
        recompute(&mut self.document);
    }

    /// Sets the discount from raw text input.
    pub fn set_discount(&mut self, raw: &str) {
        self.document.discount_amount = parse_amount(raw);
        recompute(&mut self.document);
    }

    // =========================================================================
    // Products and line items
    // =========================================================================

    /// Adds an empty product of the given type; returns its id.
    pub fn add_product(&mut self, product_type: ProductType) -> String {
        let product = Product::new(product_type);
        let id = product.id.clone();
        self.document.products.push(product);
        recompute(&mut self.document);
        id
    }

    /// Removes a product by id.
    pub fn remove_product(&mut self, product_id: &str) -> CoreResult<()> {
        let before = self.document.products.len();
        self.document.products.retain(|p| p.id != product_id);
        if self.document.products.len() == before {
            return Err(CoreError::ProductNotFound(product_id.to_string()));
        }
        recompute(&mut self.document);
        Ok(())
    }

    /// Mutates a product in place, then recomputes totals.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// editor.update_product(&id, |p| p.unit_price = Some(150.0))?;
    /// ```
    pub fn update_product<F>(&mut self, product_id: &str, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut Product),
    {
        let product = self
            .document
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
        f(product);
        recompute(&mut self.document);
        Ok(())
    }

    /// Adds an empty line item to a product; returns the item id.
    pub fn add_line_item(&mut self, product_id: &str) -> CoreResult<String> {
        let item = LineItem::new();
        let id = item.id.clone();
        self.update_product(product_id, |p| p.line_items.push(item))?;
        Ok(id)
    }

    /// Mutates a line item in place, then recomputes totals.
    pub fn update_line_item<F>(&mut self, product_id: &str, item_id: &str, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut LineItem),
    {
        let product = self
            .document
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
        let item = product
            .line_items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::LineItemNotFound(item_id.to_string()))?;
        f(item);
        recompute(&mut self.document);
        Ok(())
    }

    /// Removes a line item from a product.
    pub fn remove_line_item(&mut self, product_id: &str, item_id: &str) -> CoreResult<()> {
        let product = self
            .document
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
        let before = product.line_items.len();
        product.line_items.retain(|i| i.id != item_id);
        if product.line_items.len() == before {
            return Err(CoreError::LineItemNotFound(item_id.to_string()));
        }
        recompute(&mut self.document);
        Ok(())
    }

    // =========================================================================
    // Bill fields
    // =========================================================================

    /// Sets the amount paid from raw text input. No-op on estimates.
    pub fn set_amount_paid(&mut self, raw: &str) {
        let amount = parse_amount(raw);
        if let Some(details) = self.document.bill_mut() {
            details.amount_paid = amount;
        }
    }

    pub fn set_payment_method(&mut self, method: Option<PaymentMethod>) {
        if let Some(details) = self.document.bill_mut() {
            details.payment_method = method;
        }
    }

    pub fn set_estimate_status(&mut self, status: EstimateStatus) {
        if let DocumentKind::Estimate { status: current } = &mut self.document.kind {
            *current = status;
        }
    }

    pub fn set_bill_status(&mut self, status: BillStatus) {
        if let Some(details) = self.document.bill_mut() {
            details.status = status;
        }
    }

    pub fn set_terms(&mut self, terms: &str) {
        if let Some(details) = self.document.bill_mut() {
            details.terms = terms.to_string();
        }
    }

    // =========================================================================
    // Flavor switching
    // =========================================================================

    /// Switches the draft's flavor, if it has never been saved.
    ///
    /// Persisted documents silently keep their flavor; see the module
    /// docs for why.
    pub fn change_type(
        &mut self,
        new_type: DocumentType,
        existing: &[Document],
        settings: &SettingsProfile,
    ) {
        change_draft_type(
            &mut self.document,
            new_type,
            existing,
            settings,
            self.persisted,
        );
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SettingsProfile {
        SettingsProfile {
            default_terms: "Net 15".to_string(),
            ..SettingsProfile::default()
        }
    }

    fn editor() -> DraftEditor {
        DraftEditor::begin(DocumentType::Estimate, &[], &settings())
    }

    #[test]
    fn parse_amount_coerces_garbage_to_zero() {
        assert_eq!(parse_amount("150"), 150.0);
        assert_eq!(parse_amount(" 49.50 "), 49.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("12abc"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn every_mutation_keeps_totals_fresh() {
        let mut editor = editor();
        let product_id = editor.add_product(ProductType::SilkCottonBed);
        editor
            .update_product(&product_id, |p| p.unit_price = Some(100.0))
            .unwrap();
        assert_eq!(editor.document().total, 100.0);

        let item_id = editor.add_line_item(&product_id).unwrap();
        editor
            .update_line_item(&product_id, &item_id, |i| {
                i.quantity = 2.0;
                i.unit_price = 50.0;
            })
            .unwrap();
        assert_eq!(editor.document().subtotal, 200.0);

        editor.set_labour_charge("75");
        editor.set_discount("25");
        assert_eq!(editor.document().total, 250.0);

        editor.remove_line_item(&product_id, &item_id).unwrap();
        assert_eq!(editor.document().total, 150.0);

        editor.remove_product(&product_id).unwrap();
        assert_eq!(editor.document().subtotal, 0.0);
        assert_eq!(editor.document().total, 50.0); // labour - discount remain
    }

    #[test]
    fn end_to_end_estimate_to_bill() {
        let settings = settings();
        let mut editor = DraftEditor::begin(DocumentType::Estimate, &[], &settings);

        let product_id = editor.add_product(ProductType::Pillow);
        editor.update_product(&product_id, |p| p.quantity = 2).unwrap();
        let item_id = editor.add_line_item(&product_id).unwrap();
        editor
            .update_line_item(&product_id, &item_id, |i| {
                i.quantity = 1.0;
                i.unit_price = 150.0;
            })
            .unwrap();
        assert_eq!(editor.document().subtotal, 300.0);
        assert_eq!(editor.document().total, 300.0);

        editor.set_labour_charge("50");
        assert_eq!(editor.document().total, 350.0);

        let estimate = editor.into_document();
        let bill =
            billcraft_core::lifecycle::convert_to_bill(&estimate, &[estimate.clone()], &settings)
                .unwrap();
        let mut editor = DraftEditor::edit(bill);
        editor.set_amount_paid("100");
        assert_eq!(editor.document().balance_due(), Some(250.0));
    }

    #[test]
    fn missing_ids_are_reported() {
        let mut editor = editor();
        assert!(matches!(
            editor.remove_product("nope"),
            Err(CoreError::ProductNotFound(_))
        ));
        assert!(matches!(
            editor.add_line_item("nope"),
            Err(CoreError::ProductNotFound(_))
        ));

        let product_id = editor.add_product(ProductType::Pillow);
        assert!(matches!(
            editor.remove_line_item(&product_id, "nope"),
            Err(CoreError::LineItemNotFound(_))
        ));
    }

    #[test]
    fn bill_setters_are_noops_on_estimates() {
        let mut editor = editor();
        editor.set_amount_paid("100");
        editor.set_terms("ignored");
        assert!(!editor.document().is_bill());
    }

    #[test]
    fn estimate_can_be_finalized() {
        let mut editor = editor();
        editor.set_estimate_status(EstimateStatus::Finalized);
        assert_eq!(editor.document().kind.status_label(), "Finalized");

        // and the setter is a no-op on bills
        let mut editor = DraftEditor::begin(DocumentType::Bill, &[], &settings());
        editor.set_estimate_status(EstimateStatus::Draft);
        assert!(editor.document().is_bill());
    }

    #[test]
    fn unsaved_draft_switches_flavor_and_back() {
        let settings = settings();
        let mut editor = DraftEditor::begin(DocumentType::Estimate, &[], &settings);
        assert_eq!(editor.document().number, "EST-1");

        editor.change_type(DocumentType::Bill, &[], &settings);
        assert!(editor.document().is_bill());
        assert_eq!(editor.document().number, "BILL-1");
        assert_eq!(editor.document().bill().unwrap().terms, "Net 15");

        editor.change_type(DocumentType::Estimate, &[], &settings);
        assert!(!editor.document().is_bill());
        assert_eq!(editor.document().number, "EST-1");
    }

    #[test]
    fn persisted_draft_keeps_its_flavor() {
        let settings = settings();
        let doc = new_document(DocumentType::Estimate, &[], &settings);
        let mut editor = DraftEditor::edit(doc);

        editor.change_type(DocumentType::Bill, &[], &settings);
        assert!(!editor.document().is_bill());
    }

    #[test]
    fn mark_persisted_locks_the_flavor() {
        let settings = settings();
        let mut editor = DraftEditor::begin(DocumentType::Estimate, &[], &settings);
        editor.mark_persisted();

        editor.change_type(DocumentType::Bill, &[], &settings);
        assert!(!editor.document().is_bill());
    }
}
