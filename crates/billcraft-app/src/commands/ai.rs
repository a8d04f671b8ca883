//! # AI Suggestion Commands
//!
//! Command handlers that apply provider suggestions to the draft.
//!
//! ## Staleness Guard
//! Suggestions may arrive after the user has already deleted the
//! product or line item they were requested for. A late suggestion
//! for a vanished target is silently discarded (`Ok(None)`), never an
//! error: the user did nothing wrong.

use tracing::debug;

use billcraft_core::CoreError;

use crate::error::ApiError;
use crate::state::DraftEditor;
use crate::suggest::SuggestionProvider;

/// Requests a name suggestion for a line item and applies it.
///
/// Returns the applied suggestion, or `None` when the provider had
/// nothing to offer or the target no longer exists.
pub fn suggest_line_item_name(
    provider: &dyn SuggestionProvider,
    editor: &mut DraftEditor,
    product_id: &str,
    item_id: &str,
    raw: &str,
) -> Result<Option<String>, ApiError> {
    let Some(suggestion) = provider.suggest_name(raw) else {
        return Ok(None);
    };

    let applied = suggestion.clone();
    match editor.update_line_item(product_id, item_id, |item| item.name = applied) {
        Ok(()) => Ok(Some(suggestion)),
        Err(CoreError::ProductNotFound(_)) | Err(CoreError::LineItemNotFound(_)) => {
            debug!(product_id, item_id, "Discarding stale name suggestion");
            Ok(None)
        }
        Err(other) => Err(other.into()),
    }
}

/// Requests a price suggestion for a line item and applies it.
///
/// The suggestion is based on the item's current name. Same staleness
/// rules as [`suggest_line_item_name`].
pub fn suggest_line_item_price(
    provider: &dyn SuggestionProvider,
    editor: &mut DraftEditor,
    product_id: &str,
    item_id: &str,
) -> Result<Option<f64>, ApiError> {
    let name = editor
        .document()
        .products
        .iter()
        .find(|p| p.id == product_id)
        .and_then(|p| p.line_items.iter().find(|i| i.id == item_id))
        .map(|i| i.name.clone());

    let Some(name) = name else {
        // target already gone, nothing to suggest against
        return Ok(None);
    };
    let Some(price) = provider.suggest_price(&name) else {
        return Ok(None);
    };

    match editor.update_line_item(product_id, item_id, |item| item.unit_price = price) {
        Ok(()) => Ok(Some(price)),
        Err(CoreError::ProductNotFound(_)) | Err(CoreError::LineItemNotFound(_)) => {
            debug!(product_id, item_id, "Discarding stale price suggestion");
            Ok(None)
        }
        Err(other) => Err(other.into()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use billcraft_core::{DocumentType, ProductType, SettingsProfile};

    use crate::suggest::FallbackSuggester;

    struct PricingStub;

    impl SuggestionProvider for PricingStub {
        fn suggest_name(&self, raw: &str) -> Option<String> {
            FallbackSuggester.suggest_name(raw)
        }

        fn suggest_price(&self, item_name: &str) -> Option<f64> {
            (item_name == "Standard Pillow Cover").then_some(150.0)
        }
    }

    fn editor_with_item() -> (DraftEditor, String, String) {
        let mut editor =
            DraftEditor::begin(DocumentType::Estimate, &[], &SettingsProfile::default());
        let product_id = editor.add_product(ProductType::Pillow);
        let item_id = editor.add_line_item(&product_id).unwrap();
        (editor, product_id, item_id)
    }

    #[test]
    fn name_suggestion_is_applied() {
        let (mut editor, product_id, item_id) = editor_with_item();

        let applied = suggest_line_item_name(
            &FallbackSuggester,
            &mut editor,
            &product_id,
            &item_id,
            "standard pillow cover",
        )
        .unwrap();

        assert_eq!(applied.as_deref(), Some("Standard Pillow Cover"));
        assert_eq!(
            editor.document().products[0].line_items[0].name,
            "Standard Pillow Cover"
        );
    }

    #[test]
    fn stale_suggestion_is_discarded() {
        let (mut editor, product_id, item_id) = editor_with_item();
        editor.remove_product(&product_id).unwrap();

        let applied = suggest_line_item_name(
            &FallbackSuggester,
            &mut editor,
            &product_id,
            &item_id,
            "anything",
        )
        .unwrap();
        assert_eq!(applied, None);
    }

    #[test]
    fn price_suggestion_updates_totals() {
        let (mut editor, product_id, item_id) = editor_with_item();
        editor
            .update_line_item(&product_id, &item_id, |i| {
                i.name = "Standard Pillow Cover".to_string()
            })
            .unwrap();

        let applied =
            suggest_line_item_price(&PricingStub, &mut editor, &product_id, &item_id).unwrap();
        assert_eq!(applied, Some(150.0));
        assert_eq!(editor.document().total, 150.0);
    }

    #[test]
    fn fallback_never_applies_a_price() {
        let (mut editor, product_id, item_id) = editor_with_item();
        let applied =
            suggest_line_item_price(&FallbackSuggester, &mut editor, &product_id, &item_id)
                .unwrap();
        assert_eq!(applied, None);
        assert_eq!(editor.document().products[0].line_items[0].unit_price, 0.0);
    }
}
