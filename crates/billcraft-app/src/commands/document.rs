//! # Document Commands
//!
//! Command handlers for the document collection: listing, fetching,
//! saving, deleting, and estimate-to-bill conversion.
//!
//! ## Persistence Model
//! The in-memory [`DocumentsState`] is the source of truth while the
//! app runs; every write command mutates it first, then persists the
//! whole collection in one store write. A crash between the two
//! loses at most the in-flight command.

use tracing::{debug, info};

use billcraft_core::lifecycle::convert_to_bill;
use billcraft_core::pricing::recompute;
use billcraft_core::{Document, DocumentType, SettingsProfile};
use billcraft_db::Database;

use crate::error::ApiError;
use crate::state::{DocumentsState, DraftEditor, SettingsState};

/// Lists all documents, newest first by document date.
pub async fn list_documents(documents: &DocumentsState) -> Result<Vec<Document>, ApiError> {
    Ok(documents.sorted_by_date_desc())
}

/// Fetches a single document by id.
pub async fn get_document(documents: &DocumentsState, id: &str) -> Result<Document, ApiError> {
    documents
        .find(id)
        .ok_or_else(|| ApiError::not_found("Document", id))
}

/// Starts a new unsaved draft of the given flavor.
///
/// The draft is numbered against the current collection but is not
/// part of it until [`save_document`] is called.
pub fn begin_draft(
    documents: &DocumentsState,
    settings: &SettingsState,
    doc_type: DocumentType,
) -> DraftEditor {
    let profile = settings.get();
    documents.with_documents(|docs| DraftEditor::begin(doc_type, docs, &profile))
}

/// Saves a document: upserts it into the collection and persists.
///
/// Totals are recomputed before the write so a stale client can never
/// persist numbers that disagree with the products.
pub async fn save_document(
    db: &Database,
    documents: &DocumentsState,
    mut document: Document,
) -> Result<Document, ApiError> {
    recompute(&mut document);
    documents.upsert(document.clone());

    let snapshot = documents.snapshot();
    db.store().save_documents(&snapshot).await?;

    info!(id = %document.id, number = %document.number, "Saved document");
    Ok(document)
}

/// Deletes a document.
///
/// Deletion is destructive and unrecoverable, so the caller must pass
/// `confirmed = true`; the shell is expected to have shown a
/// confirmation dialog first.
pub async fn delete_document(
    db: &Database,
    documents: &DocumentsState,
    id: &str,
    confirmed: bool,
) -> Result<(), ApiError> {
    if !confirmed {
        return Err(ApiError::confirmation_required(
            "Deleting a document requires confirmation",
        ));
    }

    if !documents.remove(id) {
        return Err(ApiError::not_found("Document", id));
    }

    let snapshot = documents.snapshot();
    db.store().save_documents(&snapshot).await?;

    info!(id, "Deleted document");
    Ok(())
}

/// Converts a saved estimate into a new bill and persists both.
///
/// The estimate is left untouched; the returned bill is a separate
/// document linked back via its `estimate_id`.
pub async fn convert_estimate(
    db: &Database,
    documents: &DocumentsState,
    settings: &SettingsState,
    estimate_id: &str,
) -> Result<Document, ApiError> {
    let estimate = documents
        .find(estimate_id)
        .ok_or_else(|| ApiError::not_found("Document", estimate_id))?;

    let profile: SettingsProfile = settings.get();
    let bill = documents.with_documents(|docs| convert_to_bill(&estimate, docs, &profile))?;

    documents.upsert(bill.clone());
    let snapshot = documents.snapshot();
    db.store().save_documents(&snapshot).await?;

    debug!(
        estimate = %estimate.number,
        bill = %bill.number,
        "Converted estimate to bill"
    );
    Ok(bill)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use billcraft_core::lifecycle::new_document;
    use billcraft_core::{LineItem, Product, ProductType};
    use billcraft_db::DbConfig;

    use crate::error::ErrorCode;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn states() -> (DocumentsState, SettingsState) {
        (DocumentsState::new(), SettingsState::new())
    }

    #[tokio::test]
    async fn save_then_reload_round_trips_through_the_store() {
        let db = db().await;
        let (documents, settings) = states();

        let draft = begin_draft(&documents, &settings, DocumentType::Estimate);
        let saved = save_document(&db, &documents, draft.into_document())
            .await
            .unwrap();
        assert_eq!(saved.number, "EST-1");

        let persisted = db.store().load_documents().await.unwrap();
        assert_eq!(persisted, documents.snapshot());
    }

    #[tokio::test]
    async fn save_recomputes_stale_totals() {
        let db = db().await;
        let (documents, settings) = states();

        let mut doc = new_document(DocumentType::Estimate, &[], &settings.get());
        let mut product = Product::new(ProductType::Pillow);
        product.unit_price = Some(100.0);
        let mut item = LineItem::new();
        item.quantity = 2.0;
        item.unit_price = 50.0;
        product.line_items.push(item);
        doc.products.push(product);
        // client sent garbage totals
        doc.subtotal = 1.0;
        doc.total = 1.0;

        let saved = save_document(&db, &documents, doc).await.unwrap();
        assert_eq!(saved.subtotal, 200.0);
        assert_eq!(saved.total, 200.0);
    }

    #[tokio::test]
    async fn saving_twice_does_not_duplicate() {
        let db = db().await;
        let (documents, settings) = states();

        let doc = begin_draft(&documents, &settings, DocumentType::Estimate).into_document();
        save_document(&db, &documents, doc.clone()).await.unwrap();
        save_document(&db, &documents, doc).await.unwrap();

        assert_eq!(documents.len(), 1);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let db = db().await;
        let (documents, settings) = states();
        let doc = begin_draft(&documents, &settings, DocumentType::Estimate).into_document();
        let saved = save_document(&db, &documents, doc).await.unwrap();

        let err = delete_document(&db, &documents, &saved.id, false)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfirmationRequired);
        assert_eq!(documents.len(), 1);

        delete_document(&db, &documents, &saved.id, true)
            .await
            .unwrap();
        assert!(documents.is_empty());
        assert!(db.store().load_documents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_missing_document_is_not_found() {
        let db = db().await;
        let (documents, _) = states();
        let err = delete_document(&db, &documents, "ghost", true)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn conversion_persists_bill_and_keeps_estimate() {
        let db = db().await;
        let (documents, settings) = states();
        let estimate =
            begin_draft(&documents, &settings, DocumentType::Estimate).into_document();
        let estimate = save_document(&db, &documents, estimate).await.unwrap();

        let bill = convert_estimate(&db, &documents, &settings, &estimate.id)
            .await
            .unwrap();
        assert_eq!(bill.number, "BILL-1");
        assert_eq!(
            bill.bill().unwrap().estimate_id.as_deref(),
            Some(estimate.id.as_str())
        );

        assert_eq!(documents.len(), 2);
        let persisted = db.store().load_documents().await.unwrap();
        assert_eq!(persisted.len(), 2);
        assert!(!persisted[0].is_bill());
    }

    #[tokio::test]
    async fn converting_a_bill_is_business_logic_error() {
        let db = db().await;
        let (documents, settings) = states();
        let bill = begin_draft(&documents, &settings, DocumentType::Bill).into_document();
        let bill = save_document(&db, &documents, bill).await.unwrap();

        let err = convert_estimate(&db, &documents, &settings, &bill.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn list_is_sorted_newest_first() {
        let db = db().await;
        let (documents, settings) = states();

        let mut old = begin_draft(&documents, &settings, DocumentType::Estimate).into_document();
        old.date = "2024-01-01".to_string();
        let mut new = begin_draft(&documents, &settings, DocumentType::Estimate).into_document();
        new.date = "2024-06-01".to_string();
        save_document(&db, &documents, old.clone()).await.unwrap();
        save_document(&db, &documents, new.clone()).await.unwrap();

        let listed = list_documents(&documents).await.unwrap();
        assert_eq!(listed[0].id, new.id);
        assert_eq!(listed[1].id, old.id);
    }
}
