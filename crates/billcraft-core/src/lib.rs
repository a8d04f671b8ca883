//! # billcraft-core
//!
//! Pure business logic for Billcraft: estimates and bills for a
//! small made-to-measure goods business.
//!
//! ## Design Principles
//! 1. **No I/O**: This crate performs no database, network, or file
//!    operations. Persistence lives in `billcraft-db`.
//! 2. **Deterministic**: Given the same inputs, every function
//!    produces the same outputs (document creation stamps ids and
//!    dates; everything else is pure).
//! 3. **Fully testable**: All logic can be tested without mocks.
//!
//! ## Module Overview
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  billcraft-core                     │
//! │                                                     │
//! │  types ───── entities, preferences, settings        │
//! │  pricing ─── totals, balance due, display format    │
//! │  lifecycle ─ creation, numbering, conversions       │
//! │  render ──── printable projection + QR payload      │
//! │  error ───── domain errors                          │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod lifecycle;
pub mod pricing;
pub mod render;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{
    BillDetails, BillStatus, DimensionUnit, Document, DocumentKind, DocumentPreferences,
    DocumentType, EstimateStatus, FontSizes, LineItem, PaymentMethod, Product, ProductType,
    SettingsProfile,
};
