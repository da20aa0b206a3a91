//! UI5 version lifecycle layer
//!
//! Loads the SAP version overview, resolves the quarter descriptors it uses and
//! decides whether the version declared by a manifest may still be used.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Catalog   │◀────│   Checker   │
//! │  (fetch)    │     │  (lookup)   │     │ (fix/report)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Quarter   │     │  Validator  │
//!                     │ (EOCP memo) │     │  (verdict)  │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: Trait and HTTP implementation for fetching the overview
//! - [`catalog`]: Maintained lines and patches keyed by version
//! - [`quarter`]: End of cloud provisioning facts per quarter descriptor
//! - [`validator`]: Verdict and messages for a declared version
//! - [`checker`]: Per manifest fix or report, replacement selection
//! - [`error`]: Error types for catalog and check operations
//! - [`semver`]: Coercion helpers for loose version strings

pub mod catalog;
pub mod checker;
pub mod error;
pub mod quarter;
pub mod semver;
pub mod source;
pub mod validator;
