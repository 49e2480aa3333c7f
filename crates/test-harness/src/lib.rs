//! Test harness for generated aluminum profiles.
//!
//! Provides verification oracles over [`solid_kernel::SolidMesh`] and
//! assertion helpers for scenario and property tests.
//!
//! # Key Components
//!
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`assertions`]: Assertion helpers with diagnostics
//! - [`helpers`]: Profile builders, scenario fixtures, unit conversion

pub mod assertions;
pub mod helpers;
pub mod oracle;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
