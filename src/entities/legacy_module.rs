//! Legacy module entity - read-only reference data for risk and coverage views.

use serde::{Deserialize, Serialize};

/// Quality figures for one legacy code module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyModule {
    /// Module name
    pub name: String,
    /// Implementation language
    pub language: String,
    /// Complexity rating, 1-10
    pub complexity: u8,
    /// Test coverage in percent, 0-100
    pub coverage: u8,
    /// Estimated technical debt in days
    pub debt: u32,
    /// Maintainability index, 0-100
    pub maintainability: u8,
}
