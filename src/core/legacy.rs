//! Derived display values for legacy modules.

use crate::core::table::Tone;
use crate::entities::LegacyModule;

/// Coarse maintainability rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintainabilityLevel {
    /// Index above 70
    High,
    /// Index above 40
    Medium,
    /// Everything else
    Low,
}

impl MaintainabilityLevel {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Badge tone: a high index is good news.
    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::High => Tone::Success,
            Self::Medium => Tone::Warning,
            Self::Low => Tone::Danger,
        }
    }
}

/// Rates a module's maintainability index.
#[must_use]
pub const fn maintainability_level(module: &LegacyModule) -> MaintainabilityLevel {
    if module.maintainability > 70 {
        MaintainabilityLevel::High
    } else if module.maintainability > 40 {
        MaintainabilityLevel::Medium
    } else {
        MaintainabilityLevel::Low
    }
}

/// Debt gauge fill in percent: half a point per debt day, capped at 100.
#[must_use]
pub fn debt_gauge(module: &LegacyModule) -> u32 {
    (module.debt / 2).min(100)
}

/// Complexity gauge fill in percent (complexity 1-10 scaled to 10-100).
#[must_use]
pub fn complexity_gauge(module: &LegacyModule) -> u32 {
    (u32::from(module.complexity) * 10).min(100)
}

/// Mean coverage rounded to the nearest integer, 0 for no modules.
#[must_use]
pub fn average_coverage(modules: &[LegacyModule]) -> u8 {
    if modules.is_empty() {
        return 0;
    }
    let len = modules.len() as u64;
    let sum: u64 = modules.iter().map(|m| u64::from(m.coverage)).sum();
    u8::try_from((2 * sum + len) / (2 * len)).unwrap_or(u8::MAX)
}

/// Modules ordered by ascending coverage; ties keep dataset order.
#[must_use]
pub fn least_covered(modules: &[LegacyModule]) -> Vec<&LegacyModule> {
    let mut sorted: Vec<&LegacyModule> = modules.iter().collect();
    sorted.sort_by_key(|m| m.coverage);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::legacy_module;

    #[test]
    fn test_maintainability_thresholds() {
        assert_eq!(
            maintainability_level(&legacy_module("a", 50, 10, 71)),
            MaintainabilityLevel::High
        );
        assert_eq!(
            maintainability_level(&legacy_module("b", 50, 10, 70)),
            MaintainabilityLevel::Medium
        );
        assert_eq!(
            maintainability_level(&legacy_module("c", 50, 10, 41)),
            MaintainabilityLevel::Medium
        );
        assert_eq!(
            maintainability_level(&legacy_module("d", 50, 10, 40)),
            MaintainabilityLevel::Low
        );
    }

    #[test]
    fn test_debt_gauge_caps_at_100() {
        assert_eq!(debt_gauge(&legacy_module("a", 50, 90, 50)), 45);
        assert_eq!(debt_gauge(&legacy_module("b", 50, 500, 50)), 100);
    }

    #[test]
    fn test_complexity_gauge() {
        assert_eq!(complexity_gauge(&legacy_module("a", 50, 90, 50)), 70);
    }

    #[test]
    fn test_average_coverage() {
        let modules = vec![legacy_module("a", 35, 1, 1), legacy_module("b", 80, 1, 1)];
        assert_eq!(average_coverage(&modules), 58);
        assert_eq!(average_coverage(&[]), 0);
    }

    #[test]
    fn test_least_covered_is_stable() {
        let modules = vec![
            legacy_module("a", 60, 1, 1),
            legacy_module("b", 20, 1, 1),
            legacy_module("c", 60, 1, 1),
        ];
        let names: Vec<&str> = least_covered(&modules)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, ["b", "a", "c"]);
    }
}
