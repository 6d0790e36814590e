//! # Port Tiers
//!
//! Every deployment runs at one of three tiers, and each tier owns a fixed,
//! non-overlapping block of host ports. A service-level deployment binds in
//! the 8000s, its product aggregate in the 18000s, and the suite in the
//! 28000s.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Deployment tier governing the permitted host-port range.
///
/// | Tier    | Range (inclusive) |
/// |---------|-------------------|
/// | Service | 8000–8999         |
/// | Product | 18000–18999       |
/// | Suite   | 28000–28999       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortTier {
    /// A single service deployment.
    #[default]
    Service,
    /// A product aggregating several services.
    Product,
    /// The whole suite.
    Suite,
}

impl PortTier {
    /// All tiers in ascending range order.
    pub fn all() -> &'static [PortTier] {
        &[Self::Service, Self::Product, Self::Suite]
    }

    /// Parse a tier name. Matching is case-insensitive; anything that is not
    /// `product` or `suite` resolves to [`PortTier::Service`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" => Self::Product,
            "suite" => Self::Suite,
            _ => Self::Service,
        }
    }

    /// Inclusive `(min, max)` host-port range for this tier.
    pub fn range(&self) -> (u16, u16) {
        match self {
            Self::Service => (8000, 8999),
            Self::Product => (18000, 18999),
            Self::Suite => (28000, 28999),
        }
    }

    /// Whether `port` falls inside this tier's range.
    pub fn contains(&self, port: i64) -> bool {
        let (min, max) = self.range();
        port >= i64::from(min) && port <= i64::from(max)
    }

    /// Lowercase identifier, as accepted by [`PortTier::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Product => "product",
            Self::Suite => "suite",
        }
    }

    /// Uppercase label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Service => "SERVICE",
            Self::Product => "PRODUCT",
            Self::Suite => "SUITE",
        }
    }
}

impl fmt::Display for PortTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tiers() {
        assert_eq!(PortTier::parse("service"), PortTier::Service);
        assert_eq!(PortTier::parse("PRODUCT"), PortTier::Product);
        assert_eq!(PortTier::parse(" Suite "), PortTier::Suite);
    }

    #[test]
    fn parse_unknown_defaults_to_service() {
        assert_eq!(PortTier::parse(""), PortTier::Service);
        assert_eq!(PortTier::parse("galaxy"), PortTier::Service);
    }

    #[test]
    fn ranges_do_not_overlap() {
        let tiers = PortTier::all();
        for (i, a) in tiers.iter().enumerate() {
            for b in &tiers[i + 1..] {
                let (amin, amax) = a.range();
                let (bmin, bmax) = b.range();
                assert!(amax < bmin || bmax < amin, "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn contains_is_inclusive() {
        assert!(PortTier::Service.contains(8000));
        assert!(PortTier::Service.contains(8999));
        assert!(!PortTier::Service.contains(9000));
        assert!(PortTier::Product.contains(18700));
        assert!(!PortTier::Product.contains(8700));
        assert!(PortTier::Suite.contains(28000));
        assert!(!PortTier::Suite.contains(-1));
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&PortTier::Product).unwrap();
        assert_eq!(json, "\"product\"");
        let back: PortTier = serde_json::from_str("\"suite\"").unwrap();
        assert_eq!(back, PortTier::Suite);
    }
}
