//! # Deployment Classifier
//!
//! Places a deployment directory in the hierarchy by name. Suites aggregate
//! every product, products aggregate their services, and services are named
//! `<product>-<service>`. Shared infrastructure and the template sit outside
//! the tiered port scheme.

use std::fmt;

use serde::Serialize;

use deplint_core::{LintRules, PortTier};

/// Position of a deployment in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentKind {
    /// Every product in one deployment.
    Suite,
    /// One product and all of its services.
    Product,
    /// A single `<product>-<service>`.
    Service,
    /// Scaffolding for new services.
    Template,
    /// Shared database, telemetry and similar.
    Infrastructure,
}

impl DeploymentKind {
    /// Port tier the deployment is held to, if any.
    pub fn port_tier(&self) -> Option<PortTier> {
        match self {
            Self::Suite => Some(PortTier::Suite),
            Self::Product => Some(PortTier::Product),
            Self::Service => Some(PortTier::Service),
            Self::Template | Self::Infrastructure => None,
        }
    }

    /// Parse a kind name, case-insensitively. Accepts `service` and
    /// `product-service` for [`DeploymentKind::Service`].
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "suite" => Some(Self::Suite),
            "product" => Some(Self::Product),
            "service" | "product-service" => Some(Self::Service),
            "template" => Some(Self::Template),
            "infrastructure" | "infra" => Some(Self::Infrastructure),
            _ => None,
        }
    }

    /// Uppercase label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Suite => "SUITE",
            Self::Product => "PRODUCT",
            Self::Service => "PRODUCT-SERVICE",
            Self::Template => "TEMPLATE",
            Self::Infrastructure => "INFRASTRUCTURE",
        }
    }
}

impl fmt::Display for DeploymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type KindRule = (fn(&str, &LintRules) -> bool, DeploymentKind);

fn is_suite(name: &str, rules: &LintRules) -> bool {
    rules.suites.contains(name) || name.ends_with("-suite")
}

fn is_template(name: &str, rules: &LintRules) -> bool {
    rules.templates.contains(name)
}

fn is_infrastructure(name: &str, rules: &LintRules) -> bool {
    rules.infrastructure.contains(name) || name.starts_with("shared-")
}

fn is_product(name: &str, rules: &LintRules) -> bool {
    rules.products.contains(name)
}

fn is_product_service(name: &str, rules: &LintRules) -> bool {
    name.split_once('-')
        .is_some_and(|(product, service)| !service.is_empty() && rules.products.contains(product))
}

/// Classification rules in priority order. Unmatched names are infrastructure.
const KIND_RULES: &[KindRule] = &[
    (is_suite, DeploymentKind::Suite),
    (is_template, DeploymentKind::Template),
    (is_infrastructure, DeploymentKind::Infrastructure),
    (is_product, DeploymentKind::Product),
    (is_product_service, DeploymentKind::Service),
];

/// Classify a deployment directory name.
pub fn classify_deployment(name: &str, rules: &LintRules) -> DeploymentKind {
    KIND_RULES
        .iter()
        .find(|(matches, _)| matches(name, rules))
        .map(|(_, kind)| *kind)
        .unwrap_or(DeploymentKind::Infrastructure)
}
