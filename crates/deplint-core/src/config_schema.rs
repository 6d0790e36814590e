//! # Flat Config Schema
//!
//! The field table for flat, kebab-case service configuration files. Keys are
//! single-level (`bind-public-port`, never `server.bind.port`).
//!
//! Groups:
//! - public listener: `bind-public-*`
//! - admin listener: `bind-private-*`
//! - TLS: `tls-public-mode`, `tls-private-mode`
//! - telemetry: `otlp*`
//! - CORS: `cors-*`
//! - sessions: `browser-session-*`, `service-session-*`
//! - database: `database-url`

use std::fmt;

/// Expected YAML value type of a config field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A scalar string.
    String,
    /// Any YAML number.
    Int,
    /// `true` / `false`.
    Bool,
    /// A sequence whose every element is a string.
    StringArray,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Bool => "boolean",
            Self::StringArray => "string array",
        })
    }
}

/// Schema entry for one config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    /// Flat kebab-case key.
    pub name: &'static str,
    /// Expected value type.
    pub field_type: FieldType,
    /// Whether the key must be present.
    pub required: bool,
    /// Allowed string values. Empty means unrestricted.
    pub valid_values: &'static [&'static str],
    /// Human-readable purpose, quoted in error messages.
    pub description: &'static str,
}

const fn field(
    name: &'static str,
    field_type: FieldType,
    required: bool,
    valid_values: &'static [&'static str],
    description: &'static str,
) -> SchemaField {
    SchemaField {
        name,
        field_type,
        required,
        valid_values,
        description,
    }
}

const HTTPS: &[&str] = &["https"];
const TLS_MODES: &[&str] = &["auto", "manual"];
const SESSION_ALGORITHMS: &[&str] = &["JWS", "JWE", "Opaque"];
const JWS_ALGORITHMS: &[&str] = &["HS256", "HS384", "HS512"];

/// Every known config key, sorted by name.
pub const CONFIG_SCHEMA: &[SchemaField] = &[
    field(
        "bind-private-address",
        FieldType::String,
        true,
        &["127.0.0.1"],
        "Admin server bind address (MUST be 127.0.0.1)",
    ),
    field(
        "bind-private-port",
        FieldType::Int,
        true,
        &[],
        "Admin server bind port (typically 9090)",
    ),
    field(
        "bind-private-protocol",
        FieldType::String,
        true,
        HTTPS,
        "Admin server protocol (MUST be https)",
    ),
    field(
        "bind-public-address",
        FieldType::String,
        true,
        &[],
        "Public server bind address (0.0.0.0 for containers, 127.0.0.1 for local)",
    ),
    field(
        "bind-public-port",
        FieldType::Int,
        true,
        &[],
        "Public server bind port (1-65535)",
    ),
    field(
        "bind-public-protocol",
        FieldType::String,
        true,
        HTTPS,
        "Public server protocol (MUST be https)",
    ),
    field(
        "browser-session-algorithm",
        FieldType::String,
        false,
        SESSION_ALGORITHMS,
        "Browser session token format",
    ),
    field(
        "browser-session-jwe-algorithm",
        FieldType::String,
        false,
        &[],
        "Browser JWE encryption algorithm",
    ),
    field(
        "browser-session-jws-algorithm",
        FieldType::String,
        false,
        JWS_ALGORITHMS,
        "Browser JWS signing algorithm",
    ),
    field(
        "cors-allowed-origins",
        FieldType::StringArray,
        false,
        &[],
        "Allowed CORS origins",
    ),
    field(
        "cors-max-age",
        FieldType::Int,
        false,
        &[],
        "CORS preflight cache duration in seconds",
    ),
    field(
        "database-url",
        FieldType::String,
        false,
        &[],
        "Database connection string (prefer file:///run/secrets/ reference)",
    ),
    field(
        "otlp",
        FieldType::Bool,
        true,
        &[],
        "Enable OTLP telemetry export",
    ),
    field(
        "otlp-endpoint",
        FieldType::String,
        false,
        &[],
        "OTLP collector endpoint",
    ),
    field(
        "otlp-environment",
        FieldType::String,
        false,
        &["development", "production", "ci"],
        "OTLP environment label",
    ),
    field(
        "otlp-service",
        FieldType::String,
        false,
        &[],
        "OTLP service name",
    ),
    field(
        "service-session-algorithm",
        FieldType::String,
        false,
        SESSION_ALGORITHMS,
        "Service session token format",
    ),
    field(
        "service-session-jwe-algorithm",
        FieldType::String,
        false,
        &[],
        "Service JWE encryption algorithm",
    ),
    field(
        "service-session-jws-algorithm",
        FieldType::String,
        false,
        JWS_ALGORITHMS,
        "Service JWS signing algorithm",
    ),
    field(
        "tls-private-mode",
        FieldType::String,
        true,
        TLS_MODES,
        "TLS certificate mode for admin endpoint",
    ),
    field(
        "tls-public-mode",
        FieldType::String,
        true,
        TLS_MODES,
        "TLS certificate mode for public endpoint",
    ),
];

/// Look up the schema entry for `name`.
pub fn schema_field(name: &str) -> Option<&'static SchemaField> {
    CONFIG_SCHEMA.iter().find(|f| f.name == name)
}
