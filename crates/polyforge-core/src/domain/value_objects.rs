//! Domain value objects: Language, Protocol, ProtocolTemplate.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO capability logic. Which protocol/template pairs a language
//! supports lives in `capabilities.rs`. This file only defines the types,
//! their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a `LanguageDef` entry in `capabilities.rs`
//! 4. Add a generator in `application::generators` (the dispatch `match`
//!    will not compile until you do)

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// A language a node can be generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Python,
    Java,
    Rust,
    JavaScript,
    TypeScript,
    Ruby,
}

impl Language {
    /// Every language, in registry order.
    pub const ALL: [Language; 7] = [
        Self::Go,
        Self::Python,
        Self::Java,
        Self::Rust,
        Self::JavaScript,
        Self::TypeScript,
        Self::Ruby,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Python => "python",
            Self::Java => "java",
            Self::Rust => "rust",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Ruby => "ruby",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Rust => "Rust",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Ruby => "Ruby",
        }
    }

    /// Namespace under which this language's templates are registered.
    ///
    /// Delegates to `capabilities::template_root`.
    pub fn template_root(self) -> &'static str {
        crate::domain::capabilities::template_root(self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Self::Go),
            "python" | "py" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            "rust" | "rs" => Ok(Self::Rust),
            "javascript" | "js" | "node" | "nodejs" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "ruby" | "rb" => Ok(Self::Ruby),
            _ => Err(DomainError::UnsupportedLanguage {
                language: s.to_string(),
            }),
        }
    }
}

// ── Protocol ──────────────────────────────────────────────────────────────────

/// Communication protocol a node exposes or consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Rest,
    Grpc,
    Ws,
}

impl Protocol {
    /// Validation order for a node's protocol configs.
    pub const ALL: [Protocol; 3] = [Self::Rest, Self::Grpc, Self::Ws];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Grpc => "grpc",
            Self::Ws => "ws",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Rest => "REST",
            Self::Grpc => "gRPC",
            Self::Ws => "WebSocket",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProtocolTemplate ──────────────────────────────────────────────────────────

/// Template selector carried by a protocol config.
///
/// `builtin` is also accepted under its legacy name `compage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolTemplate {
    OpenApi,
    Builtin,
}

impl ProtocolTemplate {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenApi => "openapi",
            Self::Builtin => "builtin",
        }
    }
}

impl fmt::Display for ProtocolTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolTemplate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openapi" | "open-api" => Ok(Self::OpenApi),
            "builtin" | "compage" => Ok(Self::Builtin),
            _ => Err(DomainError::UnknownProtocolTemplate {
                template: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_names_and_aliases() {
        assert_eq!("go".parse::<Language>().unwrap(), Language::Go);
        assert_eq!("Golang".parse::<Language>().unwrap(), Language::Go);
        assert_eq!("JS".parse::<Language>().unwrap(), Language::JavaScript);
        assert_eq!("ts".parse::<Language>().unwrap(), Language::TypeScript);
        assert_eq!("rb".parse::<Language>().unwrap(), Language::Ruby);
    }

    #[test]
    fn unknown_language_is_an_explicit_error() {
        let err = "cobol".parse::<Language>().unwrap_err();
        assert_eq!(
            err,
            DomainError::UnsupportedLanguage {
                language: "cobol".into()
            }
        );
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn language_round_trips_through_as_str() {
        for lang in Language::ALL {
            assert_eq!(lang.as_str().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn template_selector_accepts_legacy_name() {
        assert_eq!(
            "compage".parse::<ProtocolTemplate>().unwrap(),
            ProtocolTemplate::Builtin
        );
        assert_eq!(
            "OpenAPI".parse::<ProtocolTemplate>().unwrap(),
            ProtocolTemplate::OpenApi
        );
        assert!("handlebars".parse::<ProtocolTemplate>().is_err());
    }

    #[test]
    fn protocol_display_matches_wire_name() {
        assert_eq!(Protocol::Grpc.to_string(), "grpc");
        assert_eq!(Protocol::Ws.to_string(), "ws");
    }
}
