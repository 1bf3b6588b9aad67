//! Language capability registry.
//!
//! Every language is described exactly once by its [`LanguageDef`]. Whether a
//! `(language, protocol, template)` triple can be generated is a table lookup
//! here; generators and the protocol validator never hard-code support rules.
//!
//! # Adding a New Language
//!
//! 1. Add a variant to `Language` in `value_objects.rs`
//! 2. Add a [`LanguageDef`] entry to [`LANGUAGE_REGISTRY`]
//! 3. Add a generator in `application::generators`
//!
//! # Adding Protocol Support
//!
//! Add the template to the matching `*_templates` slice of the language and
//! register the corresponding template in the catalog.

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::value_objects::{Language, Protocol, ProtocolTemplate};

// ── Language definitions ─────────────────────────────────────────────────────

/// Describes what a language's generator can produce.
#[derive(Debug, Clone, Copy)]
pub struct LanguageDef {
    /// The language this definition describes.
    pub language: Language,

    /// Namespace of the language's templates in the template store.
    pub template_root: &'static str,

    /// Templates accepted for a REST config. Empty means REST is unsupported.
    pub rest_templates: &'static [ProtocolTemplate],

    /// Templates accepted for a gRPC config.
    pub grpc_templates: &'static [ProtocolTemplate],

    /// Templates accepted for a WebSocket config.
    pub ws_templates: &'static [ProtocolTemplate],

    /// Static-analysis analyzer used for this language in `.deepsource.toml`.
    pub analyzer: &'static str,
}

impl LanguageDef {
    pub const fn templates_for(&self, protocol: Protocol) -> &'static [ProtocolTemplate] {
        match protocol {
            Protocol::Rest => self.rest_templates,
            Protocol::Grpc => self.grpc_templates,
            Protocol::Ws => self.ws_templates,
        }
    }
}

const OPENAPI_ONLY: &[ProtocolTemplate] = &[ProtocolTemplate::OpenApi];
const NONE: &[ProtocolTemplate] = &[];

/// Single source of truth for the support matrix.
pub static LANGUAGE_REGISTRY: &[LanguageDef] = &[
    LanguageDef {
        language: Language::Go,
        template_root: "go",
        rest_templates: &[ProtocolTemplate::OpenApi, ProtocolTemplate::Builtin],
        grpc_templates: &[ProtocolTemplate::Builtin],
        ws_templates: NONE,
        analyzer: "go",
    },
    LanguageDef {
        language: Language::Python,
        template_root: "python",
        rest_templates: OPENAPI_ONLY,
        grpc_templates: NONE,
        ws_templates: NONE,
        analyzer: "python",
    },
    LanguageDef {
        language: Language::Java,
        template_root: "java",
        rest_templates: OPENAPI_ONLY,
        grpc_templates: NONE,
        ws_templates: NONE,
        analyzer: "java",
    },
    LanguageDef {
        language: Language::Rust,
        template_root: "rust",
        rest_templates: OPENAPI_ONLY,
        grpc_templates: NONE,
        ws_templates: NONE,
        analyzer: "rust",
    },
    LanguageDef {
        language: Language::JavaScript,
        template_root: "javascript",
        rest_templates: OPENAPI_ONLY,
        grpc_templates: NONE,
        ws_templates: NONE,
        analyzer: "javascript",
    },
    LanguageDef {
        language: Language::TypeScript,
        template_root: "typescript",
        rest_templates: OPENAPI_ONLY,
        grpc_templates: NONE,
        ws_templates: NONE,
        // DeepSource covers TypeScript through its JavaScript analyzer.
        analyzer: "javascript",
    },
    LanguageDef {
        language: Language::Ruby,
        template_root: "ruby",
        rest_templates: OPENAPI_ONLY,
        grpc_templates: NONE,
        ws_templates: NONE,
        analyzer: "ruby",
    },
];

// ── Lookup functions ─────────────────────────────────────────────────────────

/// Find the registered definition for a language.
pub fn find_language(language: Language) -> Option<&'static LanguageDef> {
    LANGUAGE_REGISTRY.iter().find(|d| d.language == language)
}

/// Templates the language accepts for a protocol (empty when unsupported).
pub fn supported_templates(language: Language, protocol: Protocol) -> &'static [ProtocolTemplate] {
    find_language(language).map_or(NONE, |d| d.templates_for(protocol))
}

pub fn supports_protocol(language: Language, protocol: Protocol) -> bool {
    !supported_templates(language, protocol).is_empty()
}

pub fn supports(language: Language, protocol: Protocol, template: ProtocolTemplate) -> bool {
    supported_templates(language, protocol).contains(&template)
}

/// Check one `(language, protocol, template)` triple against the matrix.
///
/// An unsupported protocol is reported before an unsupported template.
pub fn check_support(
    language: Language,
    protocol: Protocol,
    template: ProtocolTemplate,
) -> Result<(), DomainError> {
    if !supports_protocol(language, protocol) {
        return Err(DomainError::UnsupportedProtocol { protocol, language });
    }
    if !supports(language, protocol, template) {
        return Err(DomainError::UnsupportedTemplate {
            protocol,
            template,
            language,
        });
    }
    Ok(())
}

pub fn template_root(language: Language) -> &'static str {
    find_language(language).map_or(language.as_str(), |d| d.template_root)
}

pub fn analyzer(language: Language) -> &'static str {
    find_language(language).map_or(language.as_str(), |d| d.analyzer)
}

// ── Introspection ────────────────────────────────────────────────────────────

/// One row of the support matrix, for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportEntry {
    pub language: Language,
    pub protocol: Protocol,
    pub templates: Vec<ProtocolTemplate>,
}

/// Every supported `(language, protocol)` pair with its accepted templates.
pub fn support_matrix() -> Vec<SupportEntry> {
    LANGUAGE_REGISTRY
        .iter()
        .flat_map(|def| {
            Protocol::ALL.into_iter().filter_map(move |protocol| {
                let templates = def.templates_for(protocol);
                (!templates.is_empty()).then(|| SupportEntry {
                    language: def.language,
                    protocol,
                    templates: templates.to_vec(),
                })
            })
        })
        .collect()
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registry is internally consistent.
///
/// Panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for language in Language::ALL {
        let count = LANGUAGE_REGISTRY
            .iter()
            .filter(|d| d.language == language)
            .count();
        assert_eq!(count, 1, "{language:?} must be registered exactly once");
    }

    for def in LANGUAGE_REGISTRY {
        assert!(
            !def.template_root.is_empty() && !def.template_root.contains('/'),
            "{:?} has an invalid template root {:?}",
            def.language,
            def.template_root
        );
        assert!(
            !def.rest_templates.is_empty(),
            "{:?} must support at least one REST template",
            def.language
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
