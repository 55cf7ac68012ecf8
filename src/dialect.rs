//! Dialect classification for hook locators.
//!
//! A hook's trailing type tag decides its execution strategy: native-runtime
//! scripts run directly under the configured runtime, typed scripts need a
//! secondary interpreter resolved through the runner fallback chain.

use crate::types::HookLocator;

/// The execution strategy a locator's type tag maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Runs directly under the native script runtime (`js`, `cjs`, `mjs`)
    NativeScript,
    /// Needs a transpiling interpreter from the fallback chain (`ts`)
    TypedScript,
    /// No known strategy; short-circuits without spawning anything
    Unsupported,
}

impl Dialect {
    /// Classify a locator by its trailing type tag. Tags are matched
    /// case-insensitively; a missing tag is unsupported.
    pub fn classify(locator: &HookLocator) -> Dialect {
        match locator
            .type_tag()
            .map(|t| t.to_ascii_lowercase())
            .as_deref()
        {
            Some("js") | Some("cjs") | Some("mjs") => Dialect::NativeScript,
            Some("ts") => Dialect::TypedScript,
            _ => Dialect::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::NativeScript => "native-script",
            Dialect::TypedScript => "typed-script",
            Dialect::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
