//! Originating-platform detection from root marker files.
//!
//! Detection is an ordered list of predicates; the first one that holds
//! decides the platform. It never fails: no signal means [`Platform::GenericNode`].

use std::fmt;

use serde::Serialize;

use crate::scanner::MarkerSource;

/// Manifest read for dependency signals.
pub const ROOT_MANIFEST: &str = "package.json";

/// Root-level entry files checked for an exported Lambda handler.
pub const HANDLER_FILES: [&str; 6] = [
    "index.js",
    "index.mjs",
    "index.ts",
    "handler.js",
    "handler.mjs",
    "handler.ts",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    #[serde(rename = "vercel")]
    Vercel,
    #[serde(rename = "lambda")]
    Lambda,
    #[serde(rename = "nextjs")]
    NextJs,
    #[serde(rename = "express")]
    Express,
    #[serde(rename = "genericNode")]
    GenericNode,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vercel => "vercel",
            Self::Lambda => "lambda",
            Self::NextJs => "nextjs",
            Self::Express => "express",
            Self::GenericNode => "genericNode",
        }
    }

    /// Human-readable name for text output.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Vercel => "Vercel",
            Self::Lambda => "AWS Lambda",
            Self::NextJs => "Next.js",
            Self::Express => "Express",
            Self::GenericNode => "Generic Node.js",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Signal = fn(&Signals<'_>) -> bool;

/// Predicates in priority order. Earlier entries win ties.
pub const PLATFORM_PRIORITY: [(Platform, Signal); 4] = [
    (Platform::Vercel, is_vercel),
    (Platform::Lambda, is_lambda),
    (Platform::NextJs, is_nextjs),
    (Platform::Express, is_express),
];

/// Marker view with the root manifest read once.
pub struct Signals<'a> {
    markers: &'a dyn MarkerSource,
    manifest: Option<String>,
}

impl<'a> Signals<'a> {
    #[must_use]
    pub fn new(markers: &'a dyn MarkerSource) -> Self {
        Self {
            markers,
            manifest: markers.read_marker(ROOT_MANIFEST),
        }
    }

    fn any_marker(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.markers.has_marker(name))
    }

    /// Whether any root entry file exports a `handler` function.
    fn exports_handler(&self) -> bool {
        HANDLER_FILES.iter().any(|name| {
            self.markers
                .read_marker(name)
                .is_some_and(|source| source.lines().any(is_handler_export))
        })
    }

    /// Substring search for quoted package names in the manifest text.
    fn manifest_mentions(&self, packages: &[&str]) -> bool {
        self.manifest.as_deref().is_some_and(|text| {
            packages
                .iter()
                .any(|pkg| text.contains(&format!("\"{pkg}\"")))
        })
    }
}

fn is_vercel(s: &Signals<'_>) -> bool {
    s.any_marker(&["vercel.json", ".vercel"])
}

fn is_lambda(s: &Signals<'_>) -> bool {
    s.any_marker(&["serverless.yml", "serverless.yaml", "template.yaml"])
        || s.manifest_mentions(&["aws-lambda", "@types/aws-lambda", "serverless"])
        || s.exports_handler()
}

fn is_nextjs(s: &Signals<'_>) -> bool {
    s.any_marker(&["next.config.js", "next.config.mjs", "next.config.ts"])
        || s.manifest_mentions(&["next"])
}

fn is_express(s: &Signals<'_>) -> bool {
    s.manifest_mentions(&["express"])
}

/// `exports.handler = ...`, `module.exports.handler = ...` or an ESM
/// `export const|function|async function handler`.
fn is_handler_export(line: &str) -> bool {
    let line = line.trim_start();
    let commonjs = ["exports.handler", "module.exports.handler"]
        .iter()
        .filter_map(|prefix| line.strip_prefix(prefix))
        .any(|rest| {
            let rest = rest.trim_start();
            rest.starts_with('=') && !rest.starts_with("==")
        });
    let esm = [
        "export const handler",
        "export let handler",
        "export function handler",
        "export async function handler",
    ]
    .iter()
    .filter_map(|prefix| line.strip_prefix(prefix))
    .any(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$'));
    commonjs || esm
}

/// Classify the project rooted at `markers`.
#[must_use]
pub fn detect_platform(markers: &dyn MarkerSource) -> Platform {
    let signals = Signals::new(markers);
    let platform = PLATFORM_PRIORITY
        .iter()
        .find(|(_, signal)| signal(&signals))
        .map_or(Platform::GenericNode, |(platform, _)| *platform);
    tracing::debug!(%platform, "detected platform");
    platform
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
