//! Placeholder resolution for template markup.
//!
//! Content runs through a fixed pipeline of passes (see [`passes`]). Each pass
//! sweeps the output of the previous one once, left to right, and never
//! re-scans its own replacements. A stylesheet inlined by the asset tag pass
//! still has its `url()` references embedded by the later css url pass.

pub mod passes;

use crate::services::assets::AssetRegistry;
use passes::{default_passes, PlaceholderPass};
use regex::Captures;

/// Rewrites asset placeholders against a registry.
pub struct PlaceholderResolver<'a> {
    registry: &'a AssetRegistry,
    passes: Vec<Box<dyn PlaceholderPass>>,
}

impl<'a> PlaceholderResolver<'a> {
    pub fn new(registry: &'a AssetRegistry) -> Self {
        Self {
            registry,
            passes: default_passes(),
        }
    }

    /// Resolver with a custom pass list, run in the given order.
    pub fn with_passes(registry: &'a AssetRegistry, passes: Vec<Box<dyn PlaceholderPass>>) -> Self {
        Self { registry, passes }
    }

    /// Replace every resolvable placeholder. Anything unresolved or not
    /// understood is kept byte-for-byte.
    pub fn resolve(&self, content: &str) -> String {
        let mut current = content.to_string();

        for pass in &self.passes {
            let (next, count) = self.apply_pass(pass.as_ref(), &current);
            if count > 0 {
                log::debug!("Pass '{}' replaced {count} placeholder(s)", pass.name());
                current = next;
            }
        }

        current
    }

    /// One left-to-right sweep of non-overlapping matches.
    fn apply_pass(&self, pass: &dyn PlaceholderPass, content: &str) -> (String, usize) {
        let mut count = 0;
        let out = pass
            .pattern()
            .replace_all(content, |caps: &Captures<'_>| {
                match pass.resolve(caps, self.registry) {
                    Some(replacement) => {
                        count += 1;
                        replacement
                    }
                    None => caps[0].to_string(),
                }
            });

        (out.into_owned(), count)
    }
}

/// Convenience wrapper using the default pass pipeline.
pub fn resolve_placeholders(content: &str, registry: &AssetRegistry) -> String {
    PlaceholderResolver::new(registry).resolve(content)
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;

#[cfg(test)]
#[path = "tests/passes_tests.rs"]
mod passes_tests;
