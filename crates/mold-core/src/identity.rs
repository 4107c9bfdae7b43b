//! Stable per-form identity.

use serde::{Deserialize, Serialize};

/// A form's identity: the caller-supplied slug and the namespace key
/// derived from it.
///
/// Created once at form construction and immutable for the form's
/// lifetime. The derived key scopes both persistence and any
/// render-layer element ids, so two forms with distinct slugs never
/// collide in either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormIdentity {
    slug: String,
    derived_key: String,
}

impl FormIdentity {
    /// Derive an identity from a slug.
    ///
    /// The derived key is the lowercased slug with every non-alphanumeric
    /// run collapsed to a single `-`, under a fixed `mold-form` prefix.
    pub fn new(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let mut sanitized = String::with_capacity(slug.len());
        for c in slug.trim().chars() {
            if c.is_ascii_alphanumeric() {
                sanitized.push(c.to_ascii_lowercase());
            } else if !sanitized.ends_with('-') {
                sanitized.push('-');
            }
        }
        let sanitized = sanitized.trim_matches('-');

        Self {
            derived_key: format!("mold-form-{sanitized}"),
            slug,
        }
    }

    /// The caller-supplied slug, verbatim.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// The derived namespace key.
    pub fn derived_key(&self) -> &str {
        &self.derived_key
    }
}
