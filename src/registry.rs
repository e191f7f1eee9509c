//! In-memory blob registry keyed by generated locators.
//!
//! Follows the object-URL model: a byte buffer plus its media type is stored
//! under an opaque `blob:<uuid>` locator until revoked. Locators are drawn
//! from the OS CSPRNG and redrawn on collision, so they are unguessable and
//! unique for the life of the registry.

use crate::media_type::MediaType;
use bytes::Bytes;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use uuid::Builder;

/// Scheme prefix of every generated locator.
const LOCATOR_SCHEME: &str = "blob:";

/// Process-wide registry instance.
static GLOBAL: Lazy<BlobRegistry> = Lazy::new(BlobRegistry::new);

/// A keyed store of `(media type, body)` pairs addressed by generated
/// locator strings.
///
/// Registration is atomic: locator generation, the collision check, and the
/// insert happen under a single write-lock acquisition, so concurrent
/// callers can never be handed the same locator.
///
/// # Examples
///
/// ```
/// use whatwg_mime::{BlobRegistry, MediaType};
///
/// let registry = BlobRegistry::new();
/// let locator = registry.register(MediaType::parse("text/plain"), &b"hello"[..]);
/// assert!(locator.starts_with("blob:"));
///
/// let (mime, body) = registry.resolve(&locator).unwrap();
/// assert_eq!(mime.to_string(), "text/plain");
/// assert_eq!(&body[..], b"hello");
///
/// assert!(registry.revoke(&locator));
/// assert!(registry.resolve(&locator).is_none());
/// ```
#[derive(Debug, Default)]
pub struct BlobRegistry {
    entries: std::sync::RwLock<HashMap<String, (MediaType, Bytes)>>,
}

impl BlobRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        BlobRegistry::default()
    }

    /// The process-wide shared registry.
    pub fn global() -> &'static BlobRegistry {
        &GLOBAL
    }

    /// Stores a body with its media type and returns a fresh locator.
    ///
    /// The media type is stored as parsed; an invalid one simply serializes
    /// back as the empty string when resolved.
    pub fn register(&self, media_type: MediaType, body: impl Into<Bytes>) -> String {
        let body = body.into();
        let mut entries = self.entries.write().unwrap();
        let mut locator = generate_locator();
        while entries.contains_key(&locator) {
            locator = generate_locator();
        }
        entries.insert(locator.clone(), (media_type, body));
        locator
    }

    /// Looks up a locator, returning the media type and body if present.
    pub fn resolve(&self, locator: &str) -> Option<(MediaType, Bytes)> {
        let entries = self.entries.read().unwrap();
        entries
            .get(locator)
            .map(|(mime, body)| (mime.clone(), body.clone()))
    }

    /// Removes a locator, reporting whether an entry was actually removed.
    pub fn revoke(&self, locator: &str) -> bool {
        self.entries.write().unwrap().remove(locator).is_some()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Reports whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Draws 16 bytes from the OS CSPRNG and brands them as a version-4 UUID.
fn generate_locator() -> String {
    let mut buf = [0u8; 16];
    getrandom::getrandom(&mut buf).expect("failed to generate random locator");
    let id = Builder::from_random_bytes(buf).into_uuid();
    format!("{}{}", LOCATOR_SCHEME, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use uuid::Uuid;

    #[test]
    fn test_register_resolve_roundtrip() {
        let registry = BlobRegistry::new();
        let mime = MediaType::parse("application/json; charset=utf-8");
        let locator = registry.register(mime.clone(), &b"{}"[..]);

        let (resolved_mime, body) = registry.resolve(&locator).unwrap();
        assert_eq!(resolved_mime, mime);
        assert_eq!(&body[..], b"{}");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = BlobRegistry::new();
        assert!(registry.resolve("blob:does-not-exist").is_none());
    }

    #[test]
    fn test_revoke() {
        let registry = BlobRegistry::new();
        let locator = registry.register(MediaType::parse("text/plain"), &b"x"[..]);

        assert!(registry.revoke(&locator));
        assert!(registry.resolve(&locator).is_none());
        // Second revoke of the same locator is a no-op.
        assert!(!registry.revoke(&locator));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_locator_shape() {
        let registry = BlobRegistry::new();
        let locator = registry.register(MediaType::parse("text/plain"), &b"x"[..]);

        let id = locator.strip_prefix("blob:").expect("missing scheme");
        let uuid = Uuid::parse_str(id).expect("not a UUID");
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn test_locators_are_unique() {
        let registry = BlobRegistry::new();
        let mime = MediaType::parse("application/octet-stream");

        let mut seen = HashSet::new();
        for _ in 0..256 {
            let locator = registry.register(mime.clone(), Bytes::new());
            assert!(seen.insert(locator));
        }
        assert_eq!(registry.len(), 256);
    }

    #[test]
    fn test_invalid_media_type_stored_as_empty() {
        let registry = BlobRegistry::new();
        let locator = registry.register(MediaType::parse("not a mime"), &b"data"[..]);

        let (mime, _) = registry.resolve(&locator).unwrap();
        assert!(!mime.is_valid());
        assert_eq!(mime.to_string(), "");
    }

    #[test]
    fn test_global_registry() {
        let locator = BlobRegistry::global().register(MediaType::parse("text/plain"), &b"g"[..]);
        assert!(BlobRegistry::global().resolve(&locator).is_some());
        assert!(BlobRegistry::global().revoke(&locator));
    }
}
