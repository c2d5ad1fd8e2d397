use std::{borrow::Cow, fmt};

/// A cache key tagged with the kind of query that produced it, so that two
/// query kinds with textually equal fingerprints never share an entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopedKey {
    namespace: &'static str,
    fingerprint: Cow<'static, str>,
}

impl ScopedKey {
    pub fn new(
        namespace: &'static str, fingerprint: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            namespace,
            fingerprint: fingerprint.into(),
        }
    }

    pub fn namespace(&self) -> &'static str { self.namespace }

    pub fn fingerprint(&self) -> &str { &self.fingerprint }
}

impl fmt::Display for ScopedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.fingerprint)
    }
}

pub trait CacheKey {
    type Args<'r>;

    const NAMESPACE: &'static str;

    fn fingerprint(&self, args: Self::Args<'_>) -> Cow<'static, str>;

    fn get_key_with_args(&self, args: Self::Args<'_>) -> ScopedKey {
        ScopedKey::new(Self::NAMESPACE, self.fingerprint(args))
    }
}
