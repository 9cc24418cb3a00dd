//! Request URL construction.
//!
//! Joins a base URL, a resource path and a query mapping into a fully
//! qualified URL. Paths always end in `/`, which is how the remote service
//! names its collections.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Query parameters for a request. Keys are case-sensitive; the map keeps the
/// serialized query string deterministic.
pub type Params = BTreeMap<String, String>;

/// Strip every trailing `/` from a base URL.
pub fn normalize_base(base: &str) -> &str {
    base.trim_end_matches('/')
}

/// Strip every leading and trailing `/` from a resource path.
pub fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Build `base/path/?query`, with exactly one separator between base and
/// path. An empty mapping produces no query string.
pub fn build_url(base: &str, path: &str, params: &Params) -> String {
    let base = normalize_base(base);
    let path = normalize_path(path);

    let mut url = if path.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{path}/")
    };

    if !params.is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter())
            .finish();
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// Convenience for building a `Params` from string pairs.
pub fn params<K, V, I>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
