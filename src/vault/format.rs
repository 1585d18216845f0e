/// Host results: an ordered host -> display value map and its text rendering.
use indexmap::IndexMap;
use serde::Serialize;

/// Display values per host, in the order the execution report listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HostResultMap {
    entries: IndexMap<String, String>,
}

impl HostResultMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a host's value. A replaced host keeps its original position.
    pub fn insert(&mut self, host: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(host.into(), value.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HostResultMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (host, value) in iter {
            map.insert(host, value);
        }
        map
    }
}

/// Render host results for a terminal.
///
/// - one host: the bare value, so a single-host query reads like a lookup
/// - several hosts: one `host: value` line each, hosts left-aligned to the longest name
/// - no hosts: empty string
#[must_use]
pub fn format_host_results(results: &HostResultMap) -> String {
    if results.is_empty() {
        return String::new();
    }
    match results.len() {
        1 => results
            .iter()
            .next()
            .map(|(_, value)| value.to_owned())
            .unwrap_or_default(),
        _ => {
            let width = results
                .iter()
                .map(|(host, _)| host.chars().count())
                .max()
                .unwrap_or(0);
            results
                .iter()
                .map(|(host, value)| format!("{host:<width$}: {value}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_host_is_bare_value() {
        let map: HostResultMap = [("host1", "42")].into_iter().collect();
        assert_eq!(format_host_results(&map), "42");
    }

    #[test]
    fn test_multiple_hosts_are_aligned() {
        let map: HostResultMap = [("host1", "42"), ("host22", "hello")].into_iter().collect();
        assert_eq!(format_host_results(&map), "host1 : 42\nhost22: hello");
    }

    #[test]
    fn test_report_order_is_kept() {
        let map: HostResultMap = [("zeta", "1"), ("alpha", "2"), ("mid", "3")]
            .into_iter()
            .collect();
        assert_eq!(format_host_results(&map), "zeta : 1\nalpha: 2\nmid  : 3");
    }

    #[test]
    fn test_empty_map_is_empty_string() {
        assert_eq!(format_host_results(&HostResultMap::new()), "");
    }

    #[test]
    fn test_padding_counts_chars() {
        let map: HostResultMap = [("hôte", "a"), ("host5", "b")].into_iter().collect();
        assert_eq!(format_host_results(&map), "hôte : a\nhost5: b");
    }

    #[test]
    fn test_multiline_values_are_verbatim() {
        let map: HostResultMap = [("a", "line1\nline2"), ("bb", "")].into_iter().collect();
        assert_eq!(format_host_results(&map), "a : line1\nline2\nbb: ");
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let map: HostResultMap = [("web2", "x"), ("web1", "y")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"web2":"x","web1":"y"}"#
        );
    }
}
