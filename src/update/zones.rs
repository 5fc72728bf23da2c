//! Longest-suffix zone resolution.

use crate::error::Error;
use crate::zone_store::{Zone, ZoneId};

/// Return every zone name the hostname could belong to, longest first.
///
/// For `a.b.c.` the candidates are `a.b.c.`, `b.c.`, `c.`. The bare TLD is
/// included because it could be an internal-only zone.
pub fn domain_candidates(hostname: &str) -> Vec<String> {
    let hostname = hostname.strip_suffix('.').unwrap_or(hostname);

    let mut candidates = Vec::new();
    let mut last = String::new();
    for label in hostname.rsplit('.') {
        let cur = format!("{label}.{last}");
        candidates.push(cur.clone());
        last = cur;
    }
    candidates.reverse();
    candidates
}

/// Find the most specific zone owning `hostname`.
///
/// Candidates are tried longest to shortest against the listing by exact
/// dot-terminated string equality, so a more specific zone always wins over
/// a broader parent zone present in the same account.
///
/// # Errors
///
/// Returns [`Error::NoZoneFound`] when no candidate matches any zone name.
pub fn resolve(hostname: &str, zones: &[Zone]) -> Result<ZoneId, Error> {
    for candidate in domain_candidates(hostname) {
        if let Some(zone) = zones.iter().find(|z| z.name == candidate) {
            return Ok(zone.id.clone());
        }
    }
    Err(Error::NoZoneFound(hostname.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(names: &[&str]) -> Vec<Zone> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Zone {
                id: ZoneId(format!("zone-{i}")),
                name: (*name).to_string(),
            })
            .collect()
    }

    #[test]
    fn candidates_run_longest_first_down_to_the_tld() {
        assert_eq!(domain_candidates("a.b.c."), vec!["a.b.c.", "b.c.", "c."]);
        assert_eq!(domain_candidates("example.com"), vec!["example.com.", "com."]);
    }

    #[test]
    fn longer_suffix_wins_over_shorter() {
        let zones = zones(&["c.", "b.c."]);
        assert_eq!(resolve("a.b.c.", &zones).unwrap(), ZoneId("zone-1".to_string()));
    }

    #[test]
    fn exact_zone_name_resolves_to_itself() {
        let zones = zones(&["b.c."]);
        assert_eq!(resolve("b.c.", &zones).unwrap(), ZoneId("zone-0".to_string()));
    }

    #[test]
    fn no_matching_suffix_fails() {
        let zones = zones(&["x.y."]);
        let err = resolve("a.b.c.", &zones).unwrap_err();
        assert!(matches!(err, Error::NoZoneFound(h) if h == "a.b.c."));
    }

    #[test]
    fn matching_is_by_whole_labels_not_substrings() {
        // "ample.com." must not claim "example.com.".
        let zones = zones(&["ample.com."]);
        assert!(resolve("example.com.", &zones).is_err());
    }
}
