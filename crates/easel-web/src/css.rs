//! Vendor-prefixed style property resolution.

use std::cell::RefCell;
use std::collections::HashMap;

/// Prefixes tried, last first, when the bare name is unsupported.
const PREFIXES: [&str; 3] = ["webkit", "moz", "ms"];

/// Resolves logical style property names (`transform`) to the name the
/// host's style object actually supports (`webkitTransform`).
///
/// `probe` reports whether a candidate name exists. Hits are cached for the
/// lifetime of the resolver; misses are not, and resolve to the bare name.
pub struct StyleResolver<P> {
    probe: P,
    cache: RefCell<HashMap<String, String>>,
}

impl<P: Fn(&str) -> bool> StyleResolver<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, name: &str) -> String {
        if let Some(hit) = self.cache.borrow().get(name) {
            return hit.clone();
        }
        match self.lookup(name) {
            Some(resolved) => {
                self.cache
                    .borrow_mut()
                    .insert(name.to_string(), resolved.clone());
                resolved
            }
            None => {
                log::debug!("No supported style property for {}", name);
                name.to_string()
            }
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        if (self.probe)(name) {
            return Some(name.to_string());
        }
        let capitalized = capitalize(name);
        PREFIXES
            .iter()
            .rev()
            .map(|prefix| format!("{}{}", prefix, capitalized))
            .find(|candidate| (self.probe)(candidate))
    }

    /// Number of cached resolutions.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_bare_name_wins() {
        let resolver = StyleResolver::new(|name: &str| name == "transform");
        assert_eq!(resolver.resolve("transform"), "transform");
    }

    #[test]
    fn test_prefixed_fallback_order() {
        // Both exist; ms is tried before moz and webkit
        let resolver =
            StyleResolver::new(|name: &str| name == "webkitTransform" || name == "msTransform");
        assert_eq!(resolver.resolve("transform"), "msTransform");

        let resolver = StyleResolver::new(|name: &str| name == "webkitTransform");
        assert_eq!(resolver.resolve("transform"), "webkitTransform");
    }

    #[test]
    fn test_hits_are_cached() {
        let probes = Cell::new(0);
        let resolver = StyleResolver::new(|name: &str| {
            probes.set(probes.get() + 1);
            name == "mozTransition"
        });
        assert_eq!(resolver.resolve("transition"), "mozTransition");
        let after_first = probes.get();
        assert_eq!(resolver.resolve("transition"), "mozTransition");
        assert_eq!(probes.get(), after_first);
        assert_eq!(resolver.cached(), 1);
    }

    #[test]
    fn test_unknown_falls_back_to_bare_name() {
        let resolver = StyleResolver::new(|_: &str| false);
        assert_eq!(resolver.resolve("transformOrigin"), "transformOrigin");
        assert_eq!(resolver.cached(), 0);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("transform"), "Transform");
        assert_eq!(capitalize(""), "");
    }
}
