//! Process identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Reserved separator used when building a PID's lookup key.
///
/// Carried over from the key-building scheme of the original engine this
/// crate is modeled on, which concatenates address, name and tags with a
/// fixed separator to derive a single map key.
pub const LOOKUP_SEPARATOR: &str = "/";

/// Opaque address for a process.
///
/// A `Pid` carries an address domain (`"local"` for in-process addresses,
/// anything else for a remote node), a name, an optional ordered list of
/// tags, and a derived lookup key. PIDs are immutable after construction
/// and compare equal iff their lookup keys match.
#[derive(Clone)]
pub struct Pid {
    address: String,
    name: String,
    tags: Vec<String>,
    lookup_key: String,
}

impl Pid {
    /// Construct a PID with no tags.
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_tags(address, name, Vec::<String>::new())
    }

    /// Construct a local-address PID with no tags.
    pub fn local(name: impl Into<String>) -> Self {
        Self::new("local", name)
    }

    /// Construct a PID with an explicit address, name, and ordered tags.
    pub fn with_tags<I, S>(address: impl Into<String>, name: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let address = address.into();
        let name = name.into();
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        let lookup_key = build_lookup_key(&address, &name, &tags);
        Self {
            address,
            name,
            tags,
            lookup_key,
        }
    }

    /// The address domain: `"local"` or a remote node address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The process name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered tags attached at spawn time.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The derived, deterministic, collision-free lookup key.
    pub fn lookup_key(&self) -> &str {
        &self.lookup_key
    }

    /// Whether this PID addresses a process on the local node.
    pub fn is_local(&self) -> bool {
        self.address == "local"
    }
}

fn build_lookup_key(address: &str, name: &str, tags: &[String]) -> String {
    let mut key = String::with_capacity(address.len() + name.len() + 8);
    key.push_str(address);
    key.push_str(LOOKUP_SEPARATOR);
    key.push_str(name);
    for tag in tags {
        key.push_str(LOOKUP_SEPARATOR);
        key.push_str(tag);
    }
    key
}

impl PartialEq for Pid {
    fn eq(&self, other: &Self) -> bool {
        self.lookup_key == other.lookup_key
    }
}

impl Eq for Pid {}

impl Hash for Pid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lookup_key.hash(state);
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pid")
            .field("address", &self.address)
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish()
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.name)?;
        if !self.tags.is_empty() {
            write!(f, "#{}", self.tags.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural_on_lookup_key() {
        let a = Pid::with_tags("local", "foo", ["1", "2"]);
        let b = Pid::with_tags("local", "foo", ["1", "2"]);
        assert_eq!(a, b);
        assert_eq!(a.lookup_key(), b.lookup_key());
    }

    #[test]
    fn distinct_tags_produce_distinct_keys() {
        let a = Pid::with_tags("local", "foo", ["1"]);
        let b = Pid::with_tags("local", "foo", ["2"]);
        assert_ne!(a, b);
    }

    #[test]
    fn is_local_reflects_address() {
        assert!(Pid::local("x").is_local());
        assert!(!Pid::new("node-2", "x").is_local());
    }

    #[test]
    fn display_includes_tags() {
        let p = Pid::with_tags("local", "foo", ["bar"]);
        assert_eq!(p.to_string(), "local/foo#bar");
        assert_eq!(Pid::local("foo").to_string(), "local/foo");
    }
}
