use crate::platform::{Connection, short_name};
use ahash::AHashMap;

/// All connections of one environment, keyed by short name.
#[derive(Debug, Default)]
pub struct ConnectionIndex {
    by_short_name: AHashMap<String, Connection>,
}

impl ConnectionIndex {
    /// Builds the index. When two connections share a short name, the later one wins.
    pub fn build(connections: impl IntoIterator<Item = Connection>) -> Self {
        let by_short_name = connections
            .into_iter()
            .filter(|c| !c.short_name.is_empty())
            .map(|c| (c.short_name.clone(), c))
            .collect();
        Self { by_short_name }
    }

    /// Looks up a connection by short name.
    pub fn lookup(&self, short_name: &str) -> Option<&Connection> {
        self.by_short_name.get(short_name)
    }

    /// Looks up a connection by any reference: a full identifier or an already-short name.
    pub fn resolve(&self, reference: &str) -> Option<&Connection> {
        match short_name(reference) {
            "" => None,
            key => self.lookup(key),
        }
    }

    pub fn len(&self) -> usize {
        self.by_short_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_short_name.is_empty()
    }
}
