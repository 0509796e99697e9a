use super::index::ConnectionIndex;
use crate::platform::{Connection, FlowDocument, lookup, lookup_str};
use itertools::Itertools;
use serde_json::{Map, Value};

/// Defines the contract for one way of finding connection references in a flow definition.
///
/// A strategy only reports the raw references it sees (full identifiers or short names);
/// resolving them against the environment is left to the `FlowReferenceExtractor`.
pub trait ReferenceStrategy: Send + Sync {
    fn name(&self) -> &str;
    fn references<'d>(&self, document: &'d FlowDocument) -> Vec<&'d str>;
}

/// Reads `parameters.$connections.value.<reference>.connectionId`.
pub struct DeclaredConnections;

impl ReferenceStrategy for DeclaredConnections {
    fn name(&self) -> &str {
        "declared-connections"
    }

    fn references<'d>(&self, document: &'d FlowDocument) -> Vec<&'d str> {
        document
            .object(&["parameters", "$connections", "value"])
            .map(|declared| {
                declared
                    .values()
                    .filter_map(|entry| lookup_str(entry, &["connectionId"]))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Reads `actions.<name>.inputs.host.connectionName` on top-level actions.
pub struct ActionHosts;

impl ReferenceStrategy for ActionHosts {
    fn name(&self) -> &str {
        "action-hosts"
    }

    fn references<'d>(&self, document: &'d FlowDocument) -> Vec<&'d str> {
        document
            .actions()
            .map(|actions| actions.values().filter_map(host_connection).collect())
            .unwrap_or_default()
    }
}

/// Like `ActionHosts`, but also descends into scopes, conditions and switches.
pub struct NestedActionHosts;

impl ReferenceStrategy for NestedActionHosts {
    fn name(&self) -> &str {
        "nested-action-hosts"
    }

    fn references<'d>(&self, document: &'d FlowDocument) -> Vec<&'d str> {
        let mut found = Vec::new();
        if let Some(actions) = document.actions() {
            collect_nested(actions, &mut found);
        }
        found
    }
}

fn host_connection(action: &Value) -> Option<&str> {
    lookup_str(action, &["inputs", "host", "connectionName"])
}

fn collect_nested<'d>(actions: &'d Map<String, Value>, found: &mut Vec<&'d str>) {
    for action in actions.values() {
        if let Some(reference) = host_connection(action) {
            found.push(reference);
        }

        let branches = [
            lookup(action, &["actions"]),
            lookup(action, &["else", "actions"]),
            lookup(action, &["default", "actions"]),
        ];
        for nested in branches.into_iter().flatten().filter_map(Value::as_object) {
            collect_nested(nested, found);
        }

        if let Some(cases) = lookup(action, &["cases"]).and_then(Value::as_object) {
            for nested in cases
                .values()
                .filter_map(|case| lookup(case, &["actions"]))
                .filter_map(Value::as_object)
            {
                collect_nested(nested, found);
            }
        }
    }
}

/// Finds the connections a flow depends on by running every registered strategy and
/// taking the union of what they resolve.
pub struct FlowReferenceExtractor {
    strategies: Vec<Box<dyn ReferenceStrategy>>,
}

impl Default for FlowReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowReferenceExtractor {
    /// An extractor with the declared-connections and action-hosts strategies.
    pub fn new() -> Self {
        Self {
            strategies: vec![Box::new(DeclaredConnections), Box::new(ActionHosts)],
        }
    }

    /// An extractor with no strategies; add them with `with_strategy`.
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn ReferenceStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolves every reference found in `document` against `index`.
    ///
    /// References that do not resolve are dropped. Each connection appears once, in the
    /// order it was first found.
    pub fn extract<'i>(
        &self,
        document: &FlowDocument,
        index: &'i ConnectionIndex,
    ) -> Vec<&'i Connection> {
        self.strategies
            .iter()
            .flat_map(|strategy| {
                strategy
                    .references(document)
                    .into_iter()
                    .filter_map(move |reference| {
                        let resolved = index.resolve(reference);
                        if resolved.is_none() {
                            log::debug!(
                                "[{}] Reference '{}' does not resolve in this environment",
                                strategy.name(),
                                reference
                            );
                        }
                        resolved
                    })
            })
            .unique_by(|connection| connection.short_name.clone())
            .collect()
    }
}
