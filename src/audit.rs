use crate::discovery::{
    ConnectionIndex, FlowReferenceExtractor, GatewayRegistry, GatewayUsageResolver,
    NestedActionHosts, ReferenceStrategy,
};
use crate::error::{AuditError, SourceError};
use crate::platform::{AdminApi, App, Environment, Flow, FlowDocument};
use crate::report::UsageAggregator;
use std::fmt;

/// What kind of resource an isolated failure skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkippedKind {
    Environment,
    App,
    Flow,
}

impl fmt::Display for SkippedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkippedKind::Environment => write!(f, "Environment"),
            SkippedKind::App => write!(f, "App"),
            SkippedKind::Flow => write!(f, "Flow"),
        }
    }
}

/// A resource the audit could not process. The run carried on without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedResource {
    pub kind: SkippedKind,
    pub id: String,
    pub name: String,
    pub reason: String,
}

impl SkippedResource {
    fn environment(environment: &Environment, reason: &dyn fmt::Display) -> Self {
        Self::new(SkippedKind::Environment, &environment.id, &environment.display_name, reason)
    }

    fn app(app: &App, reason: &dyn fmt::Display) -> Self {
        Self::new(SkippedKind::App, &app.id, &app.display_name, reason)
    }

    fn flow(flow: &Flow, reason: &dyn fmt::Display) -> Self {
        Self::new(SkippedKind::Flow, &flow.id, &flow.display_name, reason)
    }

    fn new(kind: SkippedKind, id: &str, name: &str, reason: &dyn fmt::Display) -> Self {
        let skipped = Self {
            kind,
            id: id.to_string(),
            name: name.to_string(),
            reason: reason.to_string(),
        };
        log::warn!("{}", skipped);
        skipped
    }
}

impl fmt::Display for SkippedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipped {} '{}' ({}): {}",
            self.kind, self.name, self.id, self.reason
        )
    }
}

/// Everything one audit run produced.
#[derive(Debug, Default)]
pub struct AuditOutcome {
    pub registry: GatewayRegistry,
    pub usage: UsageAggregator,
    pub environments_scanned: usize,
    pub skipped: Vec<SkippedResource>,
}

pub struct AuditorBuilder {
    extractor: FlowReferenceExtractor,
    environment_filter: Vec<String>,
}

impl Default for AuditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditorBuilder {
    pub fn new() -> Self {
        Self {
            extractor: FlowReferenceExtractor::new(),
            environment_filter: Vec::new(),
        }
    }

    /// Adds a reference strategy after the default ones.
    pub fn with_strategy(mut self, strategy: Box<dyn ReferenceStrategy>) -> Self {
        self.extractor = self.extractor.with_strategy(strategy);
        self
    }

    /// Also look for action hosts inside scopes, conditions and switches.
    pub fn with_nested_actions(self) -> Self {
        self.with_strategy(Box::new(NestedActionHosts))
    }

    /// Restricts the run to environments whose id or display name matches one of `names`
    /// (case-insensitive). An empty filter audits every environment.
    pub fn with_environment_filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environment_filter = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Auditor {
        Auditor {
            extractor: self.extractor,
            environment_filter: self.environment_filter,
        }
    }
}

/// Drives one audit: environments, then their apps, then their flows, strictly in listing
/// order. Owns no state between runs.
pub struct Auditor {
    extractor: FlowReferenceExtractor,
    environment_filter: Vec<String>,
}

impl Default for Auditor {
    fn default() -> Self {
        AuditorBuilder::new().build()
    }
}

impl Auditor {
    pub fn builder() -> AuditorBuilder {
        AuditorBuilder::new()
    }

    pub fn extractor(&self) -> &FlowReferenceExtractor {
        &self.extractor
    }

    /// Runs the audit against `api`.
    ///
    /// Failures of a single environment, app or flow are logged, recorded in
    /// `AuditOutcome::skipped`, and do not stop the run. Only a failure to list the
    /// environments is returned as an error, in which case nothing is reported.
    pub fn run(&self, api: &dyn AdminApi) -> Result<AuditOutcome, AuditError> {
        let environments = api
            .list_environments()
            .map_err(AuditError::EnvironmentListing)?;
        log::info!("Found {} environment(s)", environments.len());

        let mut outcome = AuditOutcome::default();
        for environment in environments.iter().filter(|e| self.selects(e)) {
            log::info!(
                "Scanning environment '{}' ({})",
                environment.display_name,
                environment.id
            );
            outcome.environments_scanned += 1;
            if let Err(e) = self.audit_environment(api, environment, &mut outcome) {
                outcome
                    .skipped
                    .push(SkippedResource::environment(environment, &e));
            }
        }

        log::info!(
            "Audit finished: {} usage record(s) across {} gateway(s)",
            outcome.usage.len(),
            outcome.registry.len()
        );
        Ok(outcome)
    }

    fn selects(&self, environment: &Environment) -> bool {
        self.environment_filter.is_empty()
            || self.environment_filter.iter().any(|wanted| {
                wanted.eq_ignore_ascii_case(&environment.id)
                    || wanted.eq_ignore_ascii_case(&environment.display_name)
            })
    }

    fn audit_environment(
        &self,
        api: &dyn AdminApi,
        environment: &Environment,
        outcome: &mut AuditOutcome,
    ) -> Result<(), SourceError> {
        let apps = api.list_apps(&environment.id)?;
        let index = ConnectionIndex::build(api.list_connections(&environment.id, None)?);
        log::info!("  {} app(s), {} connection(s)", apps.len(), index.len());

        for app in &apps {
            match api.list_connections(&environment.id, Some(&app.id)) {
                Ok(connections) => {
                    let records = GatewayUsageResolver::new(&mut outcome.registry)
                        .resolve_app(environment, app, &connections);
                    outcome.usage.extend(records);
                }
                Err(e) => outcome.skipped.push(SkippedResource::app(app, &e)),
            }
        }

        let flows = api.list_flows(&environment.id)?;
        log::info!("  {} flow(s)", flows.len());

        for flow in &flows {
            match FlowDocument::parse(&flow.id, &flow.definition) {
                Ok(document) => {
                    let connections = self.extractor.extract(&document, &index);
                    let records = GatewayUsageResolver::new(&mut outcome.registry)
                        .resolve_flow(environment, flow, connections);
                    outcome.usage.extend(records);
                }
                Err(e) => outcome.skipped.push(SkippedResource::flow(flow, &e)),
            }
        }
        Ok(())
    }
}
