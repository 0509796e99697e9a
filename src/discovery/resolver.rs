use super::registry::GatewayRegistry;
use super::usage::{ResourceType, UsageRecord};
use crate::platform::{App, Connection, Environment, Flow};
use itertools::Itertools;

/// The resource-side columns shared by every record a resource emits.
struct ResourceColumns<'a> {
    resource_type: ResourceType,
    name: &'a str,
    id: &'a str,
    owner: &'a str,
    created_time: &'a str,
    last_modified_time: &'a str,
}

/// Turns the connections of an app or flow into usage records, registering every gateway
/// it meets along the way.
pub struct GatewayUsageResolver<'r> {
    registry: &'r mut GatewayRegistry,
}

impl<'r> GatewayUsageResolver<'r> {
    pub fn new(registry: &'r mut GatewayRegistry) -> Self {
        Self { registry }
    }

    /// Emits one record per gateway-backed connection of an app. Owner is the app owner's email.
    pub fn resolve_app<'c>(
        &mut self,
        environment: &Environment,
        app: &App,
        connections: impl IntoIterator<Item = &'c Connection>,
    ) -> Vec<UsageRecord> {
        let columns = ResourceColumns {
            resource_type: ResourceType::App,
            name: &app.display_name,
            id: &app.id,
            owner: app.owner.email.as_deref().unwrap_or(""),
            created_time: &app.created_time,
            last_modified_time: &app.last_modified_time,
        };
        self.resolve(environment, &columns, connections)
    }

    /// Emits one record per gateway-backed connection of a flow. Owner is the creator's
    /// email, or their display name when the email is missing.
    pub fn resolve_flow<'c>(
        &mut self,
        environment: &Environment,
        flow: &Flow,
        connections: impl IntoIterator<Item = &'c Connection>,
    ) -> Vec<UsageRecord> {
        let owner = flow
            .creator
            .email
            .as_deref()
            .filter(|e| !e.is_empty())
            .or(flow.creator.display_name.as_deref())
            .unwrap_or("");
        let columns = ResourceColumns {
            resource_type: ResourceType::Flow,
            name: &flow.display_name,
            id: &flow.id,
            owner,
            created_time: &flow.created_time,
            last_modified_time: &flow.last_modified_time,
        };
        self.resolve(environment, &columns, connections)
    }

    fn resolve<'c>(
        &mut self,
        environment: &Environment,
        resource: &ResourceColumns<'_>,
        connections: impl IntoIterator<Item = &'c Connection>,
    ) -> Vec<UsageRecord> {
        let mut records = Vec::new();
        for connection in connections.into_iter().unique_by(|c| c.id.clone()) {
            let Some(gateway) = connection.routed_gateway() else {
                log::debug!(
                    "{} '{}': connection '{}' is not routed through a gateway",
                    resource.resource_type,
                    resource.name,
                    connection.short_name
                );
                continue;
            };
            let registered = self.registry.register_ref(gateway);

            records.push(UsageRecord {
                resource_type: resource.resource_type,
                resource_name: resource.name.to_string(),
                resource_id: resource.id.to_string(),
                environment_name: environment.display_name.clone(),
                environment_id: environment.id.clone(),
                connection_display_name: connection.display_name.clone(),
                connection_target: connection.target().to_string(),
                gateway_id: registered.gateway_id.clone(),
                gateway_name: registered.name.clone(),
                gateway_type: registered.gateway_type.clone(),
                owner: resource.owner.to_string(),
                created_time: resource.created_time.to_string(),
                last_modified_time: resource.last_modified_time.to_string(),
            });
        }
        records
    }
}
