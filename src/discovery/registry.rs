use crate::platform::GatewayRef;
use ahash::AHashMap;

pub const UNKNOWN_GATEWAY_TYPE: &str = "Unknown";

/// A discovered gateway, with placeholders filled in for missing attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRecord {
    pub gateway_id: String,
    pub name: String,
    pub gateway_type: String,
}

impl GatewayRecord {
    pub fn new(id: &str, name: Option<&str>, gateway_type: Option<&str>) -> Self {
        let name = name
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_name(id));
        let gateway_type = gateway_type
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_GATEWAY_TYPE)
            .to_string();
        Self {
            gateway_id: id.to_string(),
            name,
            gateway_type,
        }
    }
}

/// The display name used when the platform does not report one.
pub fn placeholder_name(id: &str) -> String {
    format!("Gateway ID: {}", id)
}

/// Deduplicating store of gateways, in first-registration order.
#[derive(Debug, Default)]
pub struct GatewayRegistry {
    records: Vec<GatewayRecord>,
    positions: AHashMap<String, usize>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gateway unless its id is already known, and returns the stored entry.
    ///
    /// The first registration of an id fixes its name and type for the rest of the run.
    /// Ids are compared after trimming surrounding whitespace.
    pub fn register(
        &mut self,
        id: &str,
        name: Option<&str>,
        gateway_type: Option<&str>,
    ) -> &GatewayRecord {
        let id = id.trim();
        let position = match self.positions.get(id).copied() {
            Some(position) => position,
            None => {
                log::debug!("Registering gateway '{}'", id);
                self.records.push(GatewayRecord::new(id, name, gateway_type));
                self.positions.insert(id.to_string(), self.records.len() - 1);
                self.records.len() - 1
            }
        };
        &self.records[position]
    }

    pub fn register_ref(&mut self, gateway: &GatewayRef) -> &GatewayRecord {
        self.register(
            &gateway.id,
            gateway.name.as_deref(),
            gateway.gateway_type.as_deref(),
        )
    }

    pub fn get(&self, id: &str) -> Option<&GatewayRecord> {
        self.positions.get(id.trim()).map(|&position| &self.records[position])
    }

    pub fn all(&self) -> &[GatewayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
