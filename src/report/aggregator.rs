use crate::discovery::{ResourceType, UsageRecord};
use ahash::AHashMap;

/// Collects usage records in discovery order.
#[derive(Debug, Default, Clone)]
pub struct UsageAggregator {
    records: Vec<UsageRecord>,
}

impl UsageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: UsageRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = UsageRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn records_of(&self, resource_type: ResourceType) -> Vec<&UsageRecord> {
        self.records
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }

    pub fn total_by_type(&self, resource_type: ResourceType) -> usize {
        self.records
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Groups records by gateway name. Groups appear in the order their first record was
    /// added, and members keep discovery order.
    pub fn group_by_gateway(&self) -> GatewayGroups<'_> {
        let mut groups: Vec<GatewayGroup<'_>> = Vec::new();
        let mut positions: AHashMap<&str, usize> = AHashMap::new();

        for record in &self.records {
            let position = *positions
                .entry(record.gateway_name.as_str())
                .or_insert_with(|| {
                    groups.push(GatewayGroup {
                        gateway_name: record.gateway_name.as_str(),
                        records: Vec::new(),
                    });
                    groups.len() - 1
                });
            groups[position].records.push(record);
        }

        GatewayGroups { groups, positions }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayGroup<'a> {
    pub gateway_name: &'a str,
    pub records: Vec<&'a UsageRecord>,
}

/// An insertion-ordered mapping of gateway name to the records that use it.
#[derive(Debug, Clone)]
pub struct GatewayGroups<'a> {
    groups: Vec<GatewayGroup<'a>>,
    positions: AHashMap<&'a str, usize>,
}

impl<'a> GatewayGroups<'a> {
    pub fn get(&self, gateway_name: &str) -> Option<&[&'a UsageRecord]> {
        self.positions
            .get(gateway_name)
            .map(|&position| self.groups[position].records.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GatewayGroup<'a>> {
        self.groups.iter()
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.groups.iter().map(|g| g.gateway_name).collect()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of records across all groups.
    pub fn total_records(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}
