use serde::Serialize;

use crate::mapping::MappingInfo;
use crate::pattern::PathPattern;

/// A flattened, serialisable view of one installed URL pattern and the
/// negotiation metadata attached to it. One descriptor is produced per
/// pattern in a mapping, so a mapping with three patterns yields three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub pattern: String,
    pub methods: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub name: Option<String>,
}

impl RouteDescriptor {
    pub(crate) fn new(mapping: &MappingInfo, pattern: &PathPattern) -> Self {
        Self {
            pattern: pattern.to_string(),
            methods: mapping
                .methods()
                .methods()
                .map(|m| m.as_str().to_string())
                .collect(),
            consumes: mapping
                .consumes()
                .consumable_media_types()
                .iter()
                .map(ToString::to_string)
                .collect(),
            produces: mapping
                .produces()
                .producible_media_types()
                .iter()
                .map(ToString::to_string)
                .collect(),
            name: mapping.name().map(str::to_string),
        }
    }
}

/// Collaborator notified of every pattern as mappings are installed.
///
/// Lets an outer router or documentation layer mirror the registry's
/// contents without re-walking it. Notifications stop once the builder is
/// sealed.
pub trait RouteTable {
    fn install(&mut self, route: &RouteDescriptor);
}

/// The default table: discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTable;

impl RouteTable for NoopTable {
    fn install(&mut self, _route: &RouteDescriptor) {}
}

impl RouteTable for Vec<RouteDescriptor> {
    fn install(&mut self, route: &RouteDescriptor) {
        self.push(route.clone());
    }
}
