use std::collections::HashMap;
use crate::geometry::Point;
use crate::models::RenderModel;

/// Keeps hubs and their grouped members at the same position while dragging.
#[derive(Debug, Clone, Default)]
pub struct DragSyncController {
    hub_members: HashMap<String, Vec<String>>,
    member_hub: HashMap<String, String>,
}

impl DragSyncController {
    #[must_use]
    pub fn from_model(model: &RenderModel) -> Self {
        let mut member_hub = HashMap::new();
        for (hub, members) in &model.hubs {
            for member in members {
                member_hub.insert(member.clone(), hub.clone());
            }
        }
        Self {
            hub_members: model.hubs.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            member_hub,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hub_members.is_empty()
    }

    /// Positions to write after `id` was dragged to `position`.
    ///
    /// Dragging a hub moves all of its members; dragging a grouped member moves
    /// its hub and every sibling. Other nodes produce no writes.
    #[must_use]
    pub fn on_drag(&self, id: &str, position: Point) -> Vec<(String, Point)> {
        if let Some(members) = self.hub_members.get(id) {
            return members.iter().map(|m| (m.clone(), position)).collect();
        }

        let Some(hub) = self.member_hub.get(id) else {
            return Vec::new();
        };
        let mut writes = vec![(hub.clone(), position)];
        if let Some(members) = self.hub_members.get(hub) {
            writes.extend(
                members
                    .iter()
                    .filter(|m| m.as_str() != id)
                    .map(|m| (m.clone(), position)),
            );
        }
        writes
    }
}
