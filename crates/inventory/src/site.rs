use serde::{Deserialize, Serialize};

use smartstock_core::{Entity, EntityId};

/// Site identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub EntityId);

impl SiteId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for SiteId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SiteId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Physical location owning products and furniture.
///
/// Simple reference entity; no cascade-delete semantics exist anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
}

impl Entity for Site {
    type Id = SiteId;

    fn id(&self) -> &SiteId {
        &self.id
    }
}
