//! Mapping from source entities to entity-type tags and deep-link paths.

use frontdesk_entity::notification::EntityType;
use frontdesk_entity::source::{SourceEntity, SourceKind};

/// Fixed path for every system-level notification.
pub const SYSTEM_ALERTS_PATH: &str = "/system/alerts";

/// Resolves the entity-type tag and client-side path for a source entity.
///
/// Kinds without a dedicated tag fall back to [`EntityType::System`]; this
/// never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepLinkResolver;

impl DeepLinkResolver {
    /// Creates a new resolver.
    pub fn new() -> Self {
        Self
    }

    /// Returns the entity-type tag for the entity's kind.
    pub fn resolve_entity_type(&self, entity: &SourceEntity) -> EntityType {
        match entity.kind {
            SourceKind::Task => EntityType::Task,
            SourceKind::Meeting => EntityType::Meeting,
            SourceKind::ChatMessage => EntityType::ChatMessage,
            SourceKind::VideoRoom => EntityType::VideoRoom,
            SourceKind::Tenant | SourceKind::Other(_) => EntityType::System,
        }
    }

    /// Returns the canonical deep-link path for the entity.
    pub fn resolve(&self, entity: &SourceEntity) -> String {
        let id = entity.id;
        match self.resolve_entity_type(entity) {
            EntityType::Task => format!("/agenda/tasks/{id}"),
            EntityType::Meeting => format!("/calendar/meetings/{id}"),
            EntityType::ChatMessage => format!("/chat/messages/{id}"),
            EntityType::VideoRoom => format!("/video/rooms/{id}"),
            EntityType::System => SYSTEM_ALERTS_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_core::types::TenantId;
    use uuid::Uuid;

    fn entity(kind: SourceKind) -> SourceEntity {
        SourceEntity::new(kind, Uuid::new_v4(), TenantId::new())
    }

    #[test]
    fn test_known_kinds() {
        let resolver = DeepLinkResolver::new();
        let task = entity(SourceKind::Task);
        assert_eq!(resolver.resolve_entity_type(&task), EntityType::Task);
        assert_eq!(resolver.resolve(&task), format!("/agenda/tasks/{}", task.id));

        let meeting = entity(SourceKind::Meeting);
        assert_eq!(
            resolver.resolve(&meeting),
            format!("/calendar/meetings/{}", meeting.id)
        );

        let message = entity(SourceKind::ChatMessage);
        assert_eq!(
            resolver.resolve(&message),
            format!("/chat/messages/{}", message.id)
        );

        let room = entity(SourceKind::VideoRoom);
        assert_eq!(resolver.resolve(&room), format!("/video/rooms/{}", room.id));
    }

    #[test]
    fn test_unrecognized_kind_defaults_to_system() {
        let resolver = DeepLinkResolver::new();
        let invoice = entity(SourceKind::Other("invoice".to_string()));
        assert_eq!(resolver.resolve_entity_type(&invoice), EntityType::System);
        assert_eq!(resolver.resolve(&invoice), "/system/alerts");
    }

    #[test]
    fn test_tenant_path_ignores_identifier() {
        let resolver = DeepLinkResolver::new();
        let a = entity(SourceKind::Tenant);
        let b = entity(SourceKind::Tenant);
        assert_eq!(resolver.resolve(&a), resolver.resolve(&b));
        assert_eq!(resolver.resolve_entity_type(&a), EntityType::System);
    }
}
