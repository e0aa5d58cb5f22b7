//! Platform-neutral export shapes: the flat message array and the
//! grouped-by-role map.

use std::collections::BTreeMap;

use roundtable_core::{Message, Role, RoleRegistry};
use serde::Serialize;

use crate::platform::SimpleMessage;

/// The flat message list.
///
/// Simplified output reduces to `{role, content}` pairs for enabled roles;
/// raw output carries the full records plus the registry, unfiltered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArrayExport {
    Simplified(Vec<SimpleMessage>),
    Raw {
        messages: Vec<Message>,
        roles: Vec<Role>,
    },
}

/// Role name (or synthesized slot placeholder) to ordered messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GroupedExport {
    Simplified(BTreeMap<String, Vec<String>>),
    Raw(BTreeMap<String, Vec<Message>>),
}

/// Build the flat array shape.
#[must_use]
pub fn flat_array(messages: &[Message], registry: &RoleRegistry, simplify: bool) -> ArrayExport {
    if simplify {
        ArrayExport::Simplified(
            messages
                .iter()
                .filter(|message| registry.is_role_enabled(&message.role))
                .map(|message| SimpleMessage {
                    role: message.role.clone(),
                    content: message.content.clone(),
                })
                .collect(),
        )
    } else {
        ArrayExport::Raw {
            messages: messages.to_vec(),
            roles: registry.roles().to_vec(),
        }
    }
}

/// Build the grouped-by-role shape.
///
/// Messages group under the registry's current name for their slot, falling
/// back to the synthesized `"Role {n}"` placeholder. Within each group the
/// original append order is kept.
#[must_use]
pub fn grouped_by_role(
    messages: &[Message],
    registry: &RoleRegistry,
    simplify: bool,
) -> GroupedExport {
    if simplify {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for message in messages
            .iter()
            .filter(|message| registry.is_role_enabled(&message.role))
        {
            groups
                .entry(registry.name_for_slot(message.spot_index))
                .or_default()
                .push(message.content.clone());
        }
        GroupedExport::Simplified(groups)
    } else {
        let mut groups: BTreeMap<String, Vec<Message>> = BTreeMap::new();
        for message in messages {
            groups
                .entry(registry.name_for_slot(message.spot_index))
                .or_default()
                .push(message.clone());
        }
        GroupedExport::Raw(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_core::MessageStore;

    fn sample() -> (Vec<Message>, RoleRegistry) {
        let registry = RoleRegistry::from_roles(vec![
            Role::new("User"),
            Role::new("Assistant"),
            Role::new("Critic").disabled(),
        ]);
        let mut store = MessageStore::new();
        store.append("User", "hi", 0);
        store.append("Assistant", "hello", 1);
        store.append("Critic", "bad take", 2);
        store.append("User", "thanks", 0);
        (store.read_all().to_vec(), registry)
    }

    #[test]
    fn test_simplified_array_filters_disabled() {
        let (messages, registry) = sample();

        let ArrayExport::Simplified(records) = flat_array(&messages, &registry, true) else {
            panic!("expected simplified array");
        };
        let contents: Vec<&str> = records.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hi", "hello", "thanks"]);
    }

    #[test]
    fn test_raw_array_keeps_everything() {
        let (messages, registry) = sample();

        let ArrayExport::Raw { messages, roles } = flat_array(&messages, &registry, false) else {
            panic!("expected raw array");
        };
        assert_eq!(messages.len(), 4);
        assert_eq!(roles.len(), 3);
        assert_eq!(messages[2].content, "bad take");
    }

    #[test]
    fn test_grouped_simplified() {
        let (messages, registry) = sample();

        let GroupedExport::Simplified(groups) = grouped_by_role(&messages, &registry, true)
        else {
            panic!("expected simplified groups");
        };
        assert_eq!(
            groups.get("User").map(Vec::as_slice),
            Some(["hi".to_string(), "thanks".to_string()].as_slice())
        );
        assert!(!groups.contains_key("Critic"));
    }

    #[test]
    fn test_grouped_raw_keeps_disabled_and_uses_placeholders() {
        let (messages, registry) = sample();

        let GroupedExport::Raw(groups) = grouped_by_role(&messages, &registry, false) else {
            panic!("expected raw groups");
        };
        assert_eq!(groups.get("Critic").map(Vec::len), Some(1));

        // slot beyond the registry groups under a synthesized placeholder
        let mut store = MessageStore::new();
        store.append("Role 9", "stray", 8);
        let GroupedExport::Raw(groups) =
            grouped_by_role(store.read_all(), &registry, false)
        else {
            panic!("expected raw groups");
        };
        assert!(groups.contains_key("Role 9"));
    }
}
