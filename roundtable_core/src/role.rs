//! Participant roles and the registry that maps slots to them.
//!
//! Roles are pure data: the store and the round arithmetic never consult
//! them. Their metadata (`color`, `tone`, `expertise`) is carried through
//! unchanged for presentation layers.

use serde::{Deserialize, Serialize};

/// Fallback system prompt used when no role named `System` carries one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful, friendly AI assistant.";

const DEFAULT_COLOR: &str = "#ff9900";
const DEFAULT_TONE: &str = "neutral";

fn default_true() -> bool {
    true
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

/// One participant definition.
///
/// `name` is the join key to recorded messages; it is captured into each
/// message as a plain string at record time, so later registry edits never
/// rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Unique identifier within a registry
    pub name: String,
    /// Free text, may be empty
    #[serde(default)]
    pub description: String,
    /// Instruction text, meaningful when the role represents system content
    #[serde(default)]
    pub system_prompt: String,
    /// Disabled roles are excluded from rendered output, not from the log
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    /// Presentation metadata, never affects store or round logic
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default)]
    pub expertise: Vec<String>,
}

impl Role {
    /// Create a role with all defaults filled.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            system_prompt: String::new(),
            is_enabled: true,
            color: default_color(),
            tone: default_tone(),
            expertise: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Mark the role as disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    /// Fill empty metadata fields with their defaults.
    ///
    /// Caller-supplied role sets may omit everything but `name`; this
    /// normalizes them before they enter a registry.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.color.is_empty() {
            self.color = default_color();
        }
        if self.tone.is_empty() {
            self.tone = default_tone();
        }
        self
    }
}

/// Ordered list of participant definitions, indexed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleRegistry {
    roles: Vec<Role>,
}

impl RoleRegistry {
    /// The built-in three-role default installed when a conversation
    /// starts without a caller-supplied role set.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            roles: vec![
                Role::new("User").with_description("The human user in the conversation"),
                Role::new("Assistant").with_description("The AI assistant in the conversation"),
                Role::new("System")
                    .with_description("System instructions for the conversation")
                    .with_system_prompt(DEFAULT_SYSTEM_PROMPT),
            ],
        }
    }

    /// Build a registry from an explicit role list.
    #[must_use]
    pub fn from_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: roles.into_iter().map(Role::normalized).collect(),
        }
    }

    /// Resolve a caller-supplied role set against the prior registry.
    ///
    /// Non-empty input wins verbatim (after defaulting); an empty input is
    /// a no-op when a prior registry exists, and installs the built-in
    /// defaults otherwise. An empty update is never a clear.
    #[must_use]
    pub fn resolve(provided: Vec<Role>, prior: Option<Self>) -> Self {
        if !provided.is_empty() {
            return Self::from_roles(provided);
        }
        match prior {
            Some(existing) if !existing.is_empty() => existing,
            _ => Self::builtin(),
        }
    }

    /// Role name for a slot index.
    ///
    /// Degrades to a synthesized `"Role {n}"` placeholder when the slot is
    /// beyond the registry, so recording is never blocked by a
    /// registry/slot-count mismatch.
    #[must_use]
    pub fn name_for_slot(&self, slot_index: usize) -> String {
        self.roles.get(slot_index).map_or_else(
            || format!("Role {}", slot_index + 1),
            |role| role.name.clone(),
        )
    }

    /// Look up a role by name, case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Role> {
        self.roles
            .iter()
            .find(|role| role.name.eq_ignore_ascii_case(name))
    }

    /// Whether messages recorded under this role name should appear in
    /// rendered output. Names with no registry entry are enabled.
    #[must_use]
    pub fn is_role_enabled(&self, name: &str) -> bool {
        self.find(name).is_none_or(|role| role.is_enabled)
    }

    /// The system prompt for rendering: the prompt of the role literally
    /// named `System` (case-insensitive), or the fixed fallback.
    #[must_use]
    pub fn system_prompt(&self) -> String {
        self.find("system")
            .filter(|role| !role.system_prompt.is_empty())
            .map_or_else(
                || DEFAULT_SYSTEM_PROMPT.to_string(),
                |role| role.system_prompt.clone(),
            )
    }

    /// All roles in slot order.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_provided_roles() {
        let provided = vec![Role::new("Moderator"), Role::new("Panelist")];
        let registry = RoleRegistry::resolve(provided, Some(RoleRegistry::builtin()));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name_for_slot(0), "Moderator");
    }

    #[test]
    fn test_resolve_empty_installs_builtin_once() {
        let registry = RoleRegistry::resolve(vec![], None);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.name_for_slot(0), "User");
        assert_eq!(registry.name_for_slot(2), "System");
    }

    #[test]
    fn test_resolve_empty_keeps_prior() {
        let prior = RoleRegistry::from_roles(vec![Role::new("Narrator")]);
        let registry = RoleRegistry::resolve(vec![], Some(prior.clone()));
        assert_eq!(registry, prior);
    }

    #[test]
    fn test_resolve_treats_empty_prior_as_absent() {
        let registry = RoleRegistry::resolve(vec![], Some(RoleRegistry::default()));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_name_for_slot_synthesizes_placeholder() {
        let registry = RoleRegistry::from_roles(vec![Role::new("Solo")]);
        assert_eq!(registry.name_for_slot(0), "Solo");
        assert_eq!(registry.name_for_slot(1), "Role 2");
        assert_eq!(registry.name_for_slot(7), "Role 8");
    }

    #[test]
    fn test_normalized_fills_metadata_defaults() {
        let role = Role {
            name: "Critic".to_string(),
            description: String::new(),
            system_prompt: String::new(),
            is_enabled: true,
            color: String::new(),
            tone: String::new(),
            expertise: Vec::new(),
        }
        .normalized();

        assert_eq!(role.color, DEFAULT_COLOR);
        assert_eq!(role.tone, DEFAULT_TONE);
    }

    #[test]
    fn test_system_prompt_lookup_is_case_insensitive() {
        let registry = RoleRegistry::from_roles(vec![
            Role::new("user"),
            Role::new("SYSTEM").with_system_prompt("Be nice"),
        ]);
        assert_eq!(registry.system_prompt(), "Be nice");
    }

    #[test]
    fn test_system_prompt_falls_back_when_empty() {
        let registry = RoleRegistry::from_roles(vec![Role::new("System")]);
        assert_eq!(registry.system_prompt(), DEFAULT_SYSTEM_PROMPT);

        let no_system = RoleRegistry::from_roles(vec![Role::new("User")]);
        assert_eq!(no_system.system_prompt(), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_unknown_role_names_are_enabled() {
        let registry = RoleRegistry::from_roles(vec![Role::new("Muted").disabled()]);
        assert!(!registry.is_role_enabled("Muted"));
        assert!(registry.is_role_enabled("Role 5"));
    }

    #[test]
    fn test_role_serde_camel_case() {
        let role = Role::new("User").with_system_prompt("hello");
        let json = serde_json::to_value(&role).unwrap_or_default();
        assert!(json.get("systemPrompt").is_some());
        assert!(json.get("isEnabled").is_some());
    }
}
