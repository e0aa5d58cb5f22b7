//! Per-platform conversation rendering.

use roundtable_core::{Message, RoleRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Target platform for a rendered conversation history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    OpenAi,
    Anthropic,
    Google,
    #[default]
    Generic,
}

/// Where the injected system record lands in a message sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemPromptPosition {
    #[default]
    Start,
    End,
}

/// Options for conversation-history rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub include_system_prompt: bool,
    pub system_prompt_position: SystemPromptPosition,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_system_prompt: true,
            system_prompt_position: SystemPromptPosition::Start,
        }
    }
}

/// A `{role, content}` wire record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleMessage {
    pub role: String,
    pub content: String,
}

/// Output of [`conversation_history`]: structured records for the message
/// platforms, one text blob for anthropic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderedConversation {
    Messages(Vec<SimpleMessage>),
    Transcript(String),
}

/// Canonical wire role for the structured-message platforms.
///
/// Case-insensitive on the source name; unknown names pass through
/// lowercased.
fn wire_role(platform: Platform, source: &str) -> String {
    let lower = source.to_ascii_lowercase();
    match lower.as_str() {
        "user" | "human" => "user".to_string(),
        "assistant" | "ai" => match platform {
            Platform::Google => "model".to_string(),
            _ => "assistant".to_string(),
        },
        "bot" if platform == Platform::Google => "model".to_string(),
        "system" | "instructions" => "system".to_string(),
        _ => lower,
    }
}

/// Label for the anthropic text transcript; `None` for system-source roles,
/// which the transcript loop always skips.
fn anthropic_label(source: &str) -> Option<String> {
    match source.to_ascii_lowercase().as_str() {
        "user" | "human" => Some("Human".to_string()),
        "assistant" | "ai" => Some("Assistant".to_string()),
        "system" | "instructions" => None,
        _ => Some(capitalize(source)),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Render the conversation history for one platform.
///
/// Messages recorded under disabled roles are excluded; the system prompt
/// comes from the registry's `System` role or its fixed fallback.
#[must_use]
pub fn conversation_history(
    messages: &[Message],
    registry: &RoleRegistry,
    platform: Platform,
    options: &RenderOptions,
) -> RenderedConversation {
    let enabled: Vec<&Message> = messages
        .iter()
        .filter(|message| registry.is_role_enabled(&message.role))
        .collect();
    debug!(
        "rendering {} of {} messages for {platform:?}",
        enabled.len(),
        messages.len()
    );

    let system_prompt = registry.system_prompt();
    match platform {
        Platform::Anthropic => {
            RenderedConversation::Transcript(render_transcript(&enabled, &system_prompt, options))
        }
        _ => RenderedConversation::Messages(render_messages(
            &enabled,
            &system_prompt,
            platform,
            options,
        )),
    }
}

fn render_messages(
    messages: &[&Message],
    system_prompt: &str,
    platform: Platform,
    options: &RenderOptions,
) -> Vec<SimpleMessage> {
    let mut rendered: Vec<SimpleMessage> = messages
        .iter()
        .map(|message| SimpleMessage {
            role: wire_role(platform, &message.role),
            content: message.content.clone(),
        })
        .collect();

    if options.include_system_prompt {
        let system = SimpleMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        };
        match options.system_prompt_position {
            SystemPromptPosition::Start => rendered.insert(0, system),
            SystemPromptPosition::End => rendered.push(system),
        }
    }

    rendered
}

fn render_transcript(
    messages: &[&Message],
    system_prompt: &str,
    options: &RenderOptions,
) -> String {
    let mut transcript = String::new();
    if options.include_system_prompt {
        transcript.push_str(&format!("\n\nSystem: {system_prompt}\n\n"));
    }

    // system-role messages are always skipped here; the flag above only
    // controls the single prepended system blob
    for message in messages {
        if let Some(label) = anthropic_label(&message.role) {
            transcript.push_str(&format!("\n\n{label}: {}", message.content));
        }
    }

    transcript.trim().to_string()
}
