//! AI transform orchestration.

use tracing::{debug, warn};

use pagequill_protocols::provider::Turn;

use super::{Panel, PanelEvent};

#[cfg(test)]
#[path = "assist_tests.rs"]
mod tests;

/// Operating modes for the AI transform. `Chat` is the only mode that
/// carries context across consecutive invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistMode {
    Summarize,
    Proofread,
    Translate,
    Reply,
    Chat,
}

impl AssistMode {
    /// Instruction line prefixed to the prompt.
    pub fn preamble(&self) -> &'static str {
        match self {
            AssistMode::Summarize => "Summarize the following text.",
            AssistMode::Proofread => {
                "Proofread the following text and return the corrected version."
            }
            AssistMode::Translate => "Translate the following text.",
            AssistMode::Reply => "Draft a reply to the following message.",
            AssistMode::Chat => "",
        }
    }

    /// Whether this mode keeps the previous exchange as context.
    pub fn keeps_context(&self) -> bool {
        matches!(self, AssistMode::Chat)
    }
}

/// State of the result area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistState {
    Idle,
    /// A request is in flight; the invoke control is disabled.
    Pending,
    Complete,
    /// The last request failed; the error stays up until the next attempt.
    Failed,
}

/// A completed prompt/response pair retained as single-turn context.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub prompt: String,
    pub response: String,
}

impl Panel {
    pub fn assist_state(&self) -> AssistState {
        self.assist_state
    }

    /// The last successful response text.
    pub fn result_text(&self) -> &str {
        &self.result
    }

    /// The retained single-turn context, if any.
    pub fn conversation(&self) -> Option<&Exchange> {
        self.conversation.as_ref()
    }

    /// Run the editor text through the generative endpoint.
    ///
    /// Aborts before any network activity when no credential is configured,
    /// raising the settings surface instead. Rejects re-entry while a
    /// request is pending.
    pub async fn invoke_assist(&mut self, mode: AssistMode, instruction: &str) {
        if self.assist_state == AssistState::Pending {
            self.status("Generation already running");
            return;
        }

        let Some(generator) = self.generator.clone() else {
            self.events.push(PanelEvent::OpenSettings);
            self.sticky_error("Set an API key in the settings first");
            return;
        };

        let prompt = build_prompt(mode, instruction, &self.editor);
        let turns = build_turns(mode, self.conversation.as_ref(), &prompt);

        debug!("AI transform: mode={:?} turns={}", mode, turns.len());
        self.assist_state = AssistState::Pending;

        match generator.generate(&self.model, &turns).await {
            Ok(text) => {
                self.result = text.clone();
                self.assist_state = AssistState::Complete;
                self.conversation = if mode.keeps_context() {
                    Some(Exchange {
                        prompt,
                        response: text,
                    })
                } else {
                    None
                };
                self.status("AI generation complete");
            }
            Err(e) => {
                warn!("Generation failed: {}", e);
                self.assist_state = AssistState::Failed;
                self.sticky_error(format!("AI request failed: {}", e.user_message()));
            }
        }
    }

    /// The panel's clear action: editor, result, and retained context.
    pub fn clear_assist(&mut self) {
        self.editor.clear();
        self.result.clear();
        self.conversation = None;
        self.assist_state = AssistState::Idle;
    }
}

fn build_prompt(mode: AssistMode, instruction: &str, editor: &str) -> String {
    let mut prompt = String::new();
    let preamble = mode.preamble();
    if !preamble.is_empty() {
        prompt.push_str(preamble);
        prompt.push_str("\n\n");
    }
    if !instruction.is_empty() {
        prompt.push_str(instruction);
        prompt.push_str("\n\n");
    }
    prompt.push_str(editor);
    prompt
}

fn build_turns(mode: AssistMode, context: Option<&Exchange>, prompt: &str) -> Vec<Turn> {
    match context {
        Some(exchange) if mode.keeps_context() => vec![
            Turn::user(exchange.prompt.clone()),
            Turn::model(exchange.response.clone()),
            Turn::user(prompt),
        ],
        _ => vec![Turn::user(prompt)],
    }
}
