//! Generation Orchestrator — the per-session state machine.
//!
//! Flow: validate → (key present) build_prompt → TextGenerator::generate
//!       → on error fall back to the template; (no key) template directly.
//!
//! States: `Idle → Submitting → {Success, Failed}`. `submit` takes `&mut self`,
//! so a second submission cannot start while one is in flight. Client failures
//! never reach `Failed`: they are masked by the template and reported through
//! `info_message` with `LetterSource::TemplateAfterError`. Only invalid input
//! is fatal.

use tracing::{debug, info, warn};

use crate::generation::fallback::generate_fallback_letter;
use crate::generation::models::{ApplicationInput, GenerationResult, LetterSource};
use crate::generation::prompts::build_prompt;
use crate::llm_client::TextGenerator;

/// Advisory shown when the template is used because no key was supplied.
pub const NO_API_KEY_MESSAGE: &str =
    "No API key provided - using template. Add your Gemini API key for AI-generated content.";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenerationState {
    #[default]
    Idle,
    Submitting,
    Success(GenerationResult),
    Failed {
        reason: String,
    },
}

/// One form session: a single result slot with a single writer.
pub struct GenerationSession<'a> {
    generator: &'a dyn TextGenerator,
    state: GenerationState,
}

impl<'a> GenerationSession<'a> {
    pub fn new(generator: &'a dyn TextGenerator) -> Self {
        Self {
            generator,
            state: GenerationState::Idle,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn into_state(self) -> GenerationState {
        self.state
    }

    /// True only while a submission is being processed.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, GenerationState::Submitting)
    }

    /// Letter text of the last successful submission, empty otherwise.
    pub fn letter_text(&self) -> &str {
        match &self.state {
            GenerationState::Success(result) => &result.letter_text,
            _ => "",
        }
    }

    /// Runs one submission to a terminal state and returns it.
    pub async fn submit(&mut self, input: &ApplicationInput) -> &GenerationState {
        self.begin();

        let terminal = match input.validate() {
            Ok(()) => GenerationState::Success(self.run(input).await),
            Err(e) => {
                info!("Submission rejected: {e}");
                GenerationState::Failed {
                    reason: e.to_string(),
                }
            }
        };

        self.complete(terminal)
    }

    /// Clears any prior result and enters `Submitting`.
    pub(crate) fn begin(&mut self) {
        self.state = GenerationState::Submitting;
    }

    /// The single exit point out of `Submitting`.
    pub(crate) fn complete(&mut self, terminal: GenerationState) -> &GenerationState {
        debug_assert!(!matches!(
            terminal,
            GenerationState::Idle | GenerationState::Submitting
        ));
        self.state = terminal;
        &self.state
    }

    async fn run(&self, input: &ApplicationInput) -> GenerationResult {
        let Some(api_key) = &input.api_key else {
            info!("No API key supplied, using template letter");
            return GenerationResult {
                letter_text: generate_fallback_letter(input),
                info_message: Some(NO_API_KEY_MESSAGE.to_string()),
                source: LetterSource::TemplateNoApiKey,
            };
        };

        let prompt = build_prompt(input);
        debug!("Generated prompt for Gemini:\n{prompt}");

        match self.generator.generate(&prompt, api_key.expose()).await {
            Ok(letter_text) => {
                info!("Cover letter generated ({} chars)", letter_text.len());
                GenerationResult {
                    letter_text,
                    info_message: None,
                    source: LetterSource::Generated,
                }
            }
            Err(e) => {
                warn!("Gemini generation failed, falling back to template: {e}");
                GenerationResult {
                    letter_text: generate_fallback_letter(input),
                    info_message: Some(e.to_string()),
                    source: LetterSource::TemplateAfterError,
                }
            }
        }
    }
}
