use std::path::Path;

use log::info;

use super::{
    AnalysisReport, GenerationContext, GenerationInput, GenerationOutcome, Plugin, ScaffoldResult,
};
use crate::{
    client::{ChatMessage, CompletionOptions, ModelClient},
    error::Result,
};

const REVIEW_TEMPERATURE: f32 = 0.1;

const REVIEW_INSTRUCTION: &str = "You are an experienced code reviewer. Examine the code for \
security vulnerabilities, performance problems, anti-patterns, likely bugs and readability \
issues. Give specific, actionable feedback and point at the lines concerned.";

/// Model-backed review of a source file.
pub struct CodeReviewPlugin<C> {
    client: C,
}

impl<C: ModelClient> CodeReviewPlugin<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Review `code` and return the model's feedback.
    fn review(&self, code: &str) -> Result<String> {
        let messages = [
            ChatMessage::system(REVIEW_INSTRUCTION),
            ChatMessage::user(format!("Please review this code:\n\n```\n{code}\n```")),
        ];
        let options = CompletionOptions::default().with_temperature(REVIEW_TEMPERATURE);
        self.client.complete(&messages, options)
    }
}

impl<C: ModelClient> Plugin for CodeReviewPlugin<C> {
    fn name(&self) -> &str {
        "code_review"
    }

    fn description(&self) -> &str {
        "AI-powered code review and analysis"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn analyze(&self, _project: &Path) -> Result<AnalysisReport> {
        let mut report = AnalysisReport::new("code_review");
        report
            .recommendations
            .push("Use 'aria review <file>' to review a specific file".to_string());
        Ok(report)
    }

    fn scaffold(&self, _name: &str, _target: &Path) -> ScaffoldResult {
        ScaffoldResult::failed("The code_review plugin cannot scaffold projects")
    }

    fn generate(
        &self,
        input: GenerationInput<'_>,
        _context: &GenerationContext<'_>,
    ) -> GenerationOutcome {
        let code = match input {
            GenerationInput::Code(code) if !code.trim().is_empty() => code,
            _ => return GenerationOutcome::failed("No code provided for review"),
        };

        info!("Requesting review of {} bytes of code", code.len());
        match self.review(code) {
            Ok(review) => GenerationOutcome::text(review),
            Err(e) => GenerationOutcome::failed(format!("Code review failed: {e}")),
        }
    }

    fn handles_stack(&self, _tech_stack: &str) -> bool {
        false
    }
}
