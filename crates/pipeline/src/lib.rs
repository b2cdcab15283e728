pub mod normalize;
pub mod prompt;
pub mod safety;
pub mod schema;

pub use schema::{AnswerQueryResponse, MedicineItem, PrescriptionSummary, SafetyBlock};

use serde_json::Value;
use thiserror::Error;

use model::TextGenerator;
use salvage::{ExtractionError, extract_json};
use schema::SchemaError;

/// Terminal failure states of both pipelines, mapped to HTTP statuses at
/// the API boundary. None of these are retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input matched the deny list; no model call was made.
    #[error("{0}")]
    SafetyRejection(&'static str),

    /// A text-generation call failed (network, timeout, or service error).
    #[error("text-generation call failed: {0}")]
    Upstream(#[from] model::ModelError),

    /// The refiner's output contained no recoverable JSON. Kept distinct
    /// from [`PipelineError::Validation`] so operators can tell upstream
    /// misbehavior from our own bugs.
    #[error("refiner returned invalid JSON")]
    MalformedOutput(#[source] ExtractionError),

    /// Recovered JSON did not satisfy the target schema.
    #[error("refined JSON failed schema validation: {0}")]
    Validation(#[source] SchemaError),
}

/// The two-stage draft→refine orchestrator.
///
/// Holds one configured generator per role: the domain-specialist model
/// produces free-text drafts, the refiner converts drafts into strict JSON.
/// Both calls within a request are strictly sequential; requests share no
/// mutable state.
pub struct Pipelines<G> {
    medical: G,
    refiner: G,
}

impl<G: TextGenerator> Pipelines<G> {
    pub fn new(medical: G, refiner: G) -> Self {
        Self { medical, refiner }
    }

    /// Summarization pipeline: OCR text → draft → refine → salvage →
    /// default disclaimer → validated [`PrescriptionSummary`].
    pub async fn summarize(&self, ocr_text: &str) -> Result<PrescriptionSummary, PipelineError> {
        if let Some(message) = safety::prefilter(ocr_text) {
            return Err(PipelineError::SafetyRejection(message));
        }

        let draft = self
            .medical
            .generate(&prompt::summarize_draft_messages(ocr_text), prompt::DRAFT_PARAMS)
            .await?;

        let raw = self
            .refiner
            .generate(
                &prompt::prescription_refine_messages(&draft),
                prompt::REFINE_PARAMS,
            )
            .await?;

        let value = self.salvage(&raw)?;
        let value = normalize::prescription(value);

        PrescriptionSummary::from_value(value).map_err(|e| {
            tracing::error!(error = %e, "refined prescription JSON failed validation");
            PipelineError::Validation(e)
        })
    }

    /// Question-answering pipeline: query → context assembly → draft →
    /// refine → salvage → safety/sources normalization → validated
    /// [`AnswerQueryResponse`].
    ///
    /// A supplied prescription summary that fails to flatten is logged and
    /// skipped; the pipeline falls back to retrieval-only context.
    pub async fn answer(
        &self,
        query: &str,
        prescription_summary: Option<&Value>,
    ) -> Result<AnswerQueryResponse, PipelineError> {
        if let Some(message) = safety::prefilter(query) {
            return Err(PipelineError::SafetyRejection(message));
        }

        let med_snippets = context::search(query, context::DEFAULT_LIMIT);

        let (presc_context, presc_sources) = match prescription_summary {
            None => (String::new(), Vec::new()),
            Some(value) => match context::flatten_prescription(value) {
                Ok(flattened) => flattened,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "unable to parse prescription_summary; proceeding without it"
                    );
                    (String::new(), Vec::new())
                }
            },
        };

        // Prescription context first, then in-table medicine hints.
        let med_context = med_snippets.join("\n");
        let merged_context: String = [presc_context.as_str(), med_context.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        let draft = self
            .medical
            .generate(
                &prompt::qa_draft_messages(query, &merged_context),
                prompt::DRAFT_PARAMS,
            )
            .await?;

        // Sources go to the refiner as text and double as the fallback if
        // its JSON omits them.
        let mut all_sources = presc_sources;
        all_sources.extend(med_snippets);
        let sources_text = all_sources.join("\n");

        let raw = self
            .refiner
            .generate(
                &prompt::answer_refine_messages(&draft, &sources_text),
                prompt::REFINE_PARAMS,
            )
            .await?;

        let value = self.salvage(&raw)?;
        let value = normalize::answer(value, &all_sources);

        AnswerQueryResponse::from_value(value).map_err(|e| {
            tracing::error!(error = %e, "refined answer JSON failed validation");
            PipelineError::Validation(e)
        })
    }

    fn salvage(&self, raw: &str) -> Result<Value, PipelineError> {
        extract_json(raw).map_err(|e| {
            tracing::error!(error = %e, raw, "refiner output contained no recoverable JSON");
            PipelineError::MalformedOutput(e)
        })
    }
}
