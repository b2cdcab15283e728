use model::{ChatMessage, GenerationParams};

/// Domain model: longer drafts, conservative sampling.
pub const DRAFT_PARAMS: GenerationParams = GenerationParams {
    max_new_tokens: 768,
    temperature: 0.2,
};

/// Refiner: short JSON-only output, slightly warmer sampling.
pub const REFINE_PARAMS: GenerationParams = GenerationParams {
    max_new_tokens: 384,
    temperature: 0.3,
};

const SYSTEM_MEDICAL: &str = r#"You are a medical domain LLM focused on India. Be accurate, evidence-oriented, and conservative.
Prefer Indian brand/generic names and typical OTC availability. When unsure, say you are unsure and
advise consulting a licensed doctor. Units: mg, mL; frequencies: OD/BID/TID/QID or plain English.
Avoid inventing doses. Flag common red-flags (chest pain, breathlessness, high fever >39°C,
dehydration, LOC, pregnancy concerns, pediatric <5y)."#;

const PRESCRIPTION_DRAFT_INSTRUCTIONS: &str = r#"Task: Read the OCR text of an Indian prescription and produce a clear, concise PARAGRAPH summary
that mentions patient (if present), diagnosis/complaints (if present), medicines (as written),
and any timing/food instructions. Do NOT attempt to format JSON. If handwriting is unclear, say so."#;

const QUERY_ASSISTANT_INSTRUCTIONS: &str = r#"Answer the patient's question in a clinically conservative, India-specific way. Produce a concise
PARAGRAPH draft answer (not JSON). If available, USE the provided context which may include a
structured prescription summary (patient name, diagnosis, medicines with dose/frequency/duration,
instructions). Consider potential interactions, contraindications, timing with food/milk, and
follow-up advice. If personalised judgement is needed, give general safety guidance and advise
consulting a doctor. Be explicit when evidence is limited. Keep tone neutral and kind."#;

const REFINER_SYSTEM: &str = r#"You refine clinical drafts into final, user-facing JSON according to the specified schema.
Keep facts intact and avoid adding unsupported clinical claims."#;

const REFINER_TO_PRESCRIPTION_JSON: &str = r#"You will receive a PARAGRAPH draft produced by a medical model from OCR text of a prescription.
Transform it into STRICT JSON with this schema (and nothing else):

{
  "patient_name": string|null,
  "diagnosis_or_complaints": string|null,
  "medicines": [
    {"name": string, "dosage": string|null, "frequency": string|null, "duration": string|null, "instructions": string|null}
  ],
  "tests_or_followup": string|null,
  "red_flags": string|null,
  "generic_advice": string|null,
  "disclaimer": string
}

Rules:
- Use exactly the above keys.
- Keep brand names as written; add generic in parentheses only if unambiguous in the draft.
- Normalize frequencies like 1-0-1 -> "morning and night".
- If unknown/unclear, set the field to null (do NOT guess).
- Output MUST be one JSON object only. No markdown, no backticks, no extra text."#;

const REFINER_TO_ANSWER_JSON: &str = r#"You will receive a PARAGRAPH clinical draft answer. Transform it into STRICT JSON with this schema:

{
  "answer": string,
  "safety": {
    "disclaimer": string,
    "emergency": string,
    "version": "v1"
  },
  "sources": string[]
}

Rules:
- "answer" must be clear, friendly, and accurate for India. Do NOT add new clinical claims; only rephrase/summarize.
- Always include a short disclaimer and India emergency hint ("If this is an emergency in India, call 112 or visit the nearest emergency department.").
- "sources": include any short context strings passed in; if none are given, use an empty array.
- Output MUST be one JSON object only. No markdown, no backticks, no extra text."#;

pub fn summarize_draft_messages(ocr_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_MEDICAL),
        ChatMessage::user(format!(
            "{PRESCRIPTION_DRAFT_INSTRUCTIONS}\n\nOCR_TEXT:\n{ocr_text}"
        )),
    ]
}

pub fn qa_draft_messages(query: &str, context_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_MEDICAL),
        ChatMessage::user(format!(
            "{QUERY_ASSISTANT_INSTRUCTIONS}\n\nQUESTION:\n{query}\n\nCONTEXT:\n{context_text}"
        )),
    ]
}

pub fn prescription_refine_messages(draft: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(REFINER_SYSTEM),
        ChatMessage::user(format!(
            "{REFINER_TO_PRESCRIPTION_JSON}\n\nDRAFT_PARAGRAPH:\n{draft}"
        )),
    ]
}

pub fn answer_refine_messages(draft: &str, sources_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(REFINER_SYSTEM),
        ChatMessage::user(format!(
            "{REFINER_TO_ANSWER_JSON}\n\nDRAFT_PARAGRAPH:\n{draft}\n\nSOURCES:\n{sources_text}"
        )),
    ]
}
