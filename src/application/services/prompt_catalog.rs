const CLASSIFICATION_PROMPT: &str = r#"You are a document analysis and classification expert.
The paragraphs that follow are a SAMPLE of a larger document. Infer the type of the whole document from them.

Document types:

1. PROCEDURE (operational procedures, run books)
- Step-by-step instructions (Step 1, 2, 3)
- Verb-driven descriptions: install, run, build, register, apply
- May describe screens, buttons, menu paths

2. POLICY (policies, internal regulations, rules, notices)
- Legal or internal rules, conditions, articles and clauses
- Formal written register with numbered articles

3. MANUAL (technical manuals, developer guides)
- Explanations for developers, code samples, configuration values, options
- Source code, scripts or commands

4. REPORT (reports, analyses, results)
- Centered on analysis, findings and reporting
- Tables, structured sections, summaries rather than rules or procedures

5. UNKNOWN
- None of the above

Rules:
- Judge the whole document from the sample only.
- The sample may contain OCR noise, article fragments or captured UI text; decide by the functional purpose of the document.
- Choose exactly one type.

Respond with JSON only, in this shape:
{"document_type": "PROCEDURE | POLICY | MANUAL | REPORT | UNKNOWN", "confidence": <number between 0 and 1>, "reason": "<short explanation>"}"#;

const RELEVANCE_PROMPT: &str = r#"Given a question and a passage, decide whether the passage contains information that helps answer the question.
Answer with YES or NO only."#;

const ANSWER_PROMPT: &str = r#"You are an assistant that answers questions from internal company documents.

Rules:
- Answer only from the provided passages.
- Cite every statement with the file_name and page of the passage it comes from.
- Do not introduce facts that are not in the passages.
- When several passages support the answer, order the statements by importance.
- If the passages do not contain the answer, reply that the documents contain no information about it.

Respond with JSON only, in this shape:
{"answer": [{"text": "<statement>", "source": {"file_name": "<file name>", "page": <page number>}}]}"#;

/// Read-only set of instruction prompts built once at startup and handed to
/// the services that talk to the language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCatalog {
    classification: String,
    relevance: String,
    answer: String,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            classification: CLASSIFICATION_PROMPT.to_string(),
            relevance: RELEVANCE_PROMPT.to_string(),
            answer: ANSWER_PROMPT.to_string(),
        }
    }
}

impl PromptCatalog {
    pub fn new(
        classification: impl Into<String>,
        relevance: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            classification: classification.into(),
            relevance: relevance.into(),
            answer: answer.into(),
        }
    }

    pub fn classification(&self) -> &str {
        &self.classification
    }

    pub fn relevance(&self) -> &str {
        &self.relevance
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}
