//! Audit logging for LLM calls.
//! Entries are emitted as structured tracing events; nothing is stored.

use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct LlmAuditEntry {
    pub id: Uuid,
    pub action: String,
    pub model: String,
    pub backend: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub output_hash: String,
    pub latency_ms: u64,
    pub called_at: chrono::DateTime<Utc>,
}

impl LlmAuditEntry {
    pub fn new(
        action: impl Into<String>,
        model: String,
        backend: String,
        prompt_tokens: u32,
        completion_tokens: u32,
        output: &str,
        latency_ms: u64,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(output.as_bytes());
        let output_hash = format!("{:x}", hasher.finalize());

        Self {
            id: Uuid::new_v4(),
            action: action.into(),
            model,
            backend,
            prompt_tokens,
            completion_tokens,
            output_hash,
            latency_ms,
            called_at: Utc::now(),
        }
    }

    pub fn emit(&self) {
        tracing::info!(
            target: "studykit::audit",
            id = %self.id,
            action = %self.action,
            model = %self.model,
            backend = %self.backend,
            prompt_tokens = self.prompt_tokens,
            completion_tokens = self.completion_tokens,
            output_hash = %self.output_hash,
            latency_ms = self.latency_ms,
            "LLM call"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_hash_is_sha256_hex() {
        let entry = LlmAuditEntry::new("summarize", "m".into(), "gemini".into(), 1, 2, "abc", 5);
        assert_eq!(
            entry.output_hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(entry.action, "summarize");
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let a = LlmAuditEntry::new("essay", "m".into(), "b".into(), 0, 0, "", 0);
        let b = LlmAuditEntry::new("essay", "m".into(), "b".into(), 0, 0, "", 0);
        assert_ne!(a.id, b.id);
    }
}
