//! "Why this?" explanations for recommended activities.
//!
//! Explanations are static records looked up by activity id. Confidence
//! values are stored, never computed.

mod table;

pub use table::{
    Confidence, ExplainError, Explanation, ExplanationTable, InvalidConfidence, Rationale, Reason,
    ReasonCategory,
};
