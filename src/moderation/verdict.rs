use serde::{Deserialize, Serialize};

/// The single result of one `classify` call.
///
/// `is_safe` is false exactly when `is_spoiler` or `is_toxic` is set, and an
/// unsafe verdict always carries a reason. The constructors are the only way
/// the pipeline builds verdicts, which keeps that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationVerdict {
    pub is_safe: bool,
    pub is_spoiler: bool,
    pub is_toxic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ModerationVerdict {
    pub fn safe() -> Self {
        Self {
            is_safe: true,
            is_spoiler: false,
            is_toxic: false,
            reason: None,
        }
    }

    pub fn toxic(reason: impl Into<String>) -> Self {
        Self {
            is_safe: false,
            is_spoiler: false,
            is_toxic: true,
            reason: Some(reason.into()),
        }
    }

    pub fn spoiler(reason: impl Into<String>) -> Self {
        Self {
            is_safe: false,
            is_spoiler: true,
            is_toxic: false,
            reason: Some(reason.into()),
        }
    }
}
