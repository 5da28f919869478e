//! Result of a create/edit/delete, handed back to the page instead of a
//! session flash.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// User-facing notice plus the page to go to next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub outcome: Outcome,
    pub message: String,
    pub redirect_to: String,
    /// Why a submission was rejected; never carries storage errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notice {
    pub fn success(message: impl Into<String>, redirect_to: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            message: message.into(),
            redirect_to: redirect_to.into(),
            detail: None,
        }
    }

    pub fn failure(message: impl Into<String>, redirect_to: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            message: message.into(),
            redirect_to: redirect_to.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_outcome_lowercase() {
        let notice = Notice::success("Venue Hall was successfully listed!", "/");
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["redirect_to"], "/");
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn failure_carries_detail() {
        let notice = Notice::failure("An error occurred.", "/").with_detail("name cannot be empty");
        assert_eq!(notice.outcome, Outcome::Failure);
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["outcome"], "failure");
        assert_eq!(json["detail"], "name cannot be empty");
    }
}
