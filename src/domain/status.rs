//! Operation Status
//!
//! The `{success, errorCode}` document returned by every bank operation.

use serde::Serialize;

use super::error::{BankError, ErrorCode};

/// Outcome of a bank operation as seen by transport adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatus {
    pub success: bool,
    pub error_code: ErrorCode,
}

impl OperationStatus {
    /// Successful operation
    pub fn ok() -> Self {
        Self {
            success: true,
            error_code: ErrorCode::NoError,
        }
    }

    /// Failed operation with the given code
    pub fn failed(error_code: ErrorCode) -> Self {
        Self {
            success: false,
            error_code,
        }
    }
}

impl<T> From<Result<T, BankError>> for OperationStatus {
    fn from(result: Result<T, BankError>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(e) => Self::failed(e.code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_document() {
        let value = serde_json::to_value(OperationStatus::ok()).unwrap();
        assert_eq!(value, json!({ "success": true, "errorCode": 0 }));
    }

    #[test]
    fn test_failure_document() {
        let result: Result<(), BankError> = Err(BankError::insufficient_funds(1000, 60));
        let value = serde_json::to_value(OperationStatus::from(result)).unwrap();
        assert_eq!(value, json!({ "success": false, "errorCode": 502 }));
    }
}
