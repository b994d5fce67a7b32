//! Error response creation for the operation handler.

use super::core::{OperationMetadata, OwsOperationResponse};
use crate::error::ServiceException;

/// Create a failed response carrying `exception`.
pub fn create_error_response(
    exception: ServiceException,
    metadata: OperationMetadata,
) -> OwsOperationResponse {
    OwsOperationResponse {
        success: false,
        data: None,
        exception: Some(exception),
        metadata,
    }
}
