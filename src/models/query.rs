use serde::Deserialize;

use super::normalize_email;
use crate::utils::AppError;

/// `?email=` filter shared by the list and lookup routes
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Owner email of the records
    pub email: Option<String>,
}

impl EmailQuery {
    /// Email filter, ignoring blank values
    pub fn filter(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(normalize_email)
            .filter(|email| !email.is_empty())
    }

    pub fn required(&self) -> Result<&str, AppError> {
        self.filter().ok_or_else(|| {
            AppError::InvalidRequest("Email query parameter is required".to_string())
        })
    }
}
