//! JSON extractor that runs `validator` rules after deserializing.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// Validation code marking a field that must be present and non-empty.
pub(crate) const REQUIRED: &str = "required";

/// [`Json`] followed by [`Validate::validate`].
///
/// A rule failing with the `required` code is reported as
/// `400 missing_field`, every other rule as `400 validation_error`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self::new(data))
    }
}

fn format_length_error(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
) -> String {
    match (number_param(params, "min"), number_param(params, "max")) {
        (Some(min), Some(max)) => format!(
            "Field '{}' must be between {} and {} characters long",
            field, min as u64, max as u64
        ),
        (Some(min), None) => format!(
            "Field '{}' must be at least {} characters long",
            field, min as u64
        ),
        (None, Some(max)) => format!(
            "Field '{}' must be at most {} characters long",
            field, max as u64
        ),
        (None, None) => format!("Field '{}' has invalid length", field),
    }
}

fn format_range_error(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
) -> String {
    match (number_param(params, "min"), number_param(params, "max")) {
        (Some(min), Some(max)) => {
            format!("Field '{}' must be between {} and {}", field, min, max)
        }
        (Some(min), None) => format!("Field '{}' must be at least {}", field, min),
        (None, Some(max)) => format!("Field '{}' must be at most {}", field, max),
        (None, None) => format!("Field '{}' is out of valid range", field),
    }
}

fn number_param(params: &HashMap<Cow<'static, str>, serde_json::Value>, key: &str) -> Option<f64> {
    params.get(key).and_then(serde_json::Value::as_f64)
}

fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return custom_message.to_string();
    }

    match error.code.as_ref() {
        REQUIRED => format!("Field '{}' is required", field),
        "length" => format_length_error(field, &error.params),
        "range" => format_range_error(field, &error.params),
        "email" => format!("Field '{}' must be a valid email address", field),
        code => format!("Field '{}' failed validation: {}", field, code),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<_> = errors.field_errors().into_iter().collect();
        field_errors.sort_by(|(a, _), (b, _)| a.cmp(b));

        tracing::warn!(
            target: "clinic_server::extract::validation",
            errors = ?field_errors,
            "Request validation failed"
        );

        let missing = field_errors.iter().find_map(|(field, errors)| {
            errors
                .iter()
                .any(|error| error.code == REQUIRED)
                .then_some(field)
        });

        if let Some(field) = missing {
            return ErrorKind::MissingField.with_message(format!("Field '{}' is required", field));
        }

        let messages: Vec<String> = field_errors
            .iter()
            .flat_map(|(field, errors)| {
                errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();

        let message = match messages.as_slice() {
            [] => "Validation failed".to_string(),
            [single] => single.clone(),
            multiple => multiple.join(". "),
        };

        ErrorKind::ValidationError
            .with_message(message)
            .with_resource("request")
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Json::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(min = 1, code = "required"))]
        patient_name: String,
        #[validate(range(min = 1, max = 32))]
        tooth_no: Option<i16>,
    }

    #[test]
    fn empty_required_field_is_missing() {
        let sample = Sample {
            patient_name: String::new(),
            tooth_no: Some(40),
        };

        let error: Error = sample.validate().unwrap_err().into();
        assert_eq!(error.kind(), ErrorKind::MissingField);
        assert_eq!(error.message(), Some("Field 'patient_name' is required"));
    }

    #[test]
    fn range_failure_is_a_validation_error() {
        let sample = Sample {
            patient_name: "Jane Doe".into(),
            tooth_no: Some(40),
        };

        let error: Error = sample.validate().unwrap_err().into();
        assert_eq!(error.kind(), ErrorKind::ValidationError);
        assert_eq!(
            error.message(),
            Some("Field 'tooth_no' must be between 1 and 32")
        );
    }

    #[test]
    fn valid_sample_passes() {
        let sample = Sample {
            patient_name: "Jane Doe".into(),
            tooth_no: None,
        };
        assert!(sample.validate().is_ok());
    }
}
