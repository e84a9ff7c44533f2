//! Doctor request types.

use clinic_postgres::model::{NewDoctor, UpdateDoctor as UpdateDoctorModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for adding a doctor.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreateDoctor {
    #[validate(length(min = 1, code = "required"))]
    pub doctor_name: String,
    #[validate(length(max = 255))]
    pub specialty: Option<String>,
    #[validate(length(max = 64))]
    pub license_number: Option<String>,
}

impl CreateDoctor {
    /// Converts this request into a [`NewDoctor`] model.
    pub fn into_model(self) -> NewDoctor {
        NewDoctor {
            doctor_name: self.doctor_name.trim().to_owned(),
            specialty: self.specialty,
            license_number: self.license_number,
            is_active: None,
        }
    }
}

/// Request payload for updating a doctor.
///
/// Setting `is_active` to `false` hides the doctor from the listing without
/// touching the appointments that reference them.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct UpdateDoctor {
    #[validate(length(min = 1, code = "required"))]
    pub doctor_name: Option<String>,
    #[validate(length(max = 255))]
    pub specialty: Option<String>,
    #[validate(length(max = 64))]
    pub license_number: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateDoctor {
    /// Converts this request into an [`UpdateDoctorModel`].
    pub fn into_model(self) -> UpdateDoctorModel {
        UpdateDoctorModel {
            doctor_name: self.doctor_name.map(|name| name.trim().to_owned()),
            specialty: self.specialty,
            license_number: self.license_number,
            is_active: self.is_active,
            ..Default::default()
        }
    }
}

/// Query parameters for listing doctors.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct DoctorFilters {
    /// Also list deactivated doctors.
    #[serde(default)]
    pub include_inactive: bool,
}
