//! Database models for every table in the clinic schema.
//!
//! Each table has a queryable model plus, where rows are written, a `New*`
//! insertable and an `Update*` changeset.

mod access_token;
mod account;
mod appointment;
mod appointment_attachment;
mod appointment_procedure;
mod company;
mod doctor;
mod patient;
mod prescription;

// Identity models
pub use access_token::{AccessToken, DEFAULT_SCOPE, NewAccessToken};
pub use account::{Account, NewAccount};
pub use company::{Company, NewCompany};
// Clinic records
pub use appointment::{
    Appointment, DEFAULT_APPOINTMENT_NAME, NewAppointment, UpdateAppointment,
};
pub use appointment_attachment::{
    AppointmentAttachment, AppointmentAttachmentSummary, MAX_ATTACHMENT_SIZE,
    NewAppointmentAttachment,
};
pub use appointment_procedure::{AppointmentProcedure, NewAppointmentProcedure};
pub use doctor::{Doctor, NewDoctor, UpdateDoctor};
pub use patient::{NewPatient, Patient, UpdatePatient};
pub use prescription::{
    NewPrescription, NewPrescriptionLine, Prescription, PrescriptionDraft, PrescriptionLine,
    PrescriptionLineDraft,
};
