//! Adoption lifecycle state machine and authorization rules.
//!
//! The joint state of one pet and its application set is governed here:
//! which status transitions are legal, what side effects they imply, and who
//! may perform them. The DB layer executes these rules inside a single
//! transaction; the HTTP layer only maps errors to responses.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_SHELTER};
use crate::types::DbId;

/// Review note stamped on sibling applications that are auto-rejected when
/// another application for the same pet is approved.
pub const ADOPTED_BY_OTHER_NOTE: &str = "Pet has been adopted by another applicant";

/// Status of an adoption application.
///
/// `Pending` is the only non-terminal status; `Approved` and `Rejected` are
/// terminal. Maps to the Postgres enum type `application_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Whether no further transition is defined from this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Validate a transition from `self` to `to`.
    ///
    /// The only legal transitions are `pending -> approved` and
    /// `pending -> rejected`. Everything else (including re-approving an
    /// already-approved application) is an [`CoreError::InvalidState`], so
    /// side effects can never be re-run on a terminal application.
    pub fn transition(self, to: ApplicationStatus) -> Result<ApplicationStatus, CoreError> {
        match (self, to) {
            (Self::Pending, Self::Approved) => Ok(Self::Approved),
            (Self::Pending, Self::Rejected) => Ok(Self::Rejected),
            (from, to) => Err(CoreError::InvalidState(format!(
                "Cannot transition application from '{}' to '{}'",
                from.as_str(),
                to.as_str()
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A review decision submitted by a shelter or admin.
///
/// Deliberately excludes `pending` so a request body can never "transition"
/// an application back to its initial status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    pub fn as_status(self) -> ApplicationStatus {
        match self {
            Self::Approved => ApplicationStatus::Approved,
            Self::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// Returns `Ok(())` when a pet in `availability` may receive a new
/// application, i.e. it is `available`.
pub fn ensure_pet_open_for_applications(
    availability: crate::pets::PetAvailability,
) -> Result<(), CoreError> {
    use crate::pets::PetAvailability;
    match availability {
        PetAvailability::Available => Ok(()),
        PetAvailability::Pending | PetAvailability::Adopted => Err(CoreError::InvalidState(
            format!("Pet is not available for adoption (status: {})", availability.as_str()),
        )),
    }
}

/// Resource-scoped management capability: may `actor` approve or reject an
/// application targeting a pet owned by `pet_shelter_id`?
///
/// Admins always may; a shelter only when it owns the pet. Applicants never
/// review their own applications.
pub fn can_manage_application(actor_id: DbId, actor_role: &str, pet_shelter_id: DbId) -> bool {
    match actor_role {
        ROLE_ADMIN => true,
        ROLE_SHELTER => actor_id == pet_shelter_id,
        _ => false,
    }
}

/// Resource-scoped view capability: admin, the applicant, or the shelter
/// owning the targeted pet.
pub fn can_view_application(
    actor_id: DbId,
    actor_role: &str,
    applicant_id: DbId,
    pet_shelter_id: DbId,
) -> bool {
    actor_id == applicant_id || can_manage_application(actor_id, actor_role, pet_shelter_id)
}
