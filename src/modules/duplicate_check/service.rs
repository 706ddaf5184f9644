//! Pre-registration duplicate probes.
//!
//! The front desk calls these before opening a registration form. A probe
//! never rejects anything itself; it reports which register (or the
//! exclusion ledger) already holds the identity so the caller can stop
//! early with the full record on hand.

use crate::modules::duplicate_check::model::DuplicateCheckResponse;
use crate::utils::errors::AppError;
use maktab_core::{Clock, blocks_reregistration};
use maktab_models::StudentCategory;
use maktab_store::Store;
use tracing::instrument;

pub struct DuplicateCheckService;

impl DuplicateCheckService {
    /// Probes every student register and then the exclusion ledger for an ID.
    ///
    /// Register hits carry the matching record as `data`. A ledger hit only
    /// counts while the exclusion still blocks re-registration; older
    /// entries report the ID as available even before the sweep removes
    /// them. The create-time guard does not apply this window, so an ID the
    /// probe calls available can still be refused at registration.
    #[instrument(skip(store, clock))]
    pub async fn check_student_id(
        store: &dyn Store,
        clock: &dyn Clock,
        student_id: &str,
    ) -> Result<DuplicateCheckResponse, AppError> {
        for category in StudentCategory::ALL {
            if let Some(student) = store
                .find_student_by_student_id(category, student_id)
                .await?
            {
                return Ok(DuplicateCheckResponse::found(
                    category.registration_type(),
                    Some(serde_json::to_value(&student)?),
                    format!(
                        "Student already registered {} with ID: {}",
                        category.registered_phrase(),
                        student_id
                    ),
                ));
            }
        }

        if let Some(excluded) = store.find_excluded_by_student_id(student_id).await? {
            if blocks_reregistration(excluded.excluded_date, clock.today()) {
                return Ok(DuplicateCheckResponse::found(
                    "EXCLUDED_STUDENT",
                    Some(serde_json::to_value(&excluded)?),
                    format!(
                        "Student was excluded on {} and cannot re-register yet",
                        excluded.excluded_date
                    ),
                ));
            }
        }

        Ok(DuplicateCheckResponse::available(format!(
            "Student ID {} is available for registration",
            student_id
        )))
    }

    /// Probes the registers for a case-insensitive name paired with an ID.
    ///
    /// Without a usable `student_id` the name alone blocks nothing; shared
    /// names are expected and only the (name, ID) pair identifies a person.
    #[instrument(skip(store))]
    pub async fn check_name(
        store: &dyn Store,
        name: &str,
        student_id: Option<&str>,
    ) -> Result<DuplicateCheckResponse, AppError> {
        if let Some(student_id) = student_id.filter(|id| !id.trim().is_empty()) {
            for category in StudentCategory::ALL {
                if store
                    .student_pair_exists(category, name, student_id)
                    .await?
                {
                    return Ok(DuplicateCheckResponse::found(
                        category.registration_type(),
                        None,
                        format!(
                            "Student '{}' with ID '{}' already registered {}",
                            name,
                            student_id,
                            category.registered_phrase()
                        ),
                    ));
                }
            }
        }

        Ok(DuplicateCheckResponse::available(format!(
            "Name {} is available for registration",
            name
        )))
    }
}
