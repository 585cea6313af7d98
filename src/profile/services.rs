use tracing::{error, info, instrument, warn};

use super::dto::{CreateUserRequest, ProfileForm};
use super::validation::validate;
use crate::error::{FlowError, Result};
use crate::navigation::{Navigation, Stage};
use crate::session::Session;
use crate::state::AppState;

pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to create profile. Please try again.";

/// Validates the form, creates the user remotely and stores the returned
/// record. Nothing is sent when validation fails and nothing is stored when
/// the request fails.
#[instrument(skip(st, session, form), fields(session = %session.id(), units = ?form.units))]
pub async fn submit_profile(
    st: &AppState,
    session: &mut Session,
    form: &ProfileForm,
) -> Result<Navigation> {
    let profile = match validate(form) {
        Ok(p) => p,
        Err(errors) => {
            warn!(%errors, "profile rejected");
            return Err(FlowError::Validation(errors));
        }
    };

    let req = CreateUserRequest::from(&profile);
    let user = match st.api.create_user(&req).await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(e);
        }
    };

    info!(user_id = %user.id, "profile created");
    session.store_profile(user);
    Ok(Navigation::Goto(Stage::Upload))
}
