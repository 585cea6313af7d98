use tracing::{debug, error, info, instrument, warn};

use super::dto::AnalysisRequest;
use crate::error::Result;
use crate::navigation::{Navigation, Stage};
use crate::photos::dto::PhotoSet;
use crate::photos::services::PhotoIntake;
use crate::prompt::{Decision, Prompt};
use crate::session::Session;
use crate::state::AppState;

pub const NO_PHOTOS_TITLE: &str = "No Photos";
pub const NO_PHOTOS_MESSAGE: &str = "Please upload at least one photo to continue";
pub const INCOMPLETE_TITLE: &str = "Incomplete Photos";
pub const CONTINUE_LABEL: &str = "Continue Anyway";
pub const ADD_MORE_LABEL: &str = "Add More Photos";
pub const FAILED_TITLE: &str = "Analysis Failed";
pub const FAILED_MESSAGE: &str = "There was an error analyzing your photos. Please try again.";
pub const ANALYZING_MESSAGE: &str = "Analyzing...";

pub fn incomplete_message(count: usize) -> String {
    format!(
        "You have uploaded {}/{} photos. For the best analysis, please upload all three angles (front, side, back).",
        count,
        PhotoSet::TOTAL
    )
}

/// Checks completeness, asks about partial sets, then sends the photos and
/// stored profile for analysis.
#[instrument(skip_all, fields(session = %session.id(), photos = intake.photos().count()))]
pub async fn trigger_analysis(
    st: &AppState,
    session: &mut Session,
    intake: &PhotoIntake,
    prompt: &dyn Prompt,
) -> Result<Navigation> {
    let count = intake.photos().count();
    if count == 0 {
        prompt.alert(NO_PHOTOS_TITLE, NO_PHOTOS_MESSAGE).await;
        return Ok(Navigation::Stay);
    }

    if count < PhotoSet::TOTAL {
        let decision = prompt
            .confirm(
                INCOMPLETE_TITLE,
                &incomplete_message(count),
                CONTINUE_LABEL,
                ADD_MORE_LABEL,
            )
            .await;
        if decision == Decision::GoBack {
            info!(count, "user chose to add more photos");
            return Ok(Navigation::Stay);
        }
    }

    proceed(st, session, intake.photos(), prompt).await
}

async fn proceed(
    st: &AppState,
    session: &mut Session,
    photos: &PhotoSet,
    prompt: &dyn Prompt,
) -> Result<Navigation> {
    let Some(stored) = session.profile().filter(|p| !p.user.id.is_blank()) else {
        warn!("no usable profile in session; back to onboarding");
        return Ok(Navigation::Redirect(Stage::Onboarding));
    };
    debug!(user_id = %stored.user.id, profile_stored_at = %stored.stored_at, "using stored profile");

    let req = AnalysisRequest::build(&stored.user, photos);
    prompt.notify(ANALYZING_MESSAGE).await;
    match st.api.analyze(&req).await {
        Ok(result) => {
            info!(user_id = %req.user_id, photos = req.photos.len(), "analysis received");
            session.store_analysis(result);
            Ok(Navigation::Goto(Stage::Results))
        }
        Err(e) => {
            error!(error = %e, "analysis failed");
            prompt.alert(FAILED_TITLE, FAILED_MESSAGE).await;
            Err(e)
        }
    }
}

#[cfg(test)]
mod trigger_tests {
    use super::*;
    use crate::analysis::dto::AnalysisResult;
    use crate::api::PhysiqueApi;
    use crate::config::AppConfig;
    use crate::error::FlowError;
    use crate::photos::dto::{PhotoAngle, PhotoRef};
    use crate::photos::source::{CaptureMode, ImageSource, Permissions};
    use crate::profile::dto::{CreateUserRequest, UserRecord};
    use crate::prompt::ScriptedPrompt;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use time::OffsetDateTime;

    #[derive(Default)]
    struct FakeApi {
        fail: bool,
        requests: Mutex<Vec<AnalysisRequest>>,
    }

    #[async_trait]
    impl PhysiqueApi for FakeApi {
        async fn create_user(&self, _: &CreateUserRequest) -> Result<UserRecord> {
            unreachable!("not used by analysis")
        }

        async fn analyze(&self, req: &AnalysisRequest) -> Result<AnalysisResult> {
            self.requests.lock().unwrap().push(req.clone());
            if self.fail {
                return Err(FlowError::Server { status: 503 });
            }
            Ok(AnalysisResult {
                bmi: Some(23.0),
                ..Default::default()
            })
        }
    }

    struct AlwaysPhoto;

    #[async_trait]
    impl ImageSource for AlwaysPhoto {
        async fn request_permissions(&self) -> Permissions {
            Permissions::GRANTED
        }
        async fn launch(&self, _: CaptureMode, angle: PhotoAngle) -> anyhow::Result<Option<PhotoRef>> {
            Ok(Some(PhotoRef {
                uri: format!("file:///{}.jpg", angle),
                content_type: "image/jpeg",
                data: None,
                captured_at: OffsetDateTime::UNIX_EPOCH,
            }))
        }
    }

    async fn intake_with(angles: &[PhotoAngle]) -> PhotoIntake {
        let prompt = ScriptedPrompt::answering(Decision::Proceed);
        let mut intake = PhotoIntake::new();
        for a in angles {
            intake
                .capture(&AlwaysPhoto, &prompt, *a, CaptureMode::Camera)
                .await
                .unwrap();
        }
        intake
    }

    fn setup(fail: bool) -> (Arc<FakeApi>, AppState, Session) {
        let api = Arc::new(FakeApi {
            fail,
            ..Default::default()
        });
        let st = AppState::from_parts(Arc::new(AppConfig::with_api_url("http://fake")), api.clone());
        let mut session = Session::new();
        session.store_profile(
            serde_json::from_value(serde_json::json!({"id": "u1", "age": 28})).unwrap(),
        );
        (api, st, session)
    }

    #[tokio::test]
    async fn no_photos_blocks_without_request() {
        let (api, st, mut session) = setup(false);
        let intake = PhotoIntake::new();
        let prompt = ScriptedPrompt::answering(Decision::Proceed);

        let nav = trigger_analysis(&st, &mut session, &intake, &prompt).await.unwrap();
        assert_eq!(nav, Navigation::Stay);
        assert!(api.requests.lock().unwrap().is_empty());
        assert_eq!(prompt.shown()[0].title, NO_PHOTOS_TITLE);
    }

    #[tokio::test]
    async fn partial_set_warns_and_can_go_back() {
        let (api, st, mut session) = setup(false);
        let intake = intake_with(&[PhotoAngle::Front, PhotoAngle::Side]).await;
        let prompt = ScriptedPrompt::answering(Decision::GoBack);

        let nav = trigger_analysis(&st, &mut session, &intake, &prompt).await.unwrap();
        assert_eq!(nav, Navigation::Stay);
        assert!(prompt.shown()[0].message.contains("2/3"));
        assert!(api.requests.lock().unwrap().is_empty());
        assert!(session.analysis().is_none());
    }

    #[tokio::test]
    async fn partial_set_can_continue_anyway() {
        let (api, st, mut session) = setup(false);
        let intake = intake_with(&[PhotoAngle::Back]).await;
        let prompt = ScriptedPrompt::answering(Decision::Proceed);

        let nav = trigger_analysis(&st, &mut session, &intake, &prompt).await.unwrap();
        assert_eq!(nav, Navigation::Goto(Stage::Results));
        assert!(prompt.shown()[0].message.contains("1/3"));
        let reqs = api.requests.lock().unwrap();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].photos.len(), 1);
    }

    #[tokio::test]
    async fn full_set_sends_once_without_asking() {
        let (api, st, mut session) = setup(false);
        let intake = intake_with(&PhotoAngle::ALL).await;
        let prompt = ScriptedPrompt::answering(Decision::GoBack);

        let nav = trigger_analysis(&st, &mut session, &intake, &prompt).await.unwrap();
        assert_eq!(nav, Navigation::Goto(Stage::Results));
        assert!(prompt.shown().is_empty());
        assert_eq!(api.requests.lock().unwrap()[0].photos.len(), 3);
        assert_eq!(session.analysis().unwrap().result.bmi, Some(23.0));
        assert_eq!(prompt.notices(), vec![ANALYZING_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn missing_profile_redirects_to_onboarding() {
        let (api, st, _) = setup(false);
        let mut session = Session::new();
        let intake = intake_with(&PhotoAngle::ALL).await;
        let prompt = ScriptedPrompt::answering(Decision::Proceed);

        let nav = trigger_analysis(&st, &mut session, &intake, &prompt).await.unwrap();
        assert_eq!(nav, Navigation::Redirect(Stage::Onboarding));
        assert!(api.requests.lock().unwrap().is_empty());
        assert!(prompt.notices().is_empty());
    }

    #[tokio::test]
    async fn blank_user_id_redirects_to_onboarding() {
        let (api, st, _) = setup(false);
        let intake = intake_with(&PhotoAngle::ALL).await;
        for id in [serde_json::json!(0), serde_json::json!("")] {
            let mut session = Session::new();
            session.store_profile(serde_json::from_value(serde_json::json!({"id": id})).unwrap());
            let prompt = ScriptedPrompt::answering(Decision::Proceed);

            let nav = trigger_analysis(&st, &mut session, &intake, &prompt).await.unwrap();
            assert_eq!(nav, Navigation::Redirect(Stage::Onboarding));
        }
        assert!(api.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_alerts_and_keeps_previous_state() {
        let (api, st, mut session) = setup(true);
        let intake = intake_with(&PhotoAngle::ALL).await;
        let prompt = ScriptedPrompt::answering(Decision::Proceed);

        let err = trigger_analysis(&st, &mut session, &intake, &prompt)
            .await
            .unwrap_err();
        assert!(err.is_remote());
        assert_eq!(api.requests.lock().unwrap().len(), 1);
        assert_eq!(prompt.shown()[0].title, FAILED_TITLE);
        assert!(session.analysis().is_none());
        assert_eq!(prompt.notices(), vec![ANALYZING_MESSAGE.to_string()]);
    }
}
