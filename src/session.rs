use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::analysis::dto::AnalysisResult;
use crate::profile::dto::{UserId, UserRecord};

#[derive(Debug, Clone)]
pub struct StoredProfile {
    pub user: UserRecord,
    pub stored_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct StoredAnalysis {
    pub result: AnalysisResult,
    pub stored_at: OffsetDateTime,
}

/// State carried between screens for the lifetime of one flow. Holds at most
/// one profile and one analysis; a newer submission replaces the older one.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    profile: Option<StoredProfile>,
    analysis: Option<StoredAnalysis>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            profile: None,
            analysis: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store_profile(&mut self, user: UserRecord) {
        debug!(session = %self.id, user_id = %user.id, "profile stored");
        self.profile = Some(StoredProfile {
            user,
            stored_at: OffsetDateTime::now_utc(),
        });
    }

    pub fn profile(&self) -> Option<&StoredProfile> {
        self.profile.as_ref()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.profile.as_ref().map(|p| &p.user.id)
    }

    pub fn store_analysis(&mut self, result: AnalysisResult) {
        debug!(session = %self.id, "analysis stored");
        self.analysis = Some(StoredAnalysis {
            result,
            stored_at: OffsetDateTime::now_utc(),
        });
    }

    pub fn analysis(&self) -> Option<&StoredAnalysis> {
        self.analysis.as_ref()
    }

    pub fn clear(&mut self) {
        self.profile = None;
        self.analysis = None;
    }
}
