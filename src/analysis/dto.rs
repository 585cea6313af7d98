use base64ct::{Base64, Encoding};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::photos::dto::{PhotoAngle, PhotoRef, PhotoSet};
use crate::profile::dto::{UserId, UserRecord};

#[derive(Debug, Clone, Serialize)]
pub struct PhotoPayload {
    #[serde(rename = "type")]
    pub angle: PhotoAngle,
    pub uri: String,
    pub base64: Option<String>,
}

impl PhotoPayload {
    pub fn new(angle: PhotoAngle, photo: &PhotoRef) -> Self {
        Self {
            angle,
            uri: photo.uri.clone(),
            base64: photo.data.as_ref().map(|b| Base64::encode_string(b)),
        }
    }
}

/// Biometrics as the server returned them at profile creation.
#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<Value>,
}

impl From<&UserRecord> for UserData {
    fn from(u: &UserRecord) -> Self {
        Self {
            age: u.age.clone(),
            height_cm: u.height_cm.clone(),
            weight_kg: u.weight_kg.clone(),
            activity_level: u.activity_level.clone(),
        }
    }
}

/// Request body for `POST /api/analysis`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub user_id: UserId,
    pub photos: Vec<PhotoPayload>,
    pub user_data: UserData,
}

impl AnalysisRequest {
    pub fn build(user: &UserRecord, photos: &PhotoSet) -> Self {
        Self {
            user_id: user.id.clone(),
            photos: photos
                .filled()
                .map(|(angle, p)| PhotoPayload::new(angle, p))
                .collect(),
            user_data: UserData::from(user),
        }
    }
}

/// A value of the wrong shape reads as missing.
fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Numbers may also arrive as numeric strings (`"24.1"`).
fn lenient_number<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Value>::deserialize(de)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// Server-computed analysis. Every field may be missing or malformed; either
/// way the field is `None` and the rest of the record still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient")]
    pub ai_roast: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bmi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub body_fat_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bmr: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub strengths: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub improvements: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Response body: fields either nested under `analysis` or at the top level.
#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisEnvelope {
    #[serde(default, deserialize_with = "lenient")]
    analysis: Option<AnalysisResult>,
    #[serde(flatten)]
    top: AnalysisResult,
}

impl AnalysisEnvelope {
    pub(crate) fn into_result(self) -> AnalysisResult {
        self.analysis.unwrap_or(self.top)
    }
}

#[cfg(test)]
mod dto_tests {
    use super::*;
    use bytes::Bytes;
    use serde_json::json;
    use time::OffsetDateTime;

    fn photo(data: Option<&'static [u8]>) -> PhotoRef {
        PhotoRef {
            uri: "file:///x.jpg".into(),
            content_type: "image/jpeg",
            data: data.map(Bytes::from_static),
            captured_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn payload_encodes_inline_bytes_or_null() {
        let with = serde_json::to_value(PhotoPayload::new(PhotoAngle::Front, &photo(Some(b"hi"))))
            .unwrap();
        assert_eq!(with, json!({"type": "front", "uri": "file:///x.jpg", "base64": "aGk="}));
        let without =
            serde_json::to_value(PhotoPayload::new(PhotoAngle::Back, &photo(None))).unwrap();
        assert_eq!(without["base64"], serde_json::Value::Null);
    }

    #[test]
    fn request_uses_server_record_and_skips_unknown_fields() {
        let user: UserRecord =
            serde_json::from_value(json!({"id": 9, "age": 30, "height_cm": 180.0})).unwrap();
        let mut set = PhotoSet::default();
        set.set(PhotoAngle::Side, photo(None));
        let body = serde_json::to_value(AnalysisRequest::build(&user, &set)).unwrap();
        assert_eq!(body["user_id"], 9);
        assert_eq!(body["user_data"], json!({"age": 30, "height_cm": 180.0}));
        assert_eq!(body["photos"].as_array().unwrap().len(), 1);
        assert_eq!(body["photos"][0]["type"], "side");
    }

    #[test]
    fn envelope_prefers_nested_analysis() {
        let nested: AnalysisEnvelope =
            serde_json::from_value(json!({"id": 1, "analysis": {"bmi": 22.5}})).unwrap();
        assert_eq!(nested.into_result().bmi, Some(22.5));

        let flat: AnalysisEnvelope =
            serde_json::from_value(json!({"bmr": 1700.0, "strengths": ["legs"]})).unwrap();
        let r = flat.into_result();
        assert_eq!(r.bmr, Some(1700.0));
        assert_eq!(r.strengths, Some(vec!["legs".to_string()]));
        assert_eq!(r.bmi, None);
    }

    #[test]
    fn user_data_echoes_string_numerics_verbatim() {
        let user: UserRecord = serde_json::from_value(
            json!({"id": 5, "age": "29", "height_cm": "180.00", "weight_kg": 78}),
        )
        .unwrap();
        let body = serde_json::to_value(AnalysisRequest::build(&user, &PhotoSet::default())).unwrap();
        assert_eq!(
            body["user_data"],
            json!({"age": "29", "height_cm": "180.00", "weight_kg": 78})
        );
    }

    #[test]
    fn malformed_fields_do_not_sink_the_record() {
        let r = serde_json::from_value::<AnalysisEnvelope>(json!({
            "analysis": {
                "bmi": "24.1",
                "body_fat_percentage": "lean",
                "bmr": {"value": 1700},
                "ai_roast": 42,
                "strengths": ["Posture", 3],
                "improvements": ["Core"]
            }
        }))
        .unwrap()
        .into_result();
        assert_eq!(r.bmi, Some(24.1));
        assert_eq!(r.body_fat_percentage, None);
        assert_eq!(r.bmr, None);
        assert_eq!(r.ai_roast, None);
        assert_eq!(r.strengths, None);
        assert_eq!(r.improvements, Some(vec!["Core".to_string()]));
    }

    #[test]
    fn non_object_analysis_falls_back_to_top_level() {
        let r = serde_json::from_value::<AnalysisEnvelope>(json!({"analysis": "pending", "bmr": 1600}))
            .unwrap()
            .into_result();
        assert_eq!(r.bmr, Some(1600.0));
    }

    #[test]
    fn null_fields_read_as_missing() {
        let r: AnalysisResult =
            serde_json::from_value(json!({"bmi": null, "ai_roast": null})).unwrap();
        assert_eq!(r.bmi, None);
        assert_eq!(r.ai_roast, None);
    }
}
