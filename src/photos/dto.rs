use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PhotoAngle {
    Front,
    Side,
    Back,
}

impl PhotoAngle {
    pub const ALL: [PhotoAngle; 3] = [PhotoAngle::Front, PhotoAngle::Side, PhotoAngle::Back];

    pub fn key(self) -> &'static str {
        match self {
            PhotoAngle::Front => "front",
            PhotoAngle::Side => "side",
            PhotoAngle::Back => "back",
        }
    }
}

impl fmt::Display for PhotoAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PhotoAngle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "front" => Ok(PhotoAngle::Front),
            "side" => Ok(PhotoAngle::Side),
            "back" => Ok(PhotoAngle::Back),
            other => Err(format!("unknown photo angle '{}'", other)),
        }
    }
}

/// A captured or selected image.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRef {
    pub uri: String,
    pub content_type: &'static str,
    /// Raw bytes, present only when the image is sent inline.
    pub data: Option<Bytes>,
    pub captured_at: OffsetDateTime,
}

/// One slot per angle; a new image for an angle replaces the old one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoSet {
    front: Option<PhotoRef>,
    side: Option<PhotoRef>,
    back: Option<PhotoRef>,
}

impl PhotoSet {
    pub const TOTAL: usize = 3;

    fn slot_mut(&mut self, angle: PhotoAngle) -> &mut Option<PhotoRef> {
        match angle {
            PhotoAngle::Front => &mut self.front,
            PhotoAngle::Side => &mut self.side,
            PhotoAngle::Back => &mut self.back,
        }
    }

    pub fn get(&self, angle: PhotoAngle) -> Option<&PhotoRef> {
        match angle {
            PhotoAngle::Front => self.front.as_ref(),
            PhotoAngle::Side => self.side.as_ref(),
            PhotoAngle::Back => self.back.as_ref(),
        }
    }

    /// Stores `photo` under `angle`, returning the image it replaced.
    pub fn set(&mut self, angle: PhotoAngle, photo: PhotoRef) -> Option<PhotoRef> {
        self.slot_mut(angle).replace(photo)
    }

    pub fn count(&self) -> usize {
        self.filled().count()
    }

    pub fn is_complete(&self) -> bool {
        self.count() == Self::TOTAL
    }

    /// Filled slots in front, side, back order.
    pub fn filled(&self) -> impl Iterator<Item = (PhotoAngle, &PhotoRef)> {
        PhotoAngle::ALL
            .into_iter()
            .filter_map(move |a| self.get(a).map(|p| (a, p)))
    }
}
