//! Body landmarks in pixel coordinates
//!
//! Points follow image conventions: x grows to the right, y grows downwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body points the game cares about, with their MediaPipe Pose index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPoint {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPoint {
    pub fn all() -> &'static [BodyPoint] {
        &[
            BodyPoint::Nose,
            BodyPoint::LeftShoulder,
            BodyPoint::RightShoulder,
            BodyPoint::LeftElbow,
            BodyPoint::RightElbow,
            BodyPoint::LeftWrist,
            BodyPoint::RightWrist,
            BodyPoint::LeftHip,
            BodyPoint::RightHip,
            BodyPoint::LeftKnee,
            BodyPoint::RightKnee,
            BodyPoint::LeftAnkle,
            BodyPoint::RightAnkle,
        ]
    }

    pub fn mediapipe_index(&self) -> usize {
        match self {
            BodyPoint::Nose => 0,
            BodyPoint::LeftShoulder => 11,
            BodyPoint::RightShoulder => 12,
            BodyPoint::LeftElbow => 13,
            BodyPoint::RightElbow => 14,
            BodyPoint::LeftWrist => 15,
            BodyPoint::RightWrist => 16,
            BodyPoint::LeftHip => 23,
            BodyPoint::RightHip => 24,
            BodyPoint::LeftKnee => 25,
            BodyPoint::RightKnee => 26,
            BodyPoint::LeftAnkle => 27,
            BodyPoint::RightAnkle => 28,
        }
    }

    /// Same point on the other side of the body
    pub fn mirror(&self) -> BodyPoint {
        match self {
            BodyPoint::Nose => BodyPoint::Nose,
            BodyPoint::LeftShoulder => BodyPoint::RightShoulder,
            BodyPoint::RightShoulder => BodyPoint::LeftShoulder,
            BodyPoint::LeftElbow => BodyPoint::RightElbow,
            BodyPoint::RightElbow => BodyPoint::LeftElbow,
            BodyPoint::LeftWrist => BodyPoint::RightWrist,
            BodyPoint::RightWrist => BodyPoint::LeftWrist,
            BodyPoint::LeftHip => BodyPoint::RightHip,
            BodyPoint::RightHip => BodyPoint::LeftHip,
            BodyPoint::LeftKnee => BodyPoint::RightKnee,
            BodyPoint::RightKnee => BodyPoint::LeftKnee,
            BodyPoint::LeftAnkle => BodyPoint::RightAnkle,
            BodyPoint::RightAnkle => BodyPoint::LeftAnkle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One estimator result: pixel positions of the detected body points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub points: BTreeMap<BodyPoint, Point2>,
}

impl LandmarkFrame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            points: BTreeMap::new(),
        }
    }

    pub fn with_point(mut self, point: BodyPoint, x: f32, y: f32) -> Self {
        self.points.insert(point, Point2::new(x, y));
        self
    }

    pub fn get(&self, point: BodyPoint) -> Option<Point2> {
        self.points.get(&point).copied()
    }

    /// Build from an estimator's normalised output listed in MediaPipe
    /// order (`[0, 1]` per axis); indices past the end are left out.
    pub fn from_normalized(landmarks: &[(f32, f32)], width: f32, height: f32) -> Self {
        let mut frame = Self::new(width, height);
        for &point in BodyPoint::all() {
            if let Some(&(x, y)) = landmarks.get(point.mediapipe_index()) {
                frame.points.insert(point, Point2::new(x * width, y * height));
            }
        }
        frame
    }

    /// Horizontal flip about the frame centre, as for a selfie camera view.
    /// Left and right identities swap along with the coordinates.
    pub fn mirrored(&self) -> Self {
        let points = self
            .points
            .iter()
            .map(|(point, p)| (point.mirror(), Point2::new(self.width - p.x, p.y)))
            .collect();
        Self {
            width: self.width,
            height: self.height,
            points,
        }
    }
}
