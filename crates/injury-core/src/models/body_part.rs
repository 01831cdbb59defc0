// ABOUTME: Selectable body regions for injury reports
// ABOUTME: Maps snake_case region ids to display names and back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// A selectable body region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    /// Head
    Head,
    /// Neck
    Neck,
    /// Chest
    Chest,
    /// Stomach
    Stomach,
    /// Left shoulder
    LeftShoulder,
    /// Left upper arm
    LeftUpperArm,
    /// Left elbow
    LeftElbow,
    /// Left forearm
    LeftForearm,
    /// Left wrist
    LeftWrist,
    /// Left hand
    LeftHand,
    /// Right shoulder
    RightShoulder,
    /// Right upper arm
    RightUpperArm,
    /// Right elbow
    RightElbow,
    /// Right forearm
    RightForearm,
    /// Right wrist
    RightWrist,
    /// Right hand
    RightHand,
    /// Left hip
    LeftHip,
    /// Left thigh
    LeftThigh,
    /// Left knee
    LeftKnee,
    /// Left calf
    LeftCalf,
    /// Left ankle
    LeftAnkle,
    /// Left foot
    LeftFoot,
    /// Right hip
    RightHip,
    /// Right thigh
    RightThigh,
    /// Right knee
    RightKnee,
    /// Right calf
    RightCalf,
    /// Right ankle
    RightAnkle,
    /// Right foot
    RightFoot,
}

impl BodyPart {
    /// Every selectable region, head to foot
    pub const ALL: [Self; 28] = [
        Self::Head,
        Self::Neck,
        Self::Chest,
        Self::Stomach,
        Self::LeftShoulder,
        Self::LeftUpperArm,
        Self::LeftElbow,
        Self::LeftForearm,
        Self::LeftWrist,
        Self::LeftHand,
        Self::RightShoulder,
        Self::RightUpperArm,
        Self::RightElbow,
        Self::RightForearm,
        Self::RightWrist,
        Self::RightHand,
        Self::LeftHip,
        Self::LeftThigh,
        Self::LeftKnee,
        Self::LeftCalf,
        Self::LeftAnkle,
        Self::LeftFoot,
        Self::RightHip,
        Self::RightThigh,
        Self::RightKnee,
        Self::RightCalf,
        Self::RightAnkle,
        Self::RightFoot,
    ];

    /// The snake_case identifier, e.g. `left_elbow`
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Neck => "neck",
            Self::Chest => "chest",
            Self::Stomach => "stomach",
            Self::LeftShoulder => "left_shoulder",
            Self::LeftUpperArm => "left_upper_arm",
            Self::LeftElbow => "left_elbow",
            Self::LeftForearm => "left_forearm",
            Self::LeftWrist => "left_wrist",
            Self::LeftHand => "left_hand",
            Self::RightShoulder => "right_shoulder",
            Self::RightUpperArm => "right_upper_arm",
            Self::RightElbow => "right_elbow",
            Self::RightForearm => "right_forearm",
            Self::RightWrist => "right_wrist",
            Self::RightHand => "right_hand",
            Self::LeftHip => "left_hip",
            Self::LeftThigh => "left_thigh",
            Self::LeftKnee => "left_knee",
            Self::LeftCalf => "left_calf",
            Self::LeftAnkle => "left_ankle",
            Self::LeftFoot => "left_foot",
            Self::RightHip => "right_hip",
            Self::RightThigh => "right_thigh",
            Self::RightKnee => "right_knee",
            Self::RightCalf => "right_calf",
            Self::RightAnkle => "right_ankle",
            Self::RightFoot => "right_foot",
        }
    }

    /// Title-cased display name, e.g. `Left Elbow`
    #[must_use]
    pub fn display_name(&self) -> String {
        self.id()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Reverse lookup from a display name; `None` when unknown
    #[must_use]
    pub fn from_display_name(display_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|part| part.display_name() == display_name)
    }

    /// Join several regions into the display text stored on an injury
    #[must_use]
    pub fn join_display_names(parts: &[Self]) -> String {
        parts
            .iter()
            .map(Self::display_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl FromStr for BodyPart {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|part| part.id() == s)
            .or_else(|| Self::from_display_name(s))
            .ok_or_else(|| AppError::invalid_input(format!("Unknown body part: {s}")))
    }
}
