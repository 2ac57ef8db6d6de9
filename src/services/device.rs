// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User-Agent based device classification.

use serde::Serialize;
use std::fmt;

/// User-Agent fragments that indicate a GPS-equipped handheld.
const MOBILE_KEYWORDS: &[&str] = &[
    "mobile",
    "android",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "windows phone",
    "opera mini",
    "iemobile",
];

/// Device class used to pick a verification radius.
///
/// Desktops and unrecognized agents share one class since both locate
/// themselves through WiFi, which is far less precise than GPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceClass {
    Mobile,
    #[serde(rename = "PC")]
    Desktop,
}

impl DeviceClass {
    /// Classify a request from its User-Agent header, if any.
    pub fn classify(user_agent: Option<&str>) -> Self {
        let Some(ua) = user_agent else {
            return DeviceClass::Desktop;
        };
        let ua = ua.to_lowercase();
        if MOBILE_KEYWORDS.iter().any(|k| ua.contains(k)) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == DeviceClass::Mobile
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Mobile => f.write_str("Mobile"),
            DeviceClass::Desktop => f.write_str("PC"),
        }
    }
}
