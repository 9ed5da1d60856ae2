//! Page layout handed to the document renderer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "Landscape",
            Self::Portrait => "Portrait",
        }
    }
}

const fn default_orientation() -> Orientation {
    Orientation::Landscape
}

fn default_size() -> String {
    "A4".to_string()
}

const fn default_vertical_margin_mm() -> u32 {
    15
}

const fn default_horizontal_margin_mm() -> u32 {
    10
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

const fn default_allow_local_file_access() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageConfig {
    #[serde(default = "default_orientation")]
    pub orientation: Orientation,

    #[serde(default = "default_size")]
    pub size: String,

    #[serde(default = "default_vertical_margin_mm")]
    pub margin_top_mm: u32,

    #[serde(default = "default_vertical_margin_mm")]
    pub margin_bottom_mm: u32,

    #[serde(default = "default_horizontal_margin_mm")]
    pub margin_left_mm: u32,

    #[serde(default = "default_horizontal_margin_mm")]
    pub margin_right_mm: u32,

    #[serde(default = "default_encoding")]
    pub encoding: String,

    #[serde(default = "default_allow_local_file_access")]
    pub allow_local_file_access: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            orientation: default_orientation(),
            size: default_size(),
            margin_top_mm: default_vertical_margin_mm(),
            margin_bottom_mm: default_vertical_margin_mm(),
            margin_left_mm: default_horizontal_margin_mm(),
            margin_right_mm: default_horizontal_margin_mm(),
            encoding: default_encoding(),
            allow_local_file_access: default_allow_local_file_access(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_certified_report_layout() {
        let page = PageConfig::default();
        assert_eq!(page.orientation, Orientation::Landscape);
        assert_eq!(page.size, "A4");
        assert_eq!((page.margin_top_mm, page.margin_bottom_mm), (15, 15));
        assert_eq!((page.margin_left_mm, page.margin_right_mm), (10, 10));
        assert_eq!(page.encoding, "utf-8");
        assert!(page.allow_local_file_access);
    }
}
