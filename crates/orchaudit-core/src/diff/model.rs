//! Version diff output types.

use crate::version::VersionOrdering;
use serde::{Deserialize, Serialize};

/// Which snapshot holds the newer image, as reported to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MostRecent {
    #[serde(rename = "image_version_file_1")]
    ImageVersionFile1,
    #[serde(rename = "image_version_file_2")]
    ImageVersionFile2,
    #[serde(rename = "unknown")]
    Unknown,
}

impl MostRecent {
    /// Label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            MostRecent::ImageVersionFile1 => "image_version_file_1",
            MostRecent::ImageVersionFile2 => "image_version_file_2",
            MostRecent::Unknown => "unknown",
        }
    }
}

impl From<VersionOrdering> for MostRecent {
    fn from(ord: VersionOrdering) -> Self {
        match ord {
            VersionOrdering::FileOneNewer => MostRecent::ImageVersionFile1,
            VersionOrdering::FileTwoNewer => MostRecent::ImageVersionFile2,
            VersionOrdering::Unknown => MostRecent::Unknown,
        }
    }
}

/// One application whose image changed between the two snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionDiffEntry {
    /// Application `id`
    pub application: String,
    /// Full image reference in snapshot 1
    pub image_version_file_1: String,
    /// Full image reference in snapshot 2
    pub image_version_file_2: String,
    pub most_recent: MostRecent,
}
