//! Output resolution tiers

use clap::ValueEnum;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Requested output resolution, chosen once per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Display, EnumString, AsRefStr, EnumIter)]
pub enum Quality {
    /// Best available
    #[value(name = "max")]
    #[strum(serialize = "max")]
    Max,
    #[value(name = "1080p")]
    #[strum(serialize = "1080p")]
    P1080,
    #[default]
    #[value(name = "720p")]
    #[strum(serialize = "720p")]
    P720,
    #[value(name = "480p")]
    #[strum(serialize = "480p")]
    P480,
    #[value(name = "360p")]
    #[strum(serialize = "360p")]
    P360,
    /// Smallest available
    #[value(name = "min")]
    #[strum(serialize = "min")]
    Min,
}

impl Quality {
    /// Maximum frame height for the tier, `None` for `max`/`min`
    pub fn height(self) -> Option<u32> {
        match self {
            Quality::Max | Quality::Min => None,
            Quality::P1080 => Some(1080),
            Quality::P720 => Some(720),
            Quality::P480 => Some(480),
            Quality::P360 => Some(360),
        }
    }

    /// yt-dlp `-f` format selector for the tier
    pub fn format_selector(self) -> String {
        match self {
            Quality::Max => "bv*+ba/b".to_string(),
            Quality::Min => "wv*+wa/w".to_string(),
            q => {
                let h = q.height().unwrap_or(720);
                format!("bv*[height<={h}]+ba/b[height<={h}]")
            }
        }
    }
}
