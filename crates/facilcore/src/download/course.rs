//! Course structure and its expansion into download tasks.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::core::utils::escape_filename;

/// A section of a course: ordered video page URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRef {
    pub title: String,
    pub videos_url: Vec<String>,
}

/// A resolved course. Section order and video order are significant: they
/// become the numeric prefixes of the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRef {
    pub title: String,
    pub sections: Vec<SectionRef>,
}

impl CourseRef {
    /// Total number of videos across all sections
    pub fn video_count(&self) -> usize {
        self.sections.iter().map(|s| s.videos_url.len()).sum()
    }

    /// Plain-text table of sections and their video counts
    pub fn summary_table(&self) -> String {
        let header = "Section";
        let width = self
            .sections
            .iter()
            .map(|s| s.title.chars().count())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(header.len());

        let mut table = String::new();
        let _ = writeln!(table, "{}", self.title);
        let _ = writeln!(table, "{:<width$}  Videos", header);
        let _ = writeln!(table, "{}  ------", "-".repeat(width));
        for section in &self.sections {
            let _ = writeln!(table, "{:<width$}  {:>6}", section.title, section.videos_url.len());
        }
        table
    }
}

/// One concrete video download.
///
/// Course tasks carry 1-based section/video indices; a standalone video has
/// none and lands directly in the downloads root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub section_index: Option<usize>,
    pub section_title: Option<String>,
    pub video_index: Option<usize>,
    pub video_url: String,
    pub target_directory: PathBuf,
    pub filename_prefix: String,
}

impl DownloadTask {
    /// Task for a video entry of the URL list
    pub fn standalone(video_url: impl Into<String>, downloads_root: &Path) -> Self {
        Self {
            section_index: None,
            section_title: None,
            video_index: None,
            video_url: video_url.into(),
            target_directory: downloads_root.to_path_buf(),
            filename_prefix: String::new(),
        }
    }
}

/// `<NN>. <title>` directory name of a section
pub fn section_dir_name(index: usize, title: &str) -> String {
    format!("{:02}. {}", index, title)
}

/// `<NN>. ` filename prefix of a video
pub fn video_prefix(index: usize) -> String {
    format!("{:02}. ", index)
}

/// Flattens a course into ordered tasks.
///
/// Layout: `<root>/<course title>/<NN>. <section title>/<NN>. <video>`.
/// Numbering restarts at 1 in every section and empty sections still take
/// their index, they just emit no task.
pub fn expand_course(course: &CourseRef, downloads_root: &Path) -> Vec<DownloadTask> {
    let course_dir = downloads_root.join(escape_filename(&course.title));

    course
        .sections
        .iter()
        .enumerate()
        .flat_map(|(s_idx, section)| {
            let section_index = s_idx + 1;
            let section_title = escape_filename(&section.title);
            let section_dir = course_dir.join(section_dir_name(section_index, &section_title));

            section
                .videos_url
                .iter()
                .enumerate()
                .map(move |(v_idx, url)| DownloadTask {
                    section_index: Some(section_index),
                    section_title: Some(section_title.clone()),
                    video_index: Some(v_idx + 1),
                    video_url: url.clone(),
                    target_directory: section_dir.clone(),
                    filename_prefix: video_prefix(v_idx + 1),
                })
        })
        .collect()
}
