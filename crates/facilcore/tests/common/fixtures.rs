//! Test fixtures: URLs, courses and a temporary working directory

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

use facilcore::core::retry::RetryPolicy;
use facilcore::download::{CourseRef, Quality, SectionRef};
use facilcore::BatchConfig;

pub fn video_url(slug: &str) -> String {
    format!("https://codigofacilito.com/videos/{}", slug)
}

pub fn course_url(slug: &str) -> String {
    format!("https://codigofacilito.com/cursos/{}", slug)
}

/// Course whose sections hold `counts[i]` videos each, slugs `<section>-<n>`
pub fn course(title: &str, sections: &[(&str, usize)]) -> CourseRef {
    CourseRef {
        title: title.to_string(),
        sections: sections
            .iter()
            .map(|(name, n)| SectionRef {
                title: name.to_string(),
                videos_url: (1..=*n).map(|i| video_url(&format!("{}-{}", name, i))).collect(),
            })
            .collect(),
    }
}

pub fn test_config() -> BatchConfig {
    BatchConfig::new("/dl", Quality::P720).with_retry(RetryPolicy::new().max_attempts(5))
}

/// Temporary directory holding the run's input files
pub struct TestEnvironment {
    pub dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes `urls.txt` and returns its path
    pub fn write_urls(&self, urls: &[&str]) -> PathBuf {
        let path = self.path("urls.txt");
        std::fs::write(&path, urls.join("\n")).expect("write urls");
        path
    }

    /// Writes `cookies.json` and returns its path
    pub fn write_cookies(&self, json: &str) -> PathBuf {
        let path = self.path("cookies.json");
        std::fs::write(&path, json).expect("write cookies");
        path
    }
}
