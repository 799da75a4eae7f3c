//! Download management: everything between the URL list and the platform client

pub mod batch;
pub mod classify;
pub mod client;
pub mod cookies;
pub mod course;
pub mod executor;
pub mod quality;
pub mod report;
pub mod urls;
pub mod ytdlp;

// Re-exports for convenience
pub use batch::{run_batch, BatchSummary};
pub use classify::{classify_url, UrlKind};
pub use client::{PlatformClient, VideoRef};
pub use cookies::{load_cookies, CookieRecord};
pub use course::{expand_course, CourseRef, DownloadTask, SectionRef};
pub use executor::{execute_task, FailureReason, TaskOutcome};
pub use quality::Quality;
pub use report::{ConsoleReporter, Confirmer, DialoguerConfirmer, ReportContext, ReportKind, Reporter};
pub use urls::load_urls;
pub use ytdlp::YtDlpClient;
