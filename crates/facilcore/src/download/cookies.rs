//! Session cookies
//!
//! This module provides functionality to:
//! - Read the JSON cookie file and install every record into the client session
//! - Parse browser-exported Netscape cookie files
//! - Convert a Netscape export into the JSON cookie file

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{AppError, AppResult};
use crate::download::client::PlatformClient;
use crate::download::report::{ReportContext, ReportKind, Reporter};

fn default_path() -> String {
    "/".to_string()
}

/// One entry of the JSON cookie file.
///
/// Unknown fields (`flag`, `expiration` written by the converter) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
}

/// Parses the JSON cookie array.
pub fn parse_cookie_records(json: &str) -> AppResult<Vec<CookieRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses the JSON cookie file.
pub fn read_cookie_records(path: &Path) -> AppResult<Vec<CookieRecord>> {
    let json = fs_err::read_to_string(path)?;
    parse_cookie_records(&json)
}

/// Installs every cookie from `path` into the client session.
///
/// A missing or malformed file is reported and nothing is installed: the run
/// goes on unauthenticated. Returns the number of installed cookies.
pub fn load_cookies<C: PlatformClient + ?Sized>(path: &Path, client: &mut C, reporter: &mut dyn Reporter) -> usize {
    let records = match read_cookie_records(path) {
        Ok(records) => records,
        Err(e) => {
            reporter.report(
                ReportKind::Failure,
                &format!("Error loading cookies: {}", e),
                &ReportContext::default(),
            );
            return 0;
        }
    };

    for record in &records {
        client.install_cookie(record);
    }

    log::info!("Installed {} cookies from {}", records.len(), path.display());
    reporter.report(ReportKind::Success, "Cookies loaded.", &ReportContext::default());
    records.len()
}

/// Cookie parsed from a browser Netscape export (`cookies.txt`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetscapeCookie {
    pub domain: String,
    /// Whether the cookie applies to subdomains
    pub flag: bool,
    pub path: String,
    pub secure: bool,
    /// Unix timestamp; `None` when the field is not a plain number
    pub expiration: Option<i64>,
    pub name: String,
    pub value: String,
}

impl NetscapeCookie {
    /// Serializes back to a Netscape line (no trailing newline).
    pub fn to_netscape_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.domain,
            if self.flag { "TRUE" } else { "FALSE" },
            self.path,
            if self.secure { "TRUE" } else { "FALSE" },
            self.expiration.unwrap_or(0),
            self.name,
            self.value
        )
    }
}

impl From<&CookieRecord> for NetscapeCookie {
    fn from(record: &CookieRecord) -> Self {
        Self {
            flag: record.domain.starts_with('.'),
            domain: record.domain.clone(),
            path: record.path.clone(),
            secure: record.secure,
            expiration: None,
            name: record.name.clone(),
            value: record.value.clone(),
        }
    }
}

impl From<NetscapeCookie> for CookieRecord {
    fn from(cookie: NetscapeCookie) -> Self {
        Self {
            name: cookie.name,
            value: cookie.value,
            domain: cookie.domain,
            path: cookie.path,
            secure: cookie.secure,
        }
    }
}

/// Parses one line of a Netscape cookie file.
///
/// Comment lines (`#`), blank lines and lines without exactly seven
/// tab-separated fields yield `None`.
pub fn parse_netscape_line(line: &str) -> Option<NetscapeCookie> {
    if line.starts_with('#') || line.trim().is_empty() {
        return None;
    }

    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() != 7 {
        return None;
    }

    let expiration = if !parts[4].is_empty() && parts[4].bytes().all(|b| b.is_ascii_digit()) {
        parts[4].parse().ok()
    } else {
        None
    };

    Some(NetscapeCookie {
        domain: parts[0].to_string(),
        flag: parts[1] == "TRUE",
        path: parts[2].to_string(),
        secure: parts[3] == "TRUE",
        expiration,
        name: parts[5].to_string(),
        value: parts[6].trim().to_string(),
    })
}

/// Parses a whole Netscape cookie file, keeping line order.
pub fn parse_netscape_cookies(content: &str) -> Vec<NetscapeCookie> {
    content.lines().filter_map(parse_netscape_line).collect()
}

/// Renders cookies as a 4-space-indented JSON array.
pub fn netscape_to_json(cookies: &[NetscapeCookie]) -> AppResult<String> {
    use serde_json::ser::{PrettyFormatter, Serializer};

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    cookies.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| AppError::Validation(e.to_string()))
}

/// Converts a Netscape export at `input` into the JSON cookie file at `output`.
///
/// Returns the number of converted cookies.
pub fn convert_netscape_file(input: &Path, output: &Path) -> AppResult<usize> {
    let content = fs_err::read_to_string(input)?;
    let cookies = parse_netscape_cookies(&content);
    fs_err::write(output, netscape_to_json(&cookies)?)?;
    Ok(cookies.len())
}
