//! Parsers for the build tool's line-oriented output

/// Max number of output lines to include in error messages.
const ERROR_TAIL_LINES: usize = 50;

/// Error message for a failed invocation: the error stream, or standard
/// output when the error stream is empty, trimmed to its last lines.
pub(crate) fn error_output(stdout: &str, stderr: &str) -> String {
    let source = if stderr.trim().is_empty() {
        stdout
    } else {
        stderr
    };
    let lines: Vec<&str> = source.lines().collect();
    let total = lines.len();
    let tail = if total > ERROR_TAIL_LINES {
        &lines[total - ERROR_TAIL_LINES..]
    } else {
        &lines[..]
    };
    tail.join("\n").trim().to_string()
}

/// Parse a listing printed under a dashed header, such as `sln list` or
/// `list reference`:
///
/// ```text
/// Project(s)
/// ----------
/// src/App/App.csproj
/// ```
///
/// Output without a header separator (e.g. "There are no Project to Project
/// references in project ...") yields an empty list.
pub fn parse_listing(stdout: &str) -> Vec<String> {
    let mut lines = stdout.lines();
    let found_separator = lines.by_ref().any(is_separator);
    if !found_separator {
        return Vec::new();
    }

    lines
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

/// Parse `list package` output. Package rows start with `>` after
/// indentation and carry the identifier as their first column:
///
/// ```text
/// Project 'App' has the following package references
///    [net8.0]:
///    Top-level Package      Requested   Resolved
///    > Newtonsoft.Json      13.0.1      13.0.1
/// ```
///
/// Multi-targeted projects list a package once per framework; identifiers
/// are deduplicated case-sensitively, keeping first-seen order.
pub fn parse_packages(stdout: &str) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();
    for line in stdout.lines() {
        let Some(row) = line.trim_start().strip_prefix('>') else {
            continue;
        };
        let Some(id) = row.split_whitespace().next() else {
            continue;
        };
        if !packages.iter().any(|p| p == id) {
            packages.push(id.to_string());
        }
    }
    packages
}

/// Extract the SDK version from `--version` output
pub fn parse_version(stdout: &str) -> Option<semver::Version> {
    let line = stdout.lines().map(str::trim).find(|l| !l.is_empty())?;
    semver::Version::parse(line).ok().or_else(|| {
        // Preview SDKs may print extra build metadata separated by spaces
        let first = line.split_whitespace().next()?;
        semver::Version::parse(first).ok()
    })
}
