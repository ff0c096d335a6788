//! Build-time information
//!
//! Metadata captured by `build.rs` at compile time. Git fields are optional
//! because builds from a source tarball have no repository to query.

/// Build timestamp (when the binary was compiled)
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// Cargo optimization level (0, 1, 2, 3, s, z)
pub const CARGO_OPT_LEVEL: &str = env!("VERGEN_CARGO_OPT_LEVEL");

/// Target triple (e.g., x86_64-unknown-linux-gnu, x86_64-apple-darwin)
pub const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

/// Rust compiler version (e.g., 1.75.0)
pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// Rust channel (stable, beta, or nightly)
pub const RUSTC_CHANNEL: &str = env!("VERGEN_RUSTC_CHANNEL");

/// Value vergen-gitcl emits for every git variable when no repository is found
const IDEMPOTENT_PLACEHOLDER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

/// Full git commit SHA as emitted by the build script
pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

/// Git branch name as emitted by the build script
pub const GIT_BRANCH: Option<&str> = option_env!("VERGEN_GIT_BRANCH");

/// Whether the working tree had uncommitted changes ("true"/"false")
pub const GIT_DIRTY: Option<&str> = option_env!("VERGEN_GIT_DIRTY");

/// Treats an unset, empty or placeholder git variable as missing
fn git_field(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|v| !v.is_empty() && !v.starts_with(IDEMPOTENT_PLACEHOLDER))
}

/// Full commit SHA, or `None` when built outside a git checkout
pub fn git_sha() -> Option<&'static str> {
    git_field(GIT_SHA)
}

/// Branch name, or `None` when built outside a git checkout
pub fn git_branch() -> Option<&'static str> {
    git_field(GIT_BRANCH)
}

/// First 7 characters of the commit SHA, or "unknown"
pub fn git_sha_short() -> &'static str {
    match git_sha() {
        Some(sha) if sha.len() >= 7 => &sha[..7],
        Some(sha) => sha,
        None => "unknown",
    }
}

/// Returns true if the build came from a dirty working tree
pub fn is_git_dirty() -> bool {
    git_field(GIT_DIRTY) == Some("true")
}

/// Returns a formatted build version string
///
/// Format: `{version}+{sha}-{target_triple}-opt{opt_level}`
pub fn version_string() -> String {
    format!(
        "{}+{}-{}-opt{}",
        env!("CARGO_PKG_VERSION"),
        git_sha_short(),
        CARGO_TARGET_TRIPLE,
        CARGO_OPT_LEVEL
    )
}

/// Returns a detailed build info string
pub fn detailed_info() -> String {
    format!(
        "Built: {}\nTarget: {}\nOptimization: {}\nRustc: {} ({})\nGit: {}@{}",
        BUILD_TIMESTAMP,
        CARGO_TARGET_TRIPLE,
        CARGO_OPT_LEVEL,
        RUSTC_SEMVER,
        RUSTC_CHANNEL,
        git_branch().unwrap_or("unknown"),
        git_sha_short()
    )
}
