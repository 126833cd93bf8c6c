//! Build metadata captured by `build.rs`

/// When the binary was compiled
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// Cargo optimization level (0, 1, 2, 3, s, z)
pub const CARGO_OPT_LEVEL: &str = env!("VERGEN_CARGO_OPT_LEVEL");

/// Target triple (e.g. x86_64-unknown-linux-gnu)
pub const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// stable, beta or nightly
pub const RUSTC_CHANNEL: &str = env!("VERGEN_RUSTC_CHANNEL");

// Git values are absent when building outside a checkout
pub const GIT_SHA: &str = or_unknown(option_env!("VERGEN_GIT_SHA"));
pub const GIT_BRANCH: &str = or_unknown(option_env!("VERGEN_GIT_BRANCH"));
pub const GIT_COMMIT_TIMESTAMP: &str = or_unknown(option_env!("VERGEN_GIT_COMMIT_TIMESTAMP"));
pub const GIT_DIRTY: &str = or_unknown(option_env!("VERGEN_GIT_DIRTY"));

/// Native bundle selected for the compilation target
pub const NATIVE_BUNDLE: &str = env!("CUBEGL_NATIVE_BUNDLE");

const fn or_unknown(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) => value,
        None => "unknown",
    }
}

/// First 7 characters of the commit SHA
pub fn git_sha_short() -> &'static str {
    GIT_SHA.get(..7).unwrap_or(GIT_SHA)
}

pub fn is_git_dirty() -> bool {
    GIT_DIRTY == "true"
}

/// `{crate version}+{sha}` with a `-dirty` suffix for modified trees
pub fn version_string() -> String {
    let dirty = if is_git_dirty() { "-dirty" } else { "" };
    format!(
        "{}+{}{} ({}-opt{})",
        env!("CARGO_PKG_VERSION"),
        git_sha_short(),
        dirty,
        CARGO_TARGET_TRIPLE,
        CARGO_OPT_LEVEL
    )
}

pub fn detailed_info() -> String {
    format!(
        "Version: {}\nGit: {}@{} ({})\nBuilt: {}\nTarget: {} ({})\nRustc: {} ({})",
        env!("CARGO_PKG_VERSION"),
        GIT_BRANCH,
        git_sha_short(),
        GIT_COMMIT_TIMESTAMP,
        BUILD_TIMESTAMP,
        CARGO_TARGET_TRIPLE,
        NATIVE_BUNDLE,
        RUSTC_SEMVER,
        RUSTC_CHANNEL
    )
}
