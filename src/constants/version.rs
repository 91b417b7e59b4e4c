use semver::Version;

static UNKNOWN_SHA: &str = "VERGEN_IDEMPOTENT_OUTPUT";

pub fn get_version() -> String {
    let semver = match env!("CARGO_PKG_VERSION").parse::<Version>() {
        Ok(semver) => semver,
        Err(e) => {
            tracing::warn!(err = ?e, "couldn't parse a semver out of Cargo.toml? defaulting to 0.0.0-unknown.");
            return String::from("0.0.0-unknown");
        }
    };

    format_version(&semver, env!("VERGEN_GIT_SHA"), env!("VERGEN_GIT_DIRTY") == "true")
}

fn format_version(semver: &Version, sha: &str, dirty: bool) -> String {
    if sha == UNKNOWN_SHA || sha.is_empty() {
        return semver.to_string();
    }

    let short = &sha[..sha.len().min(7)];
    let dirty = if dirty { "-dirty" } else { "" };

    format!("{semver} [`{short}{dirty}`]")
}
