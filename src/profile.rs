//! Profile resolution for cadence commands.
//!
//! Every command that touches leads operates within one profile: one
//! audience being worked, with its own database (e.g. `trainers`,
//! `event-planners`). Rather than requiring `--profile` on every
//! invocation, the profile is resolved through a chain:
//!
//! 1. `--profile <name>` — explicit per-command override
//! 2. `CADENCE_PROFILE` env var — process/session level
//! 3. `~/.cadence/config.toml` — global default for single-audience users

use std::env;

use crate::config::Config;

/// Error message shown when no profile can be resolved.
pub const PROFILE_REQUIRED: &str = "profile required: pass --profile <name>, \
    set CADENCE_PROFILE, or add `profile = \"...\"` to ~/.cadence/config.toml";

/// Resolve the working profile from the tiered resolution chain.
///
/// Checks in order: explicit `--profile` value, `CADENCE_PROFILE` env var,
/// the loaded config. Returns an error with [`PROFILE_REQUIRED`] when none
/// of the sources yield a value.
pub fn resolve_profile(explicit: Option<&str>, config: &Config) -> Result<String, String> {
    // 1. Explicit --profile flag.
    if let Some(profile) = explicit {
        return Ok(profile.to_string());
    }

    // 2. CADENCE_PROFILE environment variable.
    if let Ok(profile) = env::var("CADENCE_PROFILE")
        && !profile.is_empty()
    {
        return Ok(profile);
    }

    // 3. Config default.
    if let Some(profile) = &config.profile
        && !profile.is_empty()
    {
        return Ok(profile.clone());
    }

    Err(PROFILE_REQUIRED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_wins() {
        // When an explicit profile is provided, it is returned immediately.
        // We can test this without touching the env or filesystem.
        let result = resolve_profile(Some("trainers"), &Config::default());
        assert_eq!(result.unwrap(), "trainers");
    }
}
