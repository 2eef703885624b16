use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use incident_store::RecordPolicy;

pub const DATASET_PATH_VAR: &str = "INCIDENT_DATASET_PATH";
pub const BIND_VAR: &str = "DASHBOARD_BIND";
pub const STATIC_DIR_VAR: &str = "DASHBOARD_STATIC_DIR";
pub const RECORD_POLICY_VAR: &str = "DATASET_RECORD_POLICY";

const DEFAULT_DATASET_PATH: &str = "./public/events.json";
const DEFAULT_BIND: &str = "127.0.0.1:4000";

#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: PathBuf,
    pub dashboard_bind: String,
    pub dashboard_static_dir: Option<PathBuf>,
    pub record_policy: RecordPolicy,
}

pub fn load_config() -> Result<Config> {
    dotenvy::dotenv().ok();
    config_from(|key| env::var(key).ok())
}

/// Builds the config from any key lookup; blank values count as unset.
pub fn config_from<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let record_policy = match get(RECORD_POLICY_VAR) {
        Some(raw) => raw
            .parse::<RecordPolicy>()
            .with_context(|| format!("DATASET_RECORD_POLICY `{raw}` is not a record policy"))?,
        None => RecordPolicy::default(),
    };

    Ok(Config {
        dataset_path: get(DATASET_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH)),
        dashboard_bind: get(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string()),
        dashboard_static_dir: get(STATIC_DIR_VAR).map(PathBuf::from),
        record_policy,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config_from(lookup(&[])).unwrap();
        assert_eq!(cfg.dataset_path, PathBuf::from("./public/events.json"));
        assert_eq!(cfg.dashboard_bind, "127.0.0.1:4000");
        assert!(cfg.dashboard_static_dir.is_none());
        assert_eq!(cfg.record_policy, RecordPolicy::Drop);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(lookup(&[
            (DATASET_PATH_VAR, "/data/events.json"),
            (STATIC_DIR_VAR, "dist"),
            (RECORD_POLICY_VAR, "Strict"),
            (BIND_VAR, " "),
        ]))
        .unwrap();
        assert_eq!(cfg.dataset_path, PathBuf::from("/data/events.json"));
        assert_eq!(cfg.dashboard_static_dir, Some(PathBuf::from("dist")));
        assert_eq!(cfg.record_policy, RecordPolicy::Strict);
        assert_eq!(cfg.dashboard_bind, "127.0.0.1:4000");
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(config_from(lookup(&[(RECORD_POLICY_VAR, "lenient")])).is_err());
    }
}
