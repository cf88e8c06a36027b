//! Command execution against a [`FlagRegistry`].

use std::io::Write;

use anyhow::Context;
use serde::Serialize;
use switchboard_core::flags::{parse_payload, FlagRegistry};

use crate::output::{self, FlagRow};
use crate::Command;

#[derive(Debug, Serialize)]
struct RemotePreview {
    matched: Vec<FlagRow>,
    ignored: Vec<String>,
}

pub fn execute(
    registry: &FlagRegistry,
    command: &Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List { overridden, json } => {
            let rows: Vec<FlagRow> = registry
                .snapshot()
                .iter()
                .filter(|r| !overridden || registry.overridden_value(r.flag).is_some())
                .map(FlagRow::from)
                .collect();
            if *json {
                output::write_json(out, &rows)?;
            } else {
                output::write_context(out, registry.context())?;
                output::write_table(out, &rows)?;
            }
        }
        Command::Get { flag, json } => {
            let row = FlagRow::from(&registry.explain(*flag));
            if *json {
                output::write_json(out, &row)?;
            } else {
                output::write_detail(out, &row)?;
            }
        }
        Command::Set { flag, value } => {
            registry.set_override(*flag, *value)?;
            writeln!(out, "{flag} = {value} (override)")?;
        }
        Command::Clear { flag } => {
            if registry.clear_override(*flag) {
                writeln!(out, "{flag}: override cleared, now {}", registry.resolve(*flag))?;
            } else {
                writeln!(out, "{flag}: no override set")?;
            }
        }
        Command::Reset => {
            let removed = registry.reset_overrides()?;
            writeln!(out, "removed {removed} override(s)")?;
        }
        Command::RemoteKeys => output::write_remote_keys(out)?,
        Command::RemotePreview { payload, json } => {
            let content = std::fs::read_to_string(payload)
                .with_context(|| format!("cannot read {}", payload.display()))?;
            let report = registry.apply_remote(&parse_payload(&content)?);
            let preview = RemotePreview {
                matched: report
                    .matched
                    .iter()
                    .map(|f| FlagRow::from(&registry.explain(*f)))
                    .collect(),
                ignored: report.ignored,
            };
            if *json {
                output::write_json(out, &preview)?;
            } else {
                output::write_table(out, &preview.matched)?;
                for key in &preview.ignored {
                    writeln!(out, "ignored unknown remote key: {key}")?;
                }
            }
        }
        Command::Prune => {
            let pruned = registry.prune_stale_overrides()?;
            for key in &pruned {
                writeln!(out, "pruned {key}")?;
            }
            writeln!(out, "removed {} stale override(s)", pruned.len())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_core::config::{BuildConfiguration, BuildContext};
    use switchboard_core::flags::FeatureFlag;
    use switchboard_core::FlagError;

    fn registry() -> FlagRegistry {
        FlagRegistry::in_memory(BuildContext::new(BuildConfiguration::AppStore))
    }

    fn run(registry: &FlagRegistry, command: Command) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        execute(registry, &command, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn set_then_get_reports_override() {
        let reg = registry();
        let set = Command::Set {
            flag: FeatureFlag::Blaze,
            value: true,
        };
        let out = run(&reg, set).unwrap();
        assert_eq!(out, "blaze = true (override)\n");

        let get = Command::Get {
            flag: FeatureFlag::Blaze,
            json: false,
        };
        let out = run(&reg, get).unwrap();
        assert!(out.starts_with("blaze = true (override)"));
        assert!(out.contains("remote key:  blaze"));
    }

    #[test]
    fn set_pinned_flag_fails_with_not_overridable() {
        let reg = registry();
        let set = Command::Set {
            flag: FeatureFlag::DebugMenu,
            value: true,
        };
        let err = run(&reg, set).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FlagError>(),
            Some(FlagError::NotOverridable { .. })
        ));
        assert!(!reg.resolve(FeatureFlag::DebugMenu));
    }

    #[test]
    fn list_overridden_filters_rows() {
        let reg = registry();
        reg.set_override(FeatureFlag::SiteName, true).unwrap();
        let list = Command::List {
            overridden: true,
            json: true,
        };
        let out = run(&reg, list).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["flag"], "site_name");
        assert_eq!(rows[0]["source"], "override");
    }

    #[test]
    fn clear_reports_whether_anything_changed() {
        let reg = registry();
        let clear = || Command::Clear {
            flag: FeatureFlag::QrLogin,
        };
        let out = run(&reg, clear()).unwrap();
        assert_eq!(out, "qr_login: no override set\n");

        reg.set_override(FeatureFlag::QrLogin, false).unwrap();
        let out = run(&reg, clear()).unwrap();
        assert_eq!(out, "qr_login: override cleared, now true\n");
    }

    #[test]
    fn remote_keys_lists_nine_keys() {
        let out = run(&registry(), Command::RemoteKeys).unwrap();
        assert_eq!(out.lines().count(), 9);
        assert!(out.contains("jp_removal_self_hosted\tjetpack_features_removal_phase_self_hosted"));
    }
}
