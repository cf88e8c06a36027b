//! Text and JSON rendering for command output.

use std::io::{self, Write};

use serde::Serialize;
use switchboard_core::config::BuildContext;
use switchboard_core::flags::{FeatureFlag, Resolution};

/// One flag as shown by `list` and `get`.
#[derive(Debug, Serialize)]
pub struct FlagRow {
    pub flag: &'static str,
    pub description: &'static str,
    pub value: bool,
    pub source: &'static str,
    pub default_value: bool,
    pub default_rule: String,
    pub overridable: bool,
    pub remote_key: Option<&'static str>,
}

impl From<&Resolution> for FlagRow {
    fn from(r: &Resolution) -> Self {
        Self {
            flag: r.flag.as_str(),
            description: r.flag.description(),
            value: r.value,
            source: r.source.as_str(),
            default_value: r.default_value,
            default_rule: r.flag.default_rule().label(),
            overridable: r.flag.is_overridable(),
            remote_key: r.flag.remote_key(),
        }
    }
}

pub fn write_context(out: &mut impl Write, ctx: &BuildContext) -> io::Result<()> {
    let channel = if ctx.configuration.is_internal() {
        "internal"
    } else {
        "public"
    };
    writeln!(
        out,
        "build: {} ({channel})  app: {}  stats_revamp_v2: {}",
        ctx.configuration,
        ctx.app.as_str(),
        ctx.stats_revamp_v2
    )
}

pub fn write_table(out: &mut impl Write, rows: &[FlagRow]) -> io::Result<()> {
    let width = rows.iter().map(|r| r.flag.len()).max().unwrap_or(4).max(4);
    writeln!(
        out,
        "{:<width$}  {:<5}  {:<8}  {:<7}  {:<6}  REMOTE KEY",
        "FLAG", "VALUE", "SOURCE", "DEFAULT", "PINNED"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<width$}  {:<5}  {:<8}  {:<7}  {:<6}  {}",
            row.flag,
            row.value,
            row.source,
            row.default_value,
            if row.overridable { "" } else { "yes" },
            row.remote_key.unwrap_or("-"),
        )?;
    }
    Ok(())
}

pub fn write_detail(out: &mut impl Write, row: &FlagRow) -> io::Result<()> {
    writeln!(out, "{} = {} ({})", row.flag, row.value, row.source)?;
    writeln!(out, "  description: {}", row.description)?;
    writeln!(out, "  default:     {} [{}]", row.default_value, row.default_rule)?;
    writeln!(out, "  overridable: {}", row.overridable)?;
    writeln!(out, "  remote key:  {}", row.remote_key.unwrap_or("-"))
}

pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

pub fn write_remote_keys(out: &mut impl Write) -> io::Result<()> {
    for flag in FeatureFlag::ALL {
        if let Some(key) = flag.remote_key() {
            writeln!(out, "{key}\t{flag}")?;
        }
    }
    Ok(())
}
