//! Wrapper around GNU parted in machine (script) mode.
//!
//! All sizes and offsets handled here are in sectors.

pub mod encode;
pub mod report;
pub mod session;

pub use self::session::PartedCall;

use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::PartError;

pub const PARTED: &str = "parted";

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum PartitionTable {
    #[default]
    #[serde(rename = "gpt")]
    Gpt,

    #[serde(rename = "msdos", alias = "mbr", alias = "dos", alias = "mbr-dos")]
    Msdos,
}

impl PartitionTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionTable::Gpt => "gpt",
            PartitionTable::Msdos => "msdos",
        }
    }

    /// Maps a parted label to a known table kind.
    /// Anything other than `gpt` or `msdos`, including empty labels,
    /// falls back to the kind used when wiping, i.e. GPT.
    pub fn resolve(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl FromStr for PartitionTable {
    type Err = PartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt" => Ok(PartitionTable::Gpt),
            "msdos" => Ok(PartitionTable::Msdos),
            _ => Err(PartError::Parse(format!("unknown partition table {s:?}"))),
        }
    }
}

impl std::fmt::Display for PartitionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partition to be created.
///
/// `fs_type` is only a hint for parted to pick the partition type/ID,
/// no filesystem is created.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct PartitionSpec {
    pub start: u64,
    /// 0 means "use all remaining space"
    pub size: u64,
    pub name: Option<String>,
    pub fs_type: String,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FlagSetting {
    pub number: u32,
    pub flag: String,
    pub active: bool,
}

/// A partition as reported by `parted print`
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ParsedPartition {
    pub number: u32,
    pub start: u64,
    pub size: u64,
    pub name: String,
}

impl ParsedPartition {
    /// Last sector occupied by the partition (inclusive)
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size.saturating_sub(1))
    }
}

/// The disk record of `parted print`
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TableHeader {
    pub device: String,
    pub last_sector: u64,
    pub transport: String,
    pub sector_size: u64,
    pub physical_sector_size: u64,
    pub label: String,
    pub model: String,
}

/// Operations queued on a device and not yet written
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct PendingOps {
    pub wipe: bool,
    pub label: PartitionTable,
    pub parts: Vec<PartitionSpec>,
    pub deletions: Vec<u32>,
    pub flags: Vec<FlagSetting>,
}

#[test]
fn test_resolve_table() {
    let tests = vec![
        ("gpt", PartitionTable::Gpt),
        ("msdos", PartitionTable::Msdos),
        ("", PartitionTable::Gpt),
        ("loop", PartitionTable::Gpt),
        ("unknown", PartitionTable::Gpt),
        ("GPT", PartitionTable::Gpt),
        ("msdos2", PartitionTable::Gpt),
    ];

    for (label, expected) in tests {
        assert_eq!(expected, PartitionTable::resolve(label), "label {label:?}");
    }

    assert!("mbr".parse::<PartitionTable>().is_err());
}

#[test]
fn test_partition_end() {
    let part = ParsedPartition {
        number: 1,
        start: 2048,
        size: 1048576,
        name: String::new(),
    };

    assert_eq!(part.end(), 1050623);

    let last = ParsedPartition {
        number: 1,
        start: 1,
        size: u64::MAX,
        name: String::new(),
    };
    assert_eq!(last.end(), u64::MAX);
}
