use serde::{
    Deserialize,
    Serialize,
};

use crate::parted::PartitionTable;

/// Actions performed on disks, recorded for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "applyDisk")]
    ApplyDisk { device: String },

    #[serde(rename = "applyDisks")]
    ApplyDisks,

    #[serde(rename = "createPartitionTable")]
    CreatePartitionTable {
        device: String,
        table: PartitionTable,
    },

    #[serde(rename = "deletePartition")]
    DeletePartition { device: String, number: u32 },

    #[serde(rename = "createPartition")]
    CreatePartition {
        device: String,
        number: u32,
        start: u64,
        size: String,
    },

    #[serde(rename = "setPartitionFlag")]
    SetPartitionFlag {
        device: String,
        number: u32,
        flag: String,
        active: bool,
    },

    #[serde(rename = "readPartitionTable")]
    ReadPartitionTable { device: String },

    #[serde(rename = "writeChanges")]
    WriteChanges { device: String },
}
