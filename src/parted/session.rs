use tracing::{
    debug,
    info,
};

use super::encode::{
    base_args,
    build_args,
};
use super::{
    FlagSetting,
    PartitionSpec,
    PartitionTable,
    PendingOps,
    PARTED,
};
use crate::errors::PartError;
use crate::runner::Runner;

/// PartedCall queues partition table changes for a single device
/// and writes them with one parted invocation.
///
/// A call is meant to be driven by one transaction at a time;
/// it can be reused after a successful [`write_changes`](Self::write_changes).
pub struct PartedCall<R: Runner> {
    device: String,
    tool: String,
    pending: PendingOps,
    runner: R,
}

impl<R: Runner> PartedCall<R> {
    pub fn new(device: &str, runner: R) -> Self {
        Self {
            device: device.to_string(),
            tool: PARTED.to_string(),
            pending: PendingOps::default(),
            runner,
        }
    }

    /// Uses `tool` as the parted executable instead of looking up `parted`
    pub fn with_tool(mut self, tool: &str) -> Self {
        self.tool = tool.to_string();
        self
    }

    /// Sets the table kind used by the next wipe.
    /// Unknown labels fall back to GPT.
    pub fn set_partition_table_label(&mut self, label: &str) {
        self.pending.label = PartitionTable::resolve(label);
    }

    pub fn wipe_table(&mut self, wipe: bool) {
        self.pending.wipe = wipe;
    }

    pub fn create_partition(&mut self, part: PartitionSpec) {
        self.pending.parts.push(part);
    }

    pub fn delete_partition(&mut self, number: u32) {
        self.pending.deletions.push(number);
    }

    pub fn set_partition_flag(&mut self, number: u32, flag: &str, active: bool) {
        self.pending.flags.push(FlagSetting {
            number,
            flag: flag.to_string(),
            active,
        });
    }

    /// Writes all pending operations and returns parted output.
    ///
    /// Parted is not called at all when nothing is pending.
    /// On success the wipe, creations and deletions are cleared, flags are kept.
    /// On failure pending operations are left untouched.
    pub fn write_changes(&mut self) -> Result<String, PartError> {
        let args = build_args(&self.device, &self.pending);
        if args.is_empty() {
            debug!(device = %self.device, "no pending changes");
            return Ok(String::new());
        }

        info!(
            device = %self.device,
            wipe = self.pending.wipe,
            deletions = self.pending.deletions.len(),
            creations = self.pending.parts.len(),
            flags = self.pending.flags.len(),
            "writing partition table changes"
        );

        let out = self.runner.run(&self.tool, &args)?;

        self.pending.wipe = false;
        self.pending.parts = Vec::new();
        self.pending.deletions = Vec::new();

        Ok(out)
    }

    /// Returns machine-readable `parted print` output for the device
    pub fn print(&self) -> Result<String, PartError> {
        let mut args = base_args(&self.device);
        args.push("print".to_string());

        self.runner.run(&self.tool, &args)
    }
}
