pub mod defaults {
    pub const MANIFEST: &str = "./manifest.yaml";
    pub const PARTED: &str = crate::parted::PARTED;

    /// Assumed when the device cannot be read, e.g. in dry-run mode
    pub const SECTOR_SIZE: u64 = 512;

    /// New partitions start on 1 MiB boundaries
    pub const ALIGNMENT_BYTES: u64 = 1024 * 1024;
}

/// Overrides the parted executable
pub const ENV_PARTMAN_PARTED: &str = "PARTMAN_PARTED";
