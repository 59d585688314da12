use std::collections::BTreeSet;

use tracing::{
    info,
    warn,
};

use super::ManifestDisk;
use crate::constants::defaults;
use crate::entity::action::Action;
use crate::entity::human_bytes_to_sectors;
use crate::errors::PartError;
use crate::parted::{
    report,
    ParsedPartition,
    PartedCall,
    PartitionSpec,
    PartitionTable,
};
use crate::runner::Runner;

#[derive(Debug, Clone)]
pub struct ApplyOpts {
    /// parted executable
    pub tool: String,
    /// Skip reading the device, assume an empty disk with default sector size
    pub dry_run: bool,
}

/// What we need to know about a disk before placing new partitions
#[derive(Debug, PartialEq)]
struct Geometry {
    sector_size: u64,
    last_sector: Option<u64>,
    label: PartitionTable,
    partitions: Vec<ParsedPartition>,
}

pub fn apply_disks<R: Runner>(
    disks: &[ManifestDisk],
    runner: &R,
    opts: &ApplyOpts,
) -> Result<Vec<Action>, PartError> {
    let mut actions: Vec<Action> = Vec::new();

    for disk in disks.iter() {
        let action_apply_disk = Action::ApplyDisk {
            device: disk.device.clone(),
        };

        match apply_disk(disk, runner, opts) {
            Err(PartError::ApplyError {
                error,
                action_failed,
                actions_performed,
            }) => {
                actions.extend(actions_performed);
                return Err(PartError::ApplyError {
                    error,
                    action_failed,
                    actions_performed: actions,
                });
            }
            Err(err) => return Err(map_err_apply(err, action_apply_disk, actions)),
            Ok(disk_actions) => {
                actions.extend(disk_actions);
                actions.push(action_apply_disk);
            }
        }
    }

    actions.push(Action::ApplyDisks);

    Ok(actions)
}

/// Applies one disk in two transactions:
/// 1. wipe and deletions,
/// 2. creations and flags, placed after whatever is left on the disk.
pub fn apply_disk<R: Runner>(
    disk: &ManifestDisk,
    runner: &R,
    opts: &ApplyOpts,
) -> Result<Vec<Action>, PartError> {
    let mut actions = Vec::new();
    // Queued actions only count as performed once their write succeeds
    let mut pending = Vec::new();
    let device = disk.device.clone();
    let mut pc = PartedCall::new(&device, runner).with_tool(&opts.tool);

    if disk.wipe {
        let table = disk.table.unwrap_or_default();
        pc.set_partition_table_label(table.as_str());
        pc.wipe_table(true);

        pending.push(Action::CreatePartitionTable {
            device: device.clone(),
            table,
        });
    }

    for &number in &disk.delete {
        pc.delete_partition(number);
        pending.push(Action::DeletePartition {
            device: device.clone(),
            number,
        });
    }

    let action_write = Action::WriteChanges {
        device: device.clone(),
    };

    if let Err(err) = pc.write_changes() {
        return Err(map_err_apply(err, action_write, actions));
    }

    if !pending.is_empty() {
        actions.append(&mut pending);
        actions.push(action_write.clone());
    }

    if disk.partitions.is_empty() {
        return Ok(actions);
    }

    let geometry = if opts.dry_run {
        Geometry {
            sector_size: defaults::SECTOR_SIZE,
            last_sector: None,
            label: disk.table.unwrap_or_default(),
            partitions: Vec::new(),
        }
    } else {
        let action_read = Action::ReadPartitionTable {
            device: device.clone(),
        };

        match read_geometry(&pc) {
            Ok(geometry) => {
                actions.push(action_read);
                geometry
            }
            Err(err) => return Err(map_err_apply(err, action_read, actions)),
        }
    };

    // The label on disk decides partition naming, not the manifest
    if !disk.wipe {
        pc.set_partition_table_label(geometry.label.as_str());
    }

    let align = alignment(geometry.sector_size);
    let mut next_start = first_free_sector(&geometry.partitions, align);
    let mut used: BTreeSet<u32> = geometry.partitions.iter().map(|p| p.number).collect();

    info!(
        device = %device,
        sector_size = geometry.sector_size,
        start = next_start,
        "placing {} new partition(s)",
        disk.partitions.len()
    );

    for part in &disk.partitions {
        let number = next_number(&used);
        used.insert(number);

        let action_create = Action::CreatePartition {
            device: device.clone(),
            number,
            start: next_start,
            size: part.size.clone().unwrap_or("100%".into()),
        };

        let size = match part.size {
            Some(ref size) => match human_bytes_to_sectors(size, geometry.sector_size) {
                Ok(0) => {
                    let err = PartError::BadManifest(format!(
                        "partition size cannot be zero: {size}"
                    ));
                    return Err(map_err_apply(err, action_create, actions));
                }
                Ok(sectors) => sectors,
                Err(err) => return Err(map_err_apply(err, action_create, actions)),
            },
            None => 0,
        };

        pc.create_partition(PartitionSpec {
            start: next_start,
            size,
            name: part.label.clone(),
            fs_type: part.part_type.clone(),
        });

        pending.push(action_create);

        for flag in &part.flags {
            pc.set_partition_flag(number, flag, true);
            pending.push(Action::SetPartitionFlag {
                device: device.clone(),
                number,
                flag: flag.clone(),
                active: true,
            });
        }

        if let Some(last_sector) = geometry.last_sector {
            if next_start.saturating_add(size) > last_sector {
                warn!(
                    device = %device,
                    number,
                    start = next_start,
                    last_sector,
                    "partition extends past the end of the disk"
                );
            }
        }

        next_start = align_up(next_start.saturating_add(size), align);
    }

    if let Err(err) = pc.write_changes() {
        return Err(map_err_apply(err, action_write, actions));
    }

    actions.append(&mut pending);
    actions.push(action_write);

    Ok(actions)
}

fn read_geometry<R: Runner>(pc: &PartedCall<R>) -> Result<Geometry, PartError> {
    let out = pc.print()?;

    Ok(Geometry {
        sector_size: report::get_sector_size(&out)?,
        last_sector: Some(report::get_last_sector(&out)?),
        label: PartitionTable::resolve(&report::get_partition_table_label(&out)?),
        partitions: report::get_partitions(&out)?,
    })
}

/// Partition alignment in sectors (1 MiB)
fn alignment(sector_size: u64) -> u64 {
    (defaults::ALIGNMENT_BYTES / sector_size.max(1)).max(1)
}

fn align_up(sector: u64, align: u64) -> u64 {
    sector.div_ceil(align).saturating_mul(align)
}

fn first_free_sector(partitions: &[ParsedPartition], align: u64) -> u64 {
    partitions
        .iter()
        .map(|p| align_up(p.end().saturating_add(1), align))
        .max()
        .unwrap_or(align)
        .max(align)
}

// parted hands out the lowest unused partition number
fn next_number(used: &BTreeSet<u32>) -> u32 {
    (1..).find(|n| !used.contains(n)).unwrap_or(1)
}

pub(crate) fn map_err_apply(
    err: PartError,
    action_failed: Action,
    actions_performed: Vec<Action>,
) -> PartError {
    PartError::ApplyError {
        error: Box::new(err),
        action_failed: Box::new(action_failed),
        actions_performed,
    }
}
