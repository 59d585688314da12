use std::collections::HashSet;
use std::path::Path;

use super::{
    Manifest,
    ManifestDisk,
};
use crate::entity::parse_human_bytes;
use crate::errors::PartError;

/// Validates manifest entries.
/// With `check_devices`, every disk device must also exist on this system.
pub fn validate(manifest: &Manifest, check_devices: bool) -> Result<(), PartError> {
    if manifest.disks.is_empty() {
        return Err(PartError::BadManifest("no disks declared".to_string()));
    }

    let mut devices = HashSet::new();
    for disk in &manifest.disks {
        if !devices.insert(disk.device.as_str()) {
            return Err(PartError::BadManifest(format!(
                "duplicate disk device {}",
                disk.device
            )));
        }

        validate_disk(disk)?;

        if check_devices && !Path::new(&disk.device).exists() {
            return Err(PartError::NoSuchDevice(disk.device.clone()));
        }
    }

    Ok(())
}

fn validate_disk(disk: &ManifestDisk) -> Result<(), PartError> {
    if !disk.device.starts_with('/') {
        return Err(PartError::BadManifest(format!(
            "disk device must be an absolute path: {:?}",
            disk.device
        )));
    }

    // mklabel already removes every partition, rm would fail afterwards
    if disk.wipe && !disk.delete.is_empty() {
        return Err(PartError::BadManifest(format!(
            "disk {}: cannot delete partitions from a wiped table",
            disk.device
        )));
    }

    if disk.delete.contains(&0) {
        return Err(PartError::BadManifest(format!(
            "disk {}: partition numbers start at 1",
            disk.device
        )));
    }

    let l = disk.partitions.len();
    for (i, part) in disk.partitions.iter().enumerate() {
        let msg = format!("disk {} partition #{}", disk.device, i + 1);

        match part.size {
            // Only the last partition could be unsized
            None if i != l - 1 => {
                return Err(PartError::BadManifest(format!(
                    "{msg}: unsized partition must be the last partition"
                )));
            }
            None => {}
            Some(ref size) => {
                let bytes = parse_human_bytes(size).map_err(|err| {
                    PartError::BadManifest(format!("{msg}: bad partition size {size}: {err}"))
                })?;

                if bytes.size() == 0 {
                    return Err(PartError::BadManifest(format!(
                        "{msg}: partition size cannot be zero"
                    )));
                }
            }
        }

        if part.part_type.is_empty() {
            return Err(PartError::BadManifest(format!(
                "{msg}: missing partition type"
            )));
        }

        if part.flags.iter().any(|flag| flag.trim().is_empty()) {
            return Err(PartError::BadManifest(format!("{msg}: empty flag")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse;

    #[test]
    fn test_validate_ok() {
        let manifest = parse(
            "
disks:
  - device: /dev/sda
    wipe: true
    partitions:
      - size: 512MiB
        type: vfat
        flags: [esp]
      - type: ext4
  - device: /dev/sdb
    delete: [1]
",
        )
        .unwrap();

        validate(&manifest, false).unwrap();
    }

    #[test]
    fn test_validate_bad() {
        let tests = vec![
            // No disks
            "disks: []",
            // Relative path
            "disks:\n  - device: sda\n",
            // Duplicate devices
            "disks:\n  - device: /dev/sda\n  - device: /dev/sda\n",
            // Deletions on a wiped disk
            "disks:\n  - device: /dev/sda\n    wipe: true\n    delete: [3]\n",
            // Partition number 0
            "disks:\n  - device: /dev/sda\n    delete: [0]\n",
            // Unsized partition is not the last one
            "disks:
  - device: /dev/sda
    partitions:
      - type: ext4
      - size: 1GiB
        type: ext4
",
            // Bad size
            "disks:
  - device: /dev/sda
    partitions:
      - size: lots
        type: ext4
",
            // Zero size
            "disks:
  - device: /dev/sda
    partitions:
      - size: 0MiB
        type: ext4
",
            // No type
            "disks:
  - device: /dev/sda
    partitions:
      - type: ''
",
            // Empty flag
            "disks:
  - device: /dev/sda
    partitions:
      - type: ext4
        flags: ['']
",
        ];

        for yaml in tests {
            let manifest = parse(yaml).unwrap();
            let result = validate(&manifest, false);

            assert!(
                matches!(result, Err(PartError::BadManifest(_))),
                "expected bad manifest for {yaml:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_validate_check_devices() {
        let manifest = parse("disks:\n  - device: /dev/partman-no-such-disk\n").unwrap();

        validate(&manifest, false).unwrap();
        assert!(matches!(
            validate(&manifest, true),
            Err(PartError::NoSuchDevice(_))
        ));
    }
}
