use super::{
    PartitionTable,
    PendingOps,
};

/// Builds parted arguments for all pending operations on `device`.
///
/// Operations are emitted in this order: table wipe, deletions,
/// creations, then flags. Returns an empty vector if nothing is pending,
/// in which case parted must not be called at all.
pub fn build_args(device: &str, pending: &PendingOps) -> Vec<String> {
    let label = pending.label;
    let mut opts: Vec<String> = Vec::new();

    if pending.wipe {
        opts.extend(["mklabel".to_string(), label.to_string()]);
    }

    for number in &pending.deletions {
        opts.extend(["rm".to_string(), number.to_string()]);
    }

    for (i, part) in pending.parts.iter().enumerate() {
        let name = match (label, &part.name) {
            (PartitionTable::Gpt, Some(name)) if !name.is_empty() => name.clone(),
            (PartitionTable::Gpt, _) => format!("part{}", i + 1),
            // msdos has no partition names, only types
            (PartitionTable::Msdos, _) => "primary".to_string(),
        };

        opts.extend(["mkpart".to_string(), name, fs_token(&part.fs_type)]);

        if part.size == 0 {
            opts.extend([part.start.to_string(), "100%".to_string()]);
        } else {
            let end = part.start.saturating_add(part.size - 1);
            opts.extend([part.start.to_string(), end.to_string()]);
        }
    }

    for flag in &pending.flags {
        let state = if flag.active { "on" } else { "off" };
        opts.extend([
            "set".to_string(),
            flag.number.to_string(),
            flag.flag.clone(),
            state.to_string(),
        ]);
    }

    if opts.is_empty() {
        return opts;
    }

    let mut args = base_args(device);
    args.extend(opts);

    args
}

/// Machine-readable batch mode with sector units
pub fn base_args(device: &str) -> Vec<String> {
    ["--script", "--machine", "--", device, "unit", "s"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Normalizes filesystem hints for parted.
/// Every FAT variant is created as fat32, everything else is passed as-is.
pub fn fs_token(fs_type: &str) -> String {
    if fs_type.to_lowercase().contains("fat") {
        return "fat32".to_string();
    }

    fs_type.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parted::{
        FlagSetting,
        PartitionSpec,
    };

    fn strings(slice: &[&str]) -> Vec<String> {
        slice.iter().map(|s| s.to_string()).collect()
    }

    fn new_part(start: u64, size: u64, name: Option<&str>, fs_type: &str) -> PartitionSpec {
        PartitionSpec {
            start,
            size,
            name: name.map(String::from),
            fs_type: fs_type.to_string(),
        }
    }

    #[test]
    fn test_fs_token() {
        let tests = vec![
            ("vfat", "fat32"),
            ("fat", "fat32"),
            ("FAT16", "fat32"),
            ("VFAT", "fat32"),
            ("fat32", "fat32"),
            ("ext4", "ext4"),
            ("linux-swap", "linux-swap"),
            ("xfs", "xfs"),
            ("", ""),
        ];

        for (hint, expected) in tests {
            assert_eq!(expected, fs_token(hint), "hint {hint:?}");
        }
    }

    #[test]
    fn test_build_args_empty() {
        assert!(build_args("/dev/sda", &PendingOps::default()).is_empty());

        // A label alone is not an operation
        let pending = PendingOps {
            label: PartitionTable::Msdos,
            ..Default::default()
        };
        assert!(build_args("/dev/sda", &pending).is_empty());
    }

    #[test]
    fn test_build_args() {
        struct Test<'a> {
            pending: PendingOps,
            expected: Vec<&'a str>,
        }

        let tests = vec![
            Test {
                pending: PendingOps {
                    parts: vec![new_part(2048, 0, None, "vfat")],
                    ..Default::default()
                },
                expected: vec![
                    "--script", "--machine", "--", "/dev/sda", "unit", "s",
                    "mkpart", "part1", "fat32", "2048", "100%",
                ],
            },
            Test {
                pending: PendingOps {
                    wipe: true,
                    label: PartitionTable::Gpt,
                    parts: vec![
                        new_part(2048, 1048576, Some("efi"), "vfat"),
                        new_part(1050624, 2097152, None, "linux-swap"),
                        new_part(3147776, 0, Some("root"), "ext4"),
                    ],
                    flags: vec![FlagSetting {
                        number: 1,
                        flag: "esp".to_string(),
                        active: true,
                    }],
                    ..Default::default()
                },
                expected: vec![
                    "--script", "--machine", "--", "/dev/sda", "unit", "s",
                    "mklabel", "gpt",
                    "mkpart", "efi", "fat32", "2048", "1050623",
                    "mkpart", "part2", "linux-swap", "1050624", "3147775",
                    "mkpart", "root", "ext4", "3147776", "100%",
                    "set", "1", "esp", "on",
                ],
            },
            Test {
                pending: PendingOps {
                    wipe: true,
                    label: PartitionTable::Msdos,
                    parts: vec![
                        new_part(2048, 204800, Some("boot"), "ext2"),
                        new_part(206848, 0, None, "ext4"),
                    ],
                    flags: vec![FlagSetting {
                        number: 1,
                        flag: "boot".to_string(),
                        active: false,
                    }],
                    ..Default::default()
                },
                expected: vec![
                    "--script", "--machine", "--", "/dev/sda", "unit", "s",
                    "mklabel", "msdos",
                    "mkpart", "primary", "ext2", "2048", "206847",
                    "mkpart", "primary", "ext4", "206848", "100%",
                    "set", "1", "boot", "off",
                ],
            },
            Test {
                pending: PendingOps {
                    deletions: vec![3, 1],
                    parts: vec![new_part(4096, 8, Some(""), "ext4")],
                    ..Default::default()
                },
                expected: vec![
                    "--script", "--machine", "--", "/dev/sda", "unit", "s",
                    "rm", "3", "rm", "1",
                    "mkpart", "part1", "ext4", "4096", "4103",
                ],
            },
        ];

        for test in tests {
            let result = build_args("/dev/sda", &test.pending);
            assert_eq!(strings(&test.expected), result);
        }
    }

    #[test]
    fn test_build_args_wipe_first() {
        let pending = PendingOps {
            wipe: true,
            label: PartitionTable::resolve("bogus"),
            deletions: vec![2],
            ..Default::default()
        };

        let args = build_args("/dev/vda", &pending);
        assert_eq!(&args[6..8], &strings(&["mklabel", "gpt"])[..]);
        assert_eq!(&args[8..], &strings(&["rm", "2"])[..]);
    }

    #[test]
    fn test_build_args_many_primary() {
        let pending = PendingOps {
            label: PartitionTable::Msdos,
            parts: (0..4)
                .map(|i| new_part(2048 + i * 4096, 4096, Some("named"), "ext4"))
                .collect(),
            ..Default::default()
        };

        let args = build_args("/dev/sda", &pending);
        let names: Vec<&String> = args
            .iter()
            .enumerate()
            .filter(|(_, arg)| arg.as_str() == "mkpart")
            .map(|(i, _)| &args[i + 1])
            .collect();

        assert_eq!(names.len(), 4);
        assert!(names.iter().all(|name| name.as_str() == "primary"));
    }
}
