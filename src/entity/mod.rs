pub mod action;
pub mod report;

use humanize_rs::bytes;

use crate::errors::PartError;

pub fn parse_human_bytes(s: &str) -> std::result::Result<bytes::Bytes, PartError> {
    (s.to_lowercase())
        .parse::<bytes::Bytes>()
        .map_err(|err| PartError::BadManifest(format!("bad byte unit string {s}: {err}")))
}

/// Converts a human byte string into a sector count, rounding up
pub fn human_bytes_to_sectors(s: &str, sector_size: u64) -> Result<u64, PartError> {
    if sector_size == 0 {
        return Err(PartError::BadArgs("sector size cannot be zero".to_string()));
    }

    let bytes = parse_human_bytes(s)?.size() as u64;

    Ok(bytes.div_ceil(sector_size))
}

#[test]
#[rustfmt::skip]
fn test_parse_human_bytes() {
    let valids = vec![
        "1ki", "1kib", "1Ki", "1Kib", "1KiB", "1KIB",
        "1mi", "1mib", "1Mi", "1Mib", "1MiB", "1MIB",
        "1gi", "1gib", "1Gi", "1Gib", "1GiB", "1GIB",
        "1k", "1kb", "1K", "1Kb", "1KB",
        "1m", "1mb", "1M", "1Mb", "1MB",
        "1g", "1gb", "1G", "1Gb", "1GB",
        "512 MiB", "8 GiB", "10 G",
    ];

    for v in valids {
        if let Err(err) = parse_human_bytes(v) {
            panic!("{v} should be valid, but was invalid: {err}");
        };
    }

    let invalids = vec![
        // No sizes
        "ki", "MiB", "G",
        // Minus sizes
        "-1 ki", "-1 MiB", "-1 G",
        // Decimal sizes
        "10.29 MiB", "0.5 G",
        // Bad units
        "kiib", "zb", "megabyte", "gigabytes",
    ];

    for v in invalids {
        if let Ok(bytes) = parse_human_bytes(v) {
            panic!("{v} should be invalid, but got {bytes:?}");
        }
    }
}

#[test]
fn test_human_bytes_to_sectors() {
    let tests = vec![
        ("512MiB", 512, 1048576),
        ("512MiB", 4096, 131072),
        ("1GiB", 512, 2097152),
        ("1k", 512, 2),
        ("4k", 4096, 1),
        ("1KiB", 4096, 1),
    ];

    for (size, sector_size, expected) in tests {
        assert_eq!(
            human_bytes_to_sectors(size, sector_size).unwrap(),
            expected,
            "{size} with {sector_size}-byte sectors"
        );
    }

    assert!(human_bytes_to_sectors("1MiB", 0).is_err());
    assert!(human_bytes_to_sectors("lots", 512).is_err());
}
