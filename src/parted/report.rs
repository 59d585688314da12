//! Parsers for `parted --machine unit s print` output.
//!
//! The machine format is one record per line, fields separated by `:`
//! and terminated by `;`:
//!
//! ```text
//! BYT;
//! /dev/sda:41943040s:scsi:512:512:gpt:ATA FOO:;
//! 1:2048s:1050623s:1048576s:ext4:primary:;
//! ```
//!
//! Lines that do not look like a known record are skipped.

use super::{
    ParsedPartition,
    TableHeader,
};
use crate::errors::PartError;

struct HeaderRecord<'a> {
    device: &'a str,
    last_sector: &'a str,
    transport: &'a str,
    sector_size: &'a str,
    physical_sector_size: &'a str,
    label: &'a str,
    model: String,
}

struct PartitionRecord<'a> {
    number: &'a str,
    start: &'a str,
    end: &'a str,
    name: String,
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// Strips the sector unit suffix, e.g. "2048s" -> "2048"
fn sectors(s: &str) -> Option<&str> {
    s.strip_suffix('s').filter(|n| is_digits(n))
}

fn record_fields(line: &str) -> Option<Vec<&str>> {
    line.trim().strip_suffix(';').map(|r| r.split(':').collect())
}

// device:last_sector"s":transport:logical:physical:label:model:flags;
// Extra colons are taken to be part of the model.
fn header_record(line: &str) -> Option<HeaderRecord<'_>> {
    let fields = record_fields(line)?;
    let n = fields.len();
    if n < 8 {
        return None;
    }

    let last_sector = sectors(fields[1])?;
    if !is_digits(fields[3]) || !is_digits(fields[4]) {
        return None;
    }

    Some(HeaderRecord {
        device: fields[0],
        last_sector,
        transport: fields[2],
        sector_size: fields[3],
        physical_sector_size: fields[4],
        label: fields[5],
        model: fields[6..n - 1].join(":"),
    })
}

// number:start"s":end"s":size"s":fs:name:flags;
// Extra colons are taken to be part of the name.
fn partition_record(line: &str) -> Option<PartitionRecord<'_>> {
    let fields = record_fields(line)?;
    let n = fields.len();
    if n < 7 || !is_digits(fields[0]) {
        return None;
    }

    let start = sectors(fields[1])?;
    let end = sectors(fields[2])?;
    sectors(fields[3])?;

    Some(PartitionRecord {
        number: fields[0],
        start,
        end,
        name: fields[5..n - 1].join(":"),
    })
}

fn find_header(print_out: &str) -> Option<HeaderRecord<'_>> {
    print_out.lines().find_map(header_record)
}

fn parse_num<T: std::str::FromStr>(field: &str, what: &str) -> Result<T, PartError>
where
    T::Err: std::fmt::Display,
{
    field
        .parse::<T>()
        .map_err(|err| PartError::Parse(format!("bad {what} {field}: {err}")))
}

/// Returns the whole disk record of the first header line
pub fn get_header(print_out: &str) -> Result<TableHeader, PartError> {
    let header = find_header(print_out)
        .ok_or_else(|| PartError::HeaderParse("no disk record found".to_string()))?;

    Ok(TableHeader {
        device: header.device.to_string(),
        last_sector: parse_num(header.last_sector, "last sector")?,
        transport: header.transport.to_string(),
        sector_size: parse_num(header.sector_size, "sector size")?,
        physical_sector_size: parse_num(
            header.physical_sector_size,
            "physical sector size",
        )?,
        label: header.label.to_string(),
        model: header.model,
    })
}

pub fn get_last_sector(print_out: &str) -> Result<u64, PartError> {
    let header = find_header(print_out)
        .ok_or_else(|| PartError::HeaderParse("failed parsing last sector".to_string()))?;

    parse_num(header.last_sector, "last sector")
}

pub fn get_sector_size(print_out: &str) -> Result<u64, PartError> {
    let header = find_header(print_out)
        .ok_or_else(|| PartError::HeaderParse("failed parsing sector size".to_string()))?;

    parse_num(header.sector_size, "sector size")
}

/// Returns the partition table label verbatim, e.g. `gpt`, `msdos` or `unknown`
pub fn get_partition_table_label(print_out: &str) -> Result<String, PartError> {
    let header = find_header(print_out).ok_or_else(|| {
        PartError::HeaderParse("failed parsing partition table label".to_string())
    })?;

    Ok(header.label.to_string())
}

/// Returns partitions in the order they are printed.
///
/// Sizes are always computed from the start and end sectors,
/// the size field of the record is ignored. Partitions are neither
/// sorted nor deduplicated by number.
pub fn get_partitions(print_out: &str) -> Result<Vec<ParsedPartition>, PartError> {
    let mut partitions = Vec::new();

    for record in print_out.lines().filter_map(partition_record) {
        let start: u64 = parse_num(record.start, "start sector")?;
        let end: u64 = parse_num(record.end, "end sector")?;
        let size = end
            .checked_sub(start)
            .and_then(|len| len.checked_add(1))
            .ok_or_else(|| {
                PartError::Parse(format!(
                    "partition {} ends ({end}) before it starts ({start})",
                    record.number
                ))
            })?;

        partitions.push(ParsedPartition {
            number: parse_num(record.number, "partition number")?,
            start,
            size,
            name: record.name,
        });
    }

    Ok(partitions)
}
