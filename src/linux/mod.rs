use nix::unistd::Uid;

/// Returns whether partman-rs runs with effective root privileges
pub fn is_root() -> bool {
    Uid::effective().is_root()
}

// See linux/block/partition-generic.c
//
// char *disk_name(struct gendisk *hd, int partno, char *buf)
// {
// 	if (!partno)
// 		snprintf(buf, BDEVNAME_SIZE, "%s", hd->disk_name);
// 	else if (isdigit(hd->disk_name[strlen(hd->disk_name)-1]))
// 		snprintf(buf, BDEVNAME_SIZE, "%sp%d", hd->disk_name, partno);
// 	else
// 		snprintf(buf, BDEVNAME_SIZE, "%s%d", hd->disk_name, partno);
// 	return buf;
// }
//
/// Returns the device node of partition `part_number` on disk `name`
pub(crate) fn partition_name(name: &str, part_number: u32) -> String {
    match name.chars().last() {
        Some(c) if c.is_ascii_digit() => format!("{name}p{part_number}"),
        _ => format!("{name}{part_number}"),
    }
}
