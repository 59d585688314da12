use serde_json::json;

use crate::cli;
use crate::errors::PartError;
use crate::linux::partition_name;
use crate::parted::{
    report,
    PartedCall,
};
use crate::runner::ShellRunner;

pub(super) fn run(tool: &str, args: cli::ArgsPrint) -> Result<(), PartError> {
    let pc = PartedCall::new(&args.device, ShellRunner).with_tool(tool);

    let out = pc.print()?;
    let header = report::get_header(&out)?;
    let partitions = report::get_partitions(&out)?;

    if args.json {
        let partitions: Vec<serde_json::Value> = partitions
            .iter()
            .map(|p| {
                json!({
                    "device": partition_name(&args.device, p.number),
                    "number": p.number,
                    "start": p.start,
                    "end": p.end(),
                    "size": p.size,
                    "name": p.name,
                })
            })
            .collect();

        println!(
            "{}",
            json!({
                "disk": header,
                "partitions": partitions,
            })
        );

        return Ok(());
    }

    println!(
        "{} ({}): {} sectors of {} bytes, {} table",
        header.device, header.model, header.last_sector, header.sector_size, header.label
    );

    for p in &partitions {
        println!(
            "{:<20} {:>4} {:>14} {:>14} {:>14}  {}",
            partition_name(&args.device, p.number),
            p.number,
            p.start,
            p.end(),
            p.size,
            p.name
        );
    }

    Ok(())
}
