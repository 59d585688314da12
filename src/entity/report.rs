use serde_json::json;

use super::action::Action;

#[derive(Debug)]
pub struct Report {
    pub actions: Vec<Action>,
    pub dry_run: bool,
    pub duration: std::time::Duration,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "actions": self.actions,
            "dryRun": self.dry_run,
            "elapsedTime": self.duration,
        })
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

#[test]
fn test_report_json() {
    let report = Report {
        actions: vec![
            Action::CreatePartitionTable {
                device: "/dev/sda".into(),
                table: crate::parted::PartitionTable::Gpt,
            },
            Action::CreatePartition {
                device: "/dev/sda".into(),
                number: 1,
                start: 2048,
                size: "8G".into(),
            },
            Action::ApplyDisks,
        ],
        dry_run: false,
        duration: std::time::Duration::from_secs(20),
    };

    let json = report.to_json();
    assert_eq!(json["actions"][0]["createPartitionTable"]["table"], "gpt");
    assert_eq!(json["actions"][1]["createPartition"]["start"], 2048);
    assert_eq!(json["actions"][2], "applyDisks");
    assert_eq!(json["dryRun"], false);
}
