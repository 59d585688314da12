pub mod apply;
pub mod validation;

use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::PartError;
use crate::parted::PartitionTable;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(alias = "disk", alias = "devices")]
    pub disks: Vec<ManifestDisk>,
}

impl Manifest {
    #[inline]
    pub fn from_yaml(manifest_yaml: &str) -> Result<Self, PartError> {
        parse(manifest_yaml)
    }

    pub fn from_toml(manifest_toml: &str) -> Result<Self, PartError> {
        toml::from_str(manifest_toml).map_err(|err| PartError::BadManifest(err.to_string()))
    }

    /// Reads a manifest file. Files ending with `.toml` are parsed
    /// as TOML, anything else as YAML.
    pub fn from_file(manifest_file: &str) -> Result<Self, PartError> {
        let content = std::fs::read_to_string(manifest_file)
            .map_err(|err| PartError::NoSuchFile(err, manifest_file.to_string()))?;

        match Path::new(manifest_file).extension() {
            Some(ext) if ext == "toml" => Self::from_toml(&content),
            _ => Self::from_yaml(&content),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ManifestDisk {
    pub device: String,

    /// Table created when wiping. Defaults to GPT
    #[serde(alias = "label")]
    pub table: Option<PartitionTable>,

    /// Wipes the existing table before anything else
    #[serde(default, alias = "mklabel")]
    pub wipe: bool,

    /// On-device numbers of partitions to delete
    #[serde(default, alias = "deletions", alias = "rm")]
    pub delete: Vec<u32>,

    #[serde(default)]
    pub partitions: Vec<ManifestPartition>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ManifestPartition {
    /// GPT partition name, ignored on msdos tables
    #[serde(alias = "name")]
    pub label: Option<String>,

    pub size: Option<String>, // e.g. 200M, None = rest of the disk

    #[serde(rename = "type", alias = "fs_type", alias = "filesystem")]
    pub part_type: String,

    #[serde(default)]
    pub flags: Vec<String>,
}

#[inline]
pub fn parse(manifest: &str) -> Result<Manifest, PartError> {
    serde_yaml::from_str(manifest).map_err(|err| PartError::BadManifest(err.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const EXAMPLE_YAML: &str = "
disks:
  - device: /dev/sda
    table: gpt
    wipe: true
    partitions:
      - label: efi
        size: 512MiB
        type: vfat
        flags: [esp, boot]
      - label: swap
        size: 4GiB
        type: linux-swap
      - label: root
        type: ext4

  - device: /dev/nvme0n1
    delete: [3, 4]
    partitions:
      - type: xfs
";

    #[test]
    fn test_parse() {
        let manifest = parse(EXAMPLE_YAML).unwrap();

        assert_eq!(manifest.disks.len(), 2);

        let sda = &manifest.disks[0];
        assert_eq!(sda.table, Some(PartitionTable::Gpt));
        assert!(sda.wipe);
        assert!(sda.delete.is_empty());
        assert_eq!(sda.partitions.len(), 3);
        assert_eq!(sda.partitions[0].flags, vec!["esp", "boot"]);
        assert_eq!(sda.partitions[2].size, None);

        let nvme = &manifest.disks[1];
        assert_eq!(nvme.table, None);
        assert!(!nvme.wipe);
        assert_eq!(nvme.delete, vec![3, 4]);
        assert_eq!(nvme.partitions[0].label, None);
        assert_eq!(nvme.partitions[0].part_type, "xfs");
    }

    #[test]
    fn test_parse_table_aliases() {
        for table in ["msdos", "mbr", "dos"] {
            let yaml = format!("disks:\n  - device: /dev/sda\n    table: {table}\n");
            let manifest = parse(&yaml).unwrap();

            assert_eq!(manifest.disks[0].table, Some(PartitionTable::Msdos));
        }

        let yaml = "disks:\n  - device: /dev/sda\n    table: apm\n";
        assert!(matches!(parse(yaml), Err(PartError::BadManifest(_))));
    }

    #[test]
    fn test_from_file() {
        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        yaml.write_all(EXAMPLE_YAML.as_bytes()).unwrap();

        let manifest = Manifest::from_file(yaml.path().to_str().unwrap()).unwrap();
        assert_eq!(manifest.disks.len(), 2);

        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        toml_file
            .write_all(
                b"[[disks]]
device = \"/dev/vda\"
table = \"msdos\"
wipe = true

[[disks.partitions]]
size = \"1GiB\"
type = \"ext4\"
flags = [\"boot\"]
",
            )
            .unwrap();

        let manifest = Manifest::from_file(toml_file.path().to_str().unwrap()).unwrap();
        assert_eq!(manifest.disks[0].table, Some(PartitionTable::Msdos));
        assert_eq!(manifest.disks[0].partitions[0].size.as_deref(), Some("1GiB"));

        assert!(matches!(
            Manifest::from_file("/no/such/manifest.yaml"),
            Err(PartError::NoSuchFile(..))
        ));
    }
}
