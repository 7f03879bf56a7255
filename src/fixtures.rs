#[cfg(test)]
pub mod test {
    use std::collections::{BTreeMap, HashMap};
    use std::fs;

    use tempfile::TempDir;

    pub const TEXT: &str = "hi, this is a string\n";

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Embed {
        pub embed_name: String,
        pub embed_address: String,
        pub embed_number: i64,
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Data {
        pub name: String,
        pub address: String,
        pub number: i64,
        pub embed: Embed,
        pub named: Option<Box<Embed>>,
        pub map: HashMap<String, String>,
        pub map_i: BTreeMap<i64, String>,
        pub lul_wut: HashMap<String, Vec<Option<Embed>>>,
        pub strings: Vec<String>,
        pub structs: Vec<Embed>,
        pub boxed: Vec<Box<Embed>>,
        pub bytes: Vec<u8>,
        pub str_ptr: Option<String>,
        pub tags: [String; 2],
        pub label: &'static str,
        /// Not listed in `walkable!`, so never visited.
        pub hidden: String,
    }

    crate::walkable!(
        Embed { embed_name, embed_address, embed_number }
        Data {
            name => "Name",
            address => "Address",
            number => "Number",
            embed => "Embed",
            named => "Named",
            map => "Map",
            map_i => "MapI",
            lul_wut => "LulWut",
            strings => "Strings",
            structs => "Structs",
            boxed => "Boxed",
            bytes => "Bytes",
            str_ptr => "StrPtr",
            tags => "Tags",
            label => "Label",
        }
    );

    /// A file on disk that lives as long as the value.
    pub struct TextFile {
        _dir: TempDir,
        pub path: String,
    }

    pub fn text_file(content: &str) -> TextFile {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("text");
        fs::write(&path, content).unwrap();
        TextFile {
            path: path.display().to_string(),
            _dir: dir,
        }
    }

    /// A `Data` with a reference to `file` in every place the walker can
    /// reach, plus a few it must leave alone.
    pub fn test_data(file: &str) -> Data {
        let reference = format!("filepath:{file}");
        Data {
            name: "me".into(),
            address: reference.clone(),
            number: 42,
            embed: Embed {
                embed_name: "me2".into(),
                embed_address: reference.clone(),
                embed_number: 7,
            },
            named: Some(Box::new(Embed {
                embed_name: "me3".into(),
                embed_address: reference.clone(),
                embed_number: 0,
            })),
            map: HashMap::from([
                ("map_string".to_string(), reference.clone()),
                ("map2_string".to_string(), "data stuff".to_string()),
            ]),
            map_i: BTreeMap::from([(2, reference.clone()), (5, "data stuff".to_string())]),
            lul_wut: HashMap::new(),
            strings: vec!["foo".into(), reference.clone()],
            structs: vec![Embed {
                embed_name: "me4".into(),
                embed_address: reference.clone(),
                embed_number: 1,
            }],
            boxed: vec![Box::new(Embed {
                embed_name: "me5".into(),
                embed_address: reference.clone(),
                embed_number: 2,
            })],
            bytes: reference.clone().into_bytes(),
            str_ptr: Some(reference.clone()),
            tags: ["plain".into(), reference.clone()],
            label: "filepath:/never/read",
            hidden: reference,
        }
    }

    /// Every location `test_data` puts a reference at.
    pub fn expected_locations() -> Vec<&'static str> {
        vec![
            "Config.Address",
            "Config.Boxed[1/1].embed_address",
            "Config.Embed.embed_address",
            "Config.MapI[2]",
            "Config.Map[map_string]",
            "Config.Named.embed_address",
            "Config.StrPtr",
            "Config.Strings[2/2]",
            "Config.Structs[1/1].embed_address",
            "Config.Tags[2/2]",
        ]
    }

    #[test]
    fn text_file_is_readable() {
        let file = text_file(TEXT);
        assert_eq!(fs::read_to_string(&file.path).unwrap(), TEXT);
    }
}
