use gitgen_core::{parse_commands, Command, CommandEmitter, GeneratorConfig, GraphGenerator, TreeNode};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn emit(depth: u32, branching: u32) -> Vec<u8> {
    let commands = GraphGenerator::default().generate(depth, branching).unwrap();
    CommandEmitter::default().serialize(&commands).unwrap()
}

#[test]
fn serialized_output_is_deterministic() {
    assert_eq!(emit(4, 3), emit(4, 3));
    assert_ne!(emit(4, 3), emit(4, 2));
}

#[test]
fn serialized_output_reads_back() {
    let bytes = emit(3, 2);
    let parsed = parse_commands(std::str::from_utf8(&bytes).unwrap()).unwrap();
    assert_eq!(parsed, GraphGenerator::default().generate(3, 2).unwrap());
}

#[test]
fn two_generations_match_expected_json() {
    let value: serde_json::Value = serde_json::from_slice(&emit(2, 2)).unwrap();
    let expected = serde_json::json!([
        {"type": "commit", "id": "1", "message": "Commit 1", "parents": [], "tree": {"path.txt": "1"}},
        {"type": "commit", "id": "2", "message": "Commit 2", "parents": ["1"], "tree": {"path.txt": "1 -> 2"}},
        {"type": "tag", "name": "tag-2", "on": "2"},
        {"type": "commit", "id": "3", "message": "Commit 3", "parents": ["1"], "tree": {"path.txt": "1 -> 3"}},
        {"type": "tag", "name": "tag-3", "on": "3"}
    ]);
    assert_eq!(value, expected);
}

#[test]
fn every_reference_points_backwards() {
    let commands = GraphGenerator::default().generate(5, 2).unwrap();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for (index, command) in commands.iter().enumerate() {
        match command {
            Command::Commit { id, parents, tree, .. } => {
                for parent in parents {
                    assert!(position[parent.as_str()] < index);
                }
                let tree = tree.as_ref().unwrap();
                assert_eq!(tree.len(), 1);
                assert!(matches!(tree.get("path.txt"), Some(TreeNode::File(_))));
                position.insert(id.as_str(), index);
            }
            Command::Tag { name, on, .. } => {
                assert!(position[on.as_str()] < index);
                assert_eq!(name, &format!("tag-{}", on));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    assert_eq!(position.len(), 31);
}

#[test]
fn configuration_drives_names() {
    let config = GeneratorConfig::from_toml("file_name = \"lineage.txt\"\ntag_prefix = \"v\"\n").unwrap();
    let commands = GraphGenerator::new(config).generate(1, 1).unwrap();
    let json = String::from_utf8(CommandEmitter::compact().serialize(&commands).unwrap()).unwrap();
    assert_eq!(
        json,
        r#"[{"type":"commit","id":"1","message":"Commit 1","parents":[],"tree":{"lineage.txt":"1"}},{"type":"tag","name":"v1","on":"1"}]"#
    );
}
