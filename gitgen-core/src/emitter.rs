use std::io::Write;

use crate::command::Command;
use crate::error::Result;

/// Renders a command log as a JSON array
#[derive(Debug, Clone, Copy)]
pub struct CommandEmitter {
    pretty: bool,
}

impl Default for CommandEmitter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl CommandEmitter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Serialize commands in order, field names unchanged
    pub fn serialize(&self, commands: &[Command]) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(commands)?
        } else {
            serde_json::to_vec(commands)?
        };
        Ok(bytes)
    }

    /// Write the serialized log followed by a newline
    pub fn write_to<W: Write>(&self, mut writer: W, commands: &[Command]) -> Result<()> {
        let bytes = self.serialize(commands)?;
        writer.write_all(&bytes)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        tracing::debug!(commands = commands.len(), bytes = bytes.len(), "wrote command log");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Command> {
        vec![
            Command::commit("1".into(), "Commit 1".into(), vec![], "path.txt", "1".into()),
            Command::tag("tag-1".into(), "1".into()),
        ]
    }

    #[test]
    fn test_compact_output() {
        let bytes = CommandEmitter::compact().serialize(&sample()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[{"type":"commit","id":"1","message":"Commit 1","parents":[],"tree":{"path.txt":"1"}},{"type":"tag","name":"tag-1","on":"1"}]"#
        );
    }

    #[test]
    fn test_pretty_output() {
        let bytes = CommandEmitter::default().serialize(&sample()).unwrap();
        let expected = r#"[
  {
    "type": "commit",
    "id": "1",
    "message": "Commit 1",
    "parents": [],
    "tree": {
      "path.txt": "1"
    }
  },
  {
    "type": "tag",
    "name": "tag-1",
    "on": "1"
  }
]"#;
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_write_to_appends_newline() {
        let mut out = Vec::new();
        CommandEmitter::compact().write_to(&mut out, &[]).unwrap();
        assert_eq!(out, b"[]\n");
    }
}
