//! Newline-delimited JSON writer.

use std::io;

use crate::error::WriteError;
use crate::machine::Machine;
use crate::traits::MachineWriter;

/// Writes one compact JSON machine per line.
pub struct JsonLinesWriter<W: io::Write> {
    out: W,
}

impl<W: io::Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> MachineWriter for JsonLinesWriter<W> {
    type Error = WriteError;

    fn write(&mut self, machine: Machine) -> Result<(), Self::Error> {
        serde_json::to_writer(&mut self.out, &machine)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_machine() {
        let mut writer = JsonLinesWriter::new(Vec::new());
        for hostname in ["a", "b"] {
            writer
                .write(Machine {
                    hostname: hostname.to_string(),
                    ..Machine::default()
                })
                .unwrap();
        }
        writer.finish().unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Machine = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.hostname, "a");
    }
}
