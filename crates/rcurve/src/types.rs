use serde::{Deserialize, Serialize};

/// Represents the final, machine-specific G-code output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GCode {
    /// A list of G-code command strings.
    pub lines: Vec<String>,
}

impl GCode {
    /// Number of commands that move the tool in a straight cut.
    pub fn linear_move_count(&self) -> usize {
        self.lines.iter().filter(|l| l.starts_with("G01 ")).count()
    }

    /// The program as newline separated text, with a trailing newline.
    pub fn to_program(&self) -> String {
        let mut program = self.lines.join("\n");
        if !program.is_empty() {
            program.push('\n');
        }
        program
    }
}
