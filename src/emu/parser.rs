//! Parser - turns the textual node programs into instruction sequences
//!
//! Parsing runs in two passes over the normalised lines:
//!
//! 1. **Label pass** — a line containing `:` binds its prefix as a label for
//!    the current line index; the suffix replaces the line (`NOP` when empty).
//! 2. **Instruction pass** — the first three characters select the mnemonic,
//!    the remainder supplies the operands.
//!
//! Jump targets are resolved against the label table immediately; a target
//! that matches no label resolves to index 0, which the reference machine
//! relies on.

use std::collections::HashMap;

use super::instruction::{Dir, Instruction, Op, Operand};

/// Parser for a single node's program
pub struct Parser {
    /// Current line number (for error reporting)
    line_number: usize,
    /// Labels to instruction indices
    labels: HashMap<String, usize>,
    /// Accumulated instructions
    instructions: Vec<Instruction>,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            line_number: 0,
            labels: HashMap::new(),
            instructions: Vec::new(),
        }
    }

    /// Parse raw program lines into an instruction sequence
    pub fn parse(&mut self, lines: &[String]) -> Result<Vec<Instruction>, ParseError> {
        self.labels.clear();
        self.instructions.clear();

        // Uppercase, trim, drop empties
        let mut lines: Vec<String> = lines
            .iter()
            .map(|line| line.trim().to_uppercase())
            .filter(|line| !line.is_empty())
            .collect();

        self.scan_labels(&mut lines);

        for (idx, line) in lines.iter().enumerate() {
            self.line_number = idx + 1;
            self.parse_line(line)?;
        }

        Ok(std::mem::take(&mut self.instructions))
    }

    /// Bind `prefix:` labels to line indices and strip them off the lines
    fn scan_labels(&mut self, lines: &mut [String]) {
        for (idx, line) in lines.iter_mut().enumerate() {
            if let Some(pos) = line.find(':') {
                let label = line[..pos].to_string();
                self.labels.insert(label, idx);

                let rest = line[pos + 1..].trim();
                *line = if rest.is_empty() {
                    "NOP".to_string()
                } else {
                    rest.to_string()
                };
            }
        }
    }

    fn parse_line(&mut self, line: &str) -> Result<(), ParseError> {
        let mnemonic = line
            .get(..3)
            .ok_or_else(|| self.error("line too short for a mnemonic".to_string()))?;

        match mnemonic {
            "MOV" => self.parse_mov(line),
            "ADD" => self.parse_one_arg(line, Op::Add),
            "SUB" => self.parse_one_arg(line, Op::Sub),
            "JRO" => self.parse_one_arg(line, Op::Jro),
            "JMP" => self.parse_jump(line, Op::Jmp),
            "JEZ" => self.parse_jump(line, Op::Jez),
            "JNZ" => self.parse_jump(line, Op::Jnz),
            "JGZ" => self.parse_jump(line, Op::Jgz),
            "JLZ" => self.parse_jump(line, Op::Jlz),
            "SAV" => {
                self.instructions.push(Instruction::nullary(Op::Sav));
                Ok(())
            }
            "SWP" => {
                self.instructions.push(Instruction::nullary(Op::Swp));
                Ok(())
            }
            "NEG" => {
                self.instructions.push(Instruction::nullary(Op::Neg));
                Ok(())
            }
            "NOP" => {
                self.instructions.push(Instruction::nullary(Op::Nop));
                Ok(())
            }
            "RES" => {
                self.instructions.push(Instruction::nullary(Op::Res));
                Ok(())
            }
            _ => Err(self.error(format!("unknown mnemonic: {}", line))),
        }
    }

    /// `MOV src, dst` — operands split on `", "`, then `","`, then `" "`
    fn parse_mov(&mut self, line: &str) -> Result<(), ParseError> {
        let rest = line.get(4..).unwrap_or("");
        let tokens: Vec<&str> = if rest.contains(", ") {
            rest.split(", ").collect()
        } else if rest.contains(',') {
            rest.split(',').collect()
        } else {
            rest.split(' ').collect()
        };
        if tokens.len() != 2 {
            return Err(self.error(format!("malformed MOV operands: {}", line)));
        }

        let src = self.parse_location(tokens[0])?;
        let dst = match self.parse_location(tokens[1])? {
            Operand::Addr(dir) => dir,
            Operand::Imm(_) => {
                return Err(self.error("MOV destination must be a port or register".to_string()));
            }
        };

        self.instructions.push(Instruction::mov(src, dst));
        Ok(())
    }

    /// `ADD/SUB/JRO src` with an immediate or address operand
    fn parse_one_arg(&mut self, line: &str, op: Op) -> Result<(), ParseError> {
        let rest = line
            .get(4..)
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| self.error(format!("missing operand: {}", line)))?;

        let src = self.parse_location(rest)?;
        self.instructions.push(Instruction::unary(op, src));
        Ok(())
    }

    /// Conditional and unconditional jumps take a label operand
    fn parse_jump(&mut self, line: &str, op: Op) -> Result<(), ParseError> {
        let rest = line
            .get(4..)
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| self.error(format!("missing jump target: {}", line)))?;

        // Unknown targets resolve to the program start
        let target = self.labels.get(rest).copied().unwrap_or(0);
        self.instructions
            .push(Instruction::unary(op, Operand::Imm(target as i16)));
        Ok(())
    }

    fn parse_location(&self, token: &str) -> Result<Operand, ParseError> {
        if token.is_empty() {
            return Err(self.error("missing operand".to_string()));
        }
        if let Some(dir) = Dir::from_keyword(token) {
            return Ok(Operand::Addr(dir));
        }
        token
            .parse::<i16>()
            .map(Operand::Imm)
            .map_err(|_| self.error(format!("invalid operand: {}", token)))
    }

    /// Create an error at the current line
    fn error(&self, message: String) -> ParseError {
        ParseError {
            line: self.line_number,
            message,
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse error with the offending line number
#[derive(Debug, Clone)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Convenience function to parse one node program
pub fn parse_program(lines: &[String]) -> Result<Vec<Instruction>, ParseError> {
    Parser::new().parse(lines)
}
