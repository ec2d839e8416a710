use std::io::BufRead;

use color_print::cformat;
use ippcode::{Grammar, OpKind, HEADER};
use log::{debug, info};

use crate::error::{Error, LineError};
use crate::operand::Operand;
use crate::stats::Stats;

// ----------------------------------------------------------------------------
// Instruction

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// 1-based position among accepted instructions.
    pub order: usize,
    pub op: OpKind,
    pub args: Vec<Operand>,
}

impl Instruction {
    /// Label named by the first operand, if it is one.
    pub fn target(&self) -> Option<&str> {
        match self.args.first() {
            Some(Operand::Label(name)) => Some(name),
            _ => None,
        }
    }

    pub fn cformat(&self) -> String {
        let args: Vec<String> = self.args.iter().map(Operand::cformat).collect();
        cformat!("<red>{:<11}</>{}", self.op.name(), args.join(" "))
    }
}

// ----------------------------------------------------------------------------
// Program

/// Accepted instructions in source order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Program(Vec<Instruction>);

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Instruction with the given 1-based order.
    pub fn get(&self, order: usize) -> Option<&Instruction> {
        order.checked_sub(1).and_then(|idx| self.0.get(idx))
    }

    fn push(&mut self, inst: Instruction) {
        self.0.push(inst);
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ----------------------------------------------------------------------------
// Line validator

/// What a single source line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Blank,
    Comment,
    Header,
    Accepted(Instruction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingHeader,
    InProgram,
    /// A fatal line was seen; no further input is accepted.
    Done,
}

pub struct Parser<'g> {
    grammar: &'g Grammar,
    state: State,
    program: Program,
    stats: Stats,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Parser {
            grammar,
            state: State::AwaitingHeader,
            program: Program::new(),
            stats: Stats::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Process one raw source line. Any error is fatal for the whole run.
    pub fn feed(&mut self, raw: &str) -> Result<Outcome, Error> {
        if self.state == State::Done {
            return Err(Error::Halted);
        }
        let outcome = self.step(raw);
        if outcome.is_err() {
            self.state = State::Done;
        }
        outcome
    }

    fn step(&mut self, raw: &str) -> Result<Outcome, Error> {
        let code = match raw.split_once('#') {
            Some((code, _)) => {
                self.stats.count_comment();
                code.trim()
            }
            None => raw.trim(),
        };

        if code.is_empty() {
            return Ok(if raw.contains('#') {
                Outcome::Comment
            } else {
                Outcome::Blank
            });
        }

        if code == HEADER {
            self.state = State::InProgram;
            return Ok(Outcome::Header);
        }

        if self.state == State::AwaitingHeader {
            return Err(Error::MissingHeader);
        }

        let inst = self.validate(code)?;
        debug!("#{} {:?} {:?}", inst.order, inst.op, inst.args);
        self.stats.record(&inst);
        self.program.push(inst.clone());
        Ok(Outcome::Accepted(inst))
    }

    /// Match a comment-free, trimmed line against the grammar.
    fn validate(&self, code: &str) -> Result<Instruction, Error> {
        let mut tokens = code.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let sig = self
            .grammar
            .lookup(name)
            .ok_or_else(|| Error::UnknownInstruction(name.to_string()))?;

        let tokens: Vec<&str> = tokens.collect();
        if tokens.len() != sig.arity() {
            return Err(Error::MalformedSyntax(
                sig.op,
                format!("expected {} operand(s), found {}", sig.arity(), tokens.len()),
            ));
        }

        let args = sig
            .args
            .iter()
            .zip(&tokens)
            .map(|(&arg, &tok)| {
                Operand::parse(arg, tok).ok_or_else(|| {
                    Error::MalformedSyntax(sig.op, format!("cannot parse `{}` as {}", tok, arg))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Instruction {
            order: self.program.len() + 1,
            op: sig.op,
            args,
        })
    }

    pub fn finish(self) -> (Program, Stats) {
        info!(
            "accepted {} instruction(s), {} comment line(s)",
            self.program.len(),
            self.stats.comments
        );
        self.stats.finish();
        (self.program, self.stats)
    }
}

/// Read a whole program, stopping at the first fatal line.
///
/// Lines are read as bytes so that a line which is not UTF-8 is reported
/// as a lexical error on that line rather than as a read failure.
pub fn parse<R: BufRead>(grammar: &Grammar, mut reader: R) -> Result<(Program, Stats), LineError> {
    let mut parser = Parser::new(grammar);
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| LineError::new(line_no + 1, "", Error::FileRead(e)))?;
        if read == 0 {
            break;
        }
        line_no += 1;
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        let raw = String::from_utf8(buf.clone()).map_err(|e| {
            let lossy = String::from_utf8_lossy(e.as_bytes()).into_owned();
            LineError::new(line_no, &lossy, Error::InvalidEncoding(e))
        })?;
        parser
            .feed(&raw)
            .map_err(|e| LineError::new(line_no, &raw, e))?;
    }
    Ok(parser.finish())
}
