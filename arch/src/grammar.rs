use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use crate::op::{Arg, OpKind};

/// First non-blank, non-comment line of every source program.
pub const HEADER: &str = ".IPPcode22";

/// Value of the `language` attribute on the serialized program.
pub const LANGUAGE: &str = "IPPcode22";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub op: OpKind,
    pub args: Vec<Arg>,
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

/// The closed instruction catalogue. Built once, read-only afterwards.
#[derive(Debug)]
pub struct Grammar(HashMap<OpKind, Signature>);

impl Grammar {
    fn build() -> Self {
        Grammar(
            OpKind::iter()
                .map(|op| {
                    let args = op.arg_field();
                    (op, Signature { op, args })
                })
                .collect(),
        )
    }

    /// Signature of the instruction whose name is exactly `name`, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&Signature> {
        OpKind::parse(name).ok().and_then(|op| self.0.get(&op))
    }

    pub fn get(&self, op: OpKind) -> Option<&Signature> {
        self.0.get(&op)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub static GRAMMAR: Lazy<Grammar> = Lazy::new(Grammar::build);
