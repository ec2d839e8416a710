use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum OpKind {
    // Frames & calls
    MOVE,
    CREATEFRAME,
    PUSHFRAME,
    POPFRAME,
    DEFVAR,
    CALL,
    RETURN,

    // Data stack
    PUSHS,
    POPS,

    // Arithmetic, relational, boolean & conversion
    ADD,
    SUB,
    MUL,
    DIV,
    IDIV,
    LT,
    GT,
    EQ,
    AND,
    OR,
    NOT,
    INT2CHAR,
    STRI2INT,
    INT2FLOAT,
    FLOAT2INT,

    // I/O
    READ,
    WRITE,

    // Strings
    CONCAT,
    STRLEN,
    GETCHAR,
    SETCHAR,

    // Types
    TYPE,

    // Flow control
    LABEL,
    JUMP,
    JUMPIFEQ,
    JUMPIFNEQ,
    EXIT,

    // Debug
    DPRINT,
    BREAK,

    // Stack variants
    CLEARS,
    ADDS,
    SUBS,
    MULS,
    IDIVS,
    LTS,
    GTS,
    EQS,
    ANDS,
    ORS,
    NOTS,
    INT2CHARS,
    STRI2INTS,
    JUMPIFEQS,
    JUMPIFNEQS,
}

impl OpKind {
    /// Case-insensitive, whole-token lookup: `movex` is not `MOVE`.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Operand constraint at one position of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Arg {
    VAR,
    SYMB,
    LABEL,
    TYPE,
}

impl OpKind {
    pub fn arg_field(&self) -> Vec<Arg> {
        use OpKind::*;
        match self {
            MOVE => vec![Arg::VAR, Arg::SYMB],
            CREATEFRAME => vec![],
            PUSHFRAME => vec![],
            POPFRAME => vec![],
            DEFVAR => vec![Arg::VAR],
            CALL => vec![Arg::LABEL],
            RETURN => vec![],

            PUSHS => vec![Arg::SYMB],
            POPS => vec![Arg::VAR],

            ADD => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            SUB => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            MUL => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            DIV => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            IDIV => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            LT => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            GT => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            EQ => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            AND => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            OR => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            NOT => vec![Arg::VAR, Arg::SYMB],
            INT2CHAR => vec![Arg::VAR, Arg::SYMB],
            STRI2INT => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            INT2FLOAT => vec![Arg::VAR, Arg::SYMB],
            FLOAT2INT => vec![Arg::VAR, Arg::SYMB],

            READ => vec![Arg::VAR, Arg::TYPE],
            WRITE => vec![Arg::SYMB],

            CONCAT => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            STRLEN => vec![Arg::VAR, Arg::SYMB],
            GETCHAR => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],
            SETCHAR => vec![Arg::VAR, Arg::SYMB, Arg::SYMB],

            TYPE => vec![Arg::VAR, Arg::SYMB],

            LABEL => vec![Arg::LABEL],
            JUMP => vec![Arg::LABEL],
            JUMPIFEQ => vec![Arg::LABEL, Arg::SYMB, Arg::SYMB],
            JUMPIFNEQ => vec![Arg::LABEL, Arg::SYMB, Arg::SYMB],
            EXIT => vec![Arg::SYMB],

            DPRINT => vec![Arg::SYMB],
            BREAK => vec![],

            CLEARS => vec![],
            ADDS => vec![],
            SUBS => vec![],
            MULS => vec![],
            IDIVS => vec![],
            LTS => vec![],
            GTS => vec![],
            EQS => vec![],
            ANDS => vec![],
            ORS => vec![],
            NOTS => vec![],
            INT2CHARS => vec![],
            STRI2INTS => vec![],
            JUMPIFEQS => vec![Arg::LABEL],
            JUMPIFNEQS => vec![Arg::LABEL],
        }
    }
}

/// How an instruction takes part in label bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Defines the label named by its first operand.
    Label,
    /// Transfers control to the label named by its first operand.
    Jump,
    /// Transfers control without naming a label.
    Return,
    Straight,
}

impl OpKind {
    pub fn flow(&self) -> Flow {
        use OpKind::*;
        match self {
            LABEL => Flow::Label,
            CALL | JUMP | JUMPIFEQ | JUMPIFNEQ | JUMPIFEQS | JUMPIFNEQS => Flow::Jump,
            RETURN => Flow::Return,
            _ => Flow::Straight,
        }
    }
}
