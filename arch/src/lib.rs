pub mod grammar;
pub mod kind;
pub mod op;

pub use grammar::{Grammar, Signature, GRAMMAR, HEADER, LANGUAGE};
pub use kind::{ConstKind, Frame, Type};
pub use op::{Arg, Flow, OpKind};
