use std::fmt;

use ippcode::LANGUAGE;

use crate::operand::Operand;
use crate::parser::{Instruction, Program};

const INDENT: &str = "  ";

/// Replace the characters that cannot appear raw in element text.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Display adapter rendering a program as an XML document.
pub struct Xml<'a>(pub &'a Program);

impl fmt::Display for Xml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        if self.0.is_empty() {
            return writeln!(f, r#"<program language="{}"/>"#, LANGUAGE);
        }
        writeln!(f, r#"<program language="{}">"#, LANGUAGE)?;
        for inst in self.0 {
            write_instruction(f, inst)?;
        }
        writeln!(f, "</program>")
    }
}

fn write_instruction(f: &mut fmt::Formatter<'_>, inst: &Instruction) -> fmt::Result {
    let open = format!(
        r#"{}<instruction order="{}" opcode="{}""#,
        INDENT,
        inst.order,
        inst.op.name()
    );
    if inst.args.is_empty() {
        return writeln!(f, "{}/>", open);
    }
    writeln!(f, "{}>", open)?;
    for (idx, arg) in inst.args.iter().enumerate() {
        write_arg(f, idx + 1, arg)?;
    }
    writeln!(f, "{}</instruction>", INDENT)
}

fn write_arg(f: &mut fmt::Formatter<'_>, pos: usize, arg: &Operand) -> fmt::Result {
    let text = escape(&arg.payload());
    let indent = INDENT.repeat(2);
    if text.is_empty() {
        writeln!(f, r#"{}<arg{} type="{}"/>"#, indent, pos, arg.kind())
    } else {
        writeln!(
            f,
            r#"{}<arg{} type="{}">{}</arg{}>"#,
            indent,
            pos,
            arg.kind(),
            text,
            pos
        )
    }
}

impl Program {
    pub fn to_xml(&self) -> String {
        Xml(self).to_string()
    }
}
