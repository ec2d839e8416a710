use color_print::cformat;
use strum::IntoEnumIterator;

use crate::parser::Program;
use crate::stats::{Stat, Stats};

const RULE: &str = "------+-----------------------------------------------------------";

pub fn print_dump(program: &Program, stats: &Stats) {
    eprintln!("{}", RULE);
    for inst in program {
        let mark = match inst.target() {
            Some(name) if !stats.labels().is_defined(name) => cformat!(" <r,s>undefined</>"),
            _ => String::new(),
        };
        eprintln!("{:>5} | {}{}", inst.order, inst.cformat(), mark);
    }
    eprintln!("{}", RULE);
    for stat in Stat::iter() {
        eprintln!("{:>5} | {}", stats.get(stat), cformat!("<c>{}</>", stat));
    }
    eprintln!("{}", RULE);
}
