use ippcode::Flow;
use log::{debug, warn};
use serde::Deserialize;
use strum::{Display, EnumIter, EnumString};

use crate::label::{Define, Labels, Refer};
use crate::parser::Instruction;

/// A statistic that can be requested by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Loc,
    Comments,
    Labels,
    Jumps,
    Fwjumps,
    Backjumps,
    Badjumps,
}

/// Running counters of one program, updated one accepted line at a time.
#[derive(Debug, Default, Clone)]
pub struct Stats {
    pub loc: u64,
    pub comments: u64,
    pub labels: u64,
    pub jumps: u64,
    pub fwjumps: u64,
    pub backjumps: u64,
    pub badjumps: u64,
    table: Labels,
}

impl Stats {
    pub fn new() -> Self {
        Stats::default()
    }

    pub fn get(&self, stat: Stat) -> u64 {
        match stat {
            Stat::Loc => self.loc,
            Stat::Comments => self.comments,
            Stat::Labels => self.labels,
            Stat::Jumps => self.jumps,
            Stat::Fwjumps => self.fwjumps,
            Stat::Backjumps => self.backjumps,
            Stat::Badjumps => self.badjumps,
        }
    }

    pub fn count_comment(&mut self) {
        self.comments += 1;
    }

    /// Account for one accepted instruction.
    ///
    /// A reference to a label that is not defined yet counts as a bad jump
    /// until the definition shows up; at that point all of its pending
    /// references move over to `fwjumps`.
    pub fn record(&mut self, inst: &Instruction) {
        self.loc += 1;
        match inst.op.flow() {
            Flow::Label => {
                let Some(name) = inst.target() else { return };
                match self.table.define(name) {
                    Define::Resolves(count) => {
                        debug!("label `{}` resolves {} forward jump(s)", name, count);
                        self.fwjumps += count;
                        self.badjumps -= count;
                        self.labels += 1;
                    }
                    Define::New => self.labels += 1,
                    Define::Duplicate => {
                        warn!("label `{}` redefined at order {}", name, inst.order)
                    }
                }
            }
            Flow::Jump => {
                self.jumps += 1;
                let Some(name) = inst.target() else { return };
                match self.table.refer(name) {
                    Refer::Backward => self.backjumps += 1,
                    Refer::Pending => self.badjumps += 1,
                }
            }
            Flow::Return => self.jumps += 1,
            Flow::Straight => {}
        }
    }

    /// Report jump targets that were never defined.
    pub fn finish(&self) {
        for (name, count) in self.table.pending() {
            warn!("undefined label `{}` referenced {} time(s)", name, count);
        }
    }

    pub fn labels(&self) -> &Labels {
        &self.table
    }
}
