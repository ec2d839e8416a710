pub mod config;
pub mod error;
pub mod label;
pub mod operand;
pub mod parser;
pub mod report;
pub mod stats;
pub mod util;
pub mod xml;

pub use config::Config;
pub use error::{Error, ExitCode, LineError};
pub use operand::{Const, Operand};
pub use parser::{parse, Instruction, Outcome, Parser, Program};
pub use report::{StatsGroup, StatsRequest, StatsSink};
pub use stats::{Stat, Stats};
