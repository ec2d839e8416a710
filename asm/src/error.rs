use color_print::ceprintln;
use ippcode::OpKind;
use num_enum::IntoPrimitive;
use thiserror::Error;

/// Process exit status for each failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum ExitCode {
    Ok = 0,
    WrongParams = 10,
    InputFile = 11,
    OutputFile = 12,
    MissingHeader = 21,
    UnknownInstruction = 22,
    Syntax = 23,
    Internal = 99,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        i32::from(u8::from(self))
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing header `{}` before the first instruction", ippcode::HEADER)]
    MissingHeader,

    #[error("Unknown instruction: `{0}`")]
    UnknownInstruction(String),

    #[error("Malformed `{0}`: {1}")]
    MalformedSyntax(OpKind, String),

    #[error("Line is not valid UTF-8")]
    InvalidEncoding(#[source] std::string::FromUtf8Error),

    #[error("Parser already stopped at an earlier fatal line")]
    Halted,

    #[error("Statistics file requested more than once: {0}")]
    DuplicateOutputDestination(String),

    #[error("Failed to write statistics file: {0}")]
    OutputDestinationUnavailable(String, #[source] std::io::Error),

    #[error("Unknown statistic: `{0}`")]
    UnknownStat(String),

    #[error("Failed to read config file: {0}")]
    ConfigRead(String, #[source] std::io::Error),

    #[error("Failed to load config file: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::MissingHeader => ExitCode::MissingHeader,
            Error::UnknownInstruction(_) => ExitCode::UnknownInstruction,
            Error::MalformedSyntax(_, _) | Error::InvalidEncoding(_) => ExitCode::Syntax,
            Error::Halted => ExitCode::Internal,
            Error::DuplicateOutputDestination(_) => ExitCode::OutputFile,
            Error::OutputDestinationUnavailable(_, _) => ExitCode::Internal,
            Error::UnknownStat(_) | Error::ConfigRead(_, _) | Error::Config(_, _) => {
                ExitCode::WrongParams
            }
            Error::FileOpen(_, _) | Error::FileRead(_) => ExitCode::InputFile,
            Error::FileCreate(_, _) | Error::FileWrite(_, _) => ExitCode::OutputFile,
        }
    }

    pub fn print(&self) {
        ceprintln!("<red,bold>error</>: {}", self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            ceprintln!("  <blue>caused by</>: {}", cause);
            source = cause.source();
        }
    }

    /// Print the message followed by a `file:line_no` pointer and the offending source line.
    pub fn print_diag(&self, file: &str, line_no: usize, line_content: &str) {
        ceprintln!("<red,bold>error</>: {}", self);
        ceprintln!("     <blue>--></> <underline>{}:{}</>", file, line_no);
        ceprintln!("      <blue>|</>");
        ceprintln!(" <blue>{:>4} |</> {}", line_no, line_content);
        ceprintln!("      <blue>|</>");
    }
}

/// A fatal condition raised while reading the source, with its location.
#[derive(Error, Debug)]
#[error("line {line_no}: {error}")]
pub struct LineError {
    /// 1-based line number in the source.
    pub line_no: usize,
    pub raw: String,
    #[source]
    pub error: Error,
}

impl LineError {
    pub fn new(line_no: usize, raw: &str, error: Error) -> Self {
        LineError {
            line_no,
            raw: raw.to_string(),
            error,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.error.exit_code()
    }

    pub fn print_diag(&self, file: &str) {
        self.error.print_diag(file, self.line_no, &self.raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_core_kind() {
        let io = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let codes = [
            Error::MissingHeader.exit_code(),
            Error::UnknownInstruction("MOVEX".into()).exit_code(),
            Error::MalformedSyntax(OpKind::MOVE, String::new()).exit_code(),
            Error::DuplicateOutputDestination("a".into()).exit_code(),
            Error::OutputDestinationUnavailable("a".into(), io()).exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::Ok.code(), 0);
        assert_eq!(Error::MissingHeader.exit_code().code(), 21);
        assert_eq!(Error::UnknownInstruction("X".into()).exit_code().code(), 22);
        assert_eq!(
            Error::MalformedSyntax(OpKind::MOVE, String::new()).exit_code().code(),
            23
        );
        assert_eq!(Error::UnknownStat("x".into()).exit_code().code(), 10);
    }

    #[test]
    fn line_error_message() {
        let err = LineError::new(3, "MOVEX GF@x", Error::UnknownInstruction("MOVEX".into()));
        assert_eq!(err.to_string(), "line 3: Unknown instruction: `MOVEX`");
        assert_eq!(err.exit_code(), ExitCode::UnknownInstruction);
    }
}
