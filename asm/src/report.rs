use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use log::info;
use serde::Deserialize;

use crate::error::Error;
use crate::stats::{Stat, Stats};

/// One statistics file and the counters written to it, in order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsGroup {
    pub file: String,
    #[serde(default)]
    pub flags: Vec<Stat>,
}

impl FromStr for StatsGroup {
    type Err = Error;

    /// `FILE=stat,stat,...`; `FILE` alone requests an empty file.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (file, list) = s.split_once('=').unwrap_or((s, ""));
        let flags = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                name.parse::<Stat>()
                    .map_err(|_| Error::UnknownStat(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StatsGroup {
            file: file.to_string(),
            flags,
        })
    }
}

/// Every statistics file requested for a run, keyed by path.
#[derive(Debug, Default)]
pub struct StatsRequest(IndexMap<String, Vec<Stat>>);

impl StatsRequest {
    pub fn new() -> Self {
        StatsRequest::default()
    }

    pub fn append(&mut self, group: StatsGroup) -> Result<(), Error> {
        if self.0.contains_key(&group.file) {
            return Err(Error::DuplicateOutputDestination(group.file));
        }
        self.0.insert(group.file, group.flags);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// File body: one counter value per line.
    pub fn render(flags: &[Stat], stats: &Stats) -> String {
        flags
            .iter()
            .map(|&stat| format!("{}\n", stats.get(stat)))
            .collect()
    }

    /// Open every destination before anything is written. If one cannot be
    /// opened, files created by this call are removed again.
    pub fn open(&self) -> Result<StatsSink, Error> {
        let mut sink = StatsSink(Vec::with_capacity(self.0.len()));
        for (path, flags) in &self.0 {
            let created = !Path::new(path).exists();
            match OpenOptions::new().write(true).create(true).open(path) {
                Ok(file) => sink.0.push(Destination {
                    path: path.clone(),
                    flags: flags.clone(),
                    file,
                    created,
                }),
                Err(e) => {
                    sink.discard();
                    return Err(Error::OutputDestinationUnavailable(path.clone(), e));
                }
            }
        }
        Ok(sink)
    }

    pub fn flush(&self, stats: &Stats) -> Result<(), Error> {
        self.open()?.write(stats)
    }
}

#[derive(Debug)]
struct Destination {
    path: String,
    flags: Vec<Stat>,
    file: File,
    created: bool,
}

/// Statistics files opened by [`StatsRequest::open`], not yet written.
#[derive(Debug)]
pub struct StatsSink(Vec<Destination>);

impl StatsSink {
    pub fn write(self, stats: &Stats) -> Result<(), Error> {
        for mut dest in self.0 {
            let body = StatsRequest::render(&dest.flags, stats);
            dest.file
                .set_len(0)
                .and_then(|_| dest.file.write_all(body.as_bytes()))
                .map_err(|e| Error::OutputDestinationUnavailable(dest.path.clone(), e))?;
            info!("wrote {} statistic(s) to {}", dest.flags.len(), dest.path);
        }
        Ok(())
    }

    /// Drop the handles and remove the files that did not exist before.
    pub fn discard(self) {
        for dest in self.0 {
            if dest.created {
                drop(dest.file);
                let _ = std::fs::remove_file(&dest.path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_group {
        ($($name:ident: $src:expr => ($file:expr, [$($stat:ident),*]),)*) => {
            $(
                #[test]
                fn $name() {
                    let group: StatsGroup = $src.parse().unwrap();
                    assert_eq!(group.file, $file);
                    assert_eq!(group.flags, vec![$(Stat::$stat),*]);
                }
            )*
        }
    }

    test_group! {
        group_single: "out.txt=loc" => ("out.txt", [Loc]),
        group_many: "s=badjumps,loc,loc" => ("s", [Badjumps, Loc, Loc]),
        group_spaces: "s=jumps, fwjumps" => ("s", [Jumps, Fwjumps]),
        group_bare: "s" => ("s", []),
        group_empty_list: "s=" => ("s", []),
    }

    #[test]
    fn unknown_stat_is_rejected() {
        let err = "s=loc,lines".parse::<StatsGroup>().unwrap_err();
        assert!(matches!(err, Error::UnknownStat(name) if name == "lines"));
    }

    #[test]
    fn duplicate_destination() {
        let mut request = StatsRequest::new();
        request.append("a=loc".parse().unwrap()).unwrap();
        request.append("b=loc".parse().unwrap()).unwrap();
        let err = request.append("a=jumps".parse().unwrap()).unwrap_err();
        assert!(matches!(err, Error::DuplicateOutputDestination(file) if file == "a"));
        assert_eq!(request.len(), 2);
    }

    #[test]
    fn render_in_request_order() {
        let mut stats = Stats::new();
        stats.loc = 4;
        stats.comments = 2;
        let body = StatsRequest::render(&[Stat::Comments, Stat::Loc, Stat::Comments], &stats);
        assert_eq!(body, "2\n4\n2\n");
    }
}
