//! Loading of coordinate tracks from plain text files.
//!
//! A track file holds one `latitude;longitude` record per line and no header.
//! Records that do not consist of exactly two fields are skipped, a field that
//! is not a decimal number fails the whole load.

use std::{error::Error, fmt, fs::File, io, num::ParseFloatError, path::Path};

use utility::geo::Coordinate;

use crate::line::CoordinateLine;

#[derive(Debug)]
pub enum TrackError {
    Io(io::Error),
    Csv(csv::Error),
    Parse {
        line: u64,
        value: String,
        why: ParseFloatError,
    },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(why) => write!(f, "can not read track: {}", why),
            Self::Csv(why) => write!(f, "can not read track: {}", why),
            Self::Parse { line, value, why } => {
                write!(f, "line {}: '{}' is not a number: {}", line, value, why)
            }
        }
    }
}

impl Error for TrackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(why) => Some(why),
            Self::Csv(why) => Some(why),
            Self::Parse { why, .. } => Some(why),
        }
    }
}

impl From<io::Error> for TrackError {
    fn from(why: io::Error) -> Self {
        Self::Io(why)
    }
}

impl From<csv::Error> for TrackError {
    fn from(why: csv::Error) -> Self {
        Self::Csv(why)
    }
}

/// Reads a track, keeping the record order as point order.
pub fn read_track<R: io::Read>(reader: R) -> Result<CoordinateLine, TrackError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        // trailing empty fields do not count, "49.0;" is a single field record
        let mut fields = record.iter().collect::<Vec<_>>();
        while fields.last() == Some(&"") {
            fields.pop();
        }
        if fields.len() != 2 {
            log::trace!("skipping line {} with {} fields", line, fields.len());
            continue;
        }

        let latitude = parse_field(fields[0], line)?;
        let longitude = parse_field(fields[1], line)?;
        points.push(Coordinate::new(latitude, longitude));
    }
    Ok(CoordinateLine::new(points))
}

pub fn load_track<P: AsRef<Path>>(path: P) -> Result<CoordinateLine, TrackError> {
    let file = File::open(path)?;
    read_track(io::BufReader::new(file))
}

/// Loads a track, any failure is logged and results in an empty line.
pub fn load_track_or_empty<P: AsRef<Path>>(path: P) -> CoordinateLine {
    let path = path.as_ref();
    load_track(path).unwrap_or_else(|why| {
        log::error!("load {}: {}", path.display(), why);
        CoordinateLine::empty()
    })
}

fn parse_field(value: &str, line: u64) -> Result<f64, TrackError> {
    value.trim().parse().map_err(|why| TrackError::Parse {
        line,
        value: value.to_owned(),
        why,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_lines_are_skipped() {
        let input = "49.0;8.4\n49.1;8.5\nbad\n49.2;8.6\n";
        let line = read_track(input.as_bytes()).unwrap();
        assert_eq!(
            line.points(),
            &[
                Coordinate::new(49.0, 8.4),
                Coordinate::new(49.1, 8.5),
                Coordinate::new(49.2, 8.6),
            ]
        );
    }

    #[test]
    fn records_with_more_fields_are_skipped() {
        let input = "49.0;8.4;1\n49.1;8.5\n49.2;\n";
        let line = read_track(input.as_bytes()).unwrap();
        assert_eq!(line.points(), &[Coordinate::new(49.1, 8.5)]);
    }

    #[test]
    fn non_numeric_field_fails_the_load() {
        let input = "49.0;notanumber\n49.1;8.5\n";
        let result = read_track(input.as_bytes());
        match result {
            Err(TrackError::Parse { line, value, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(value, "notanumber");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_falls_back_to_empty_line() {
        let line = load_track_or_empty("/this/track/does/not/exist.csv");
        assert!(line.is_empty());
    }

    #[test]
    fn unparsable_file_falls_back_to_empty_line() {
        let path = std::env::temp_dir().join(format!("track-{}-notanumber.csv", std::process::id()));
        std::fs::write(&path, "49.0;notanumber\n49.1;8.5\n").unwrap();

        assert!(matches!(load_track(&path), Err(TrackError::Parse { line: 1, .. })));
        let line = load_track_or_empty(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        let input = " 49.0 ; 8.4 \r\n";
        let line = read_track(input.as_bytes()).unwrap();
        assert_eq!(line.points(), &[Coordinate::new(49.0, 8.4)]);
    }

    #[test]
    fn empty_input_gives_empty_line() {
        let line = read_track("".as_bytes()).unwrap();
        assert!(line.is_empty());
        assert!(!line.is_closed());
    }
}
