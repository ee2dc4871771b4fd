//! # Flat Text Format
//!
//! One record per line:
//!
//! ```text
//! SFO  San Francisco;   37.62  -122.38      (source: any whitespace)
//! SFO\tSan Francisco;\t37.62\t-122.38       (sink: tabs, two decimals)
//! ```
//!
//! The sink is valid source input, so a saved file can be loaded again.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use aerodex_core::error::ResultExt;
use aerodex_core::{Code, Error, Record, Result};

fn malformed(line: usize, message: impl Into<String>) -> Error {
    Error::MalformedInput {
        line,
        message: message.into(),
    }
}

/// Parse one source line. `line_no` is 1-based and only used in errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<Record> {
    let line = line.trim();
    let split = line
        .find(char::is_whitespace)
        .ok_or_else(|| malformed(line_no, "expected code followed by city"))?;
    let (code, rest) = line.split_at(split);
    let code = Code::new(code).map_err(|e| malformed(line_no, e.to_string()))?;

    let (city, coords) = rest
        .split_once(';')
        .ok_or_else(|| malformed(line_no, "missing ';' after city"))?;
    let city = city.trim();
    if city.is_empty() {
        return Err(malformed(line_no, "empty city"));
    }

    let mut numbers = coords.split_whitespace().map(|tok| {
        tok.parse::<f64>()
            .map_err(|_| malformed(line_no, format!("invalid coordinate {:?}", tok)))
    });
    let latitude = numbers
        .next()
        .ok_or_else(|| malformed(line_no, "missing latitude"))??;
    let longitude = numbers
        .next()
        .ok_or_else(|| malformed(line_no, "missing longitude"))??;
    if numbers.next().is_some() {
        return Err(malformed(line_no, "unexpected text after longitude"));
    }

    Ok(Record::new(code, city, latitude, longitude))
}

/// Read every record until end of stream. Blank lines are skipped.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(&line, idx + 1)?);
    }
    Ok(records)
}

pub fn read_file(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)
        .map_err(Error::from)
        .with_context(|| format!("opening {}", path.display()))?;
    let records = read_records(BufReader::new(file))?;
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Sink line without the trailing newline
pub fn format_line(record: &Record) -> String {
    format!(
        "{}\t{};\t{:.2}\t{:.2}",
        record.code(),
        record.city(),
        record.latitude(),
        record.longitude()
    )
}

/// Write records one per line; returns how many were written
pub fn write_records<'a, W, I>(mut writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut written = 0;
    for record in records {
        writeln!(writer, "{}", format_line(record))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

pub fn write_file<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let file = File::create(path)
        .map_err(Error::from)
        .with_context(|| format!("creating {}", path.display()))?;
    write_records(BufWriter::new(file), records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_line() {
        let rec = parse_line("sfo   San Francisco;   37.62  -122.38", 1).unwrap();
        assert_eq!(rec.code().as_str(), "SFO");
        assert_eq!(rec.city(), "San Francisco");
        assert_eq!(rec.latitude(), 37.62);
        assert_eq!(rec.longitude(), -122.38);
    }

    #[test]
    fn test_parse_sink_line() {
        let rec = parse_line("LAX\tLos Angeles;\t33.94\t-118.41", 1).unwrap();
        assert_eq!(rec.city(), "Los Angeles");
        assert_eq!(format_line(&rec), "LAX\tLos Angeles;\t33.94\t-118.41");
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let cases = [
            "SFO",
            "SFO San Francisco 37.62 -122.38",
            "SFO San Francisco; 37.62",
            "SFO San Francisco; north -122.38",
            "SFO San Francisco; 1 2 3",
            "SFOO San Francisco; 1 2",
            "SFO ; 1 2",
        ];
        for case in cases {
            match parse_line(case, 7) {
                Err(Error::MalformedInput { line, .. }) => assert_eq!(line, 7, "{}", case),
                other => panic!("{:?} parsed as {:?}", case, other),
            }
        }
    }

    #[test]
    fn test_read_records_skips_blank_lines() {
        let input = "SFO San Francisco; 37.62 -122.38\n\n   \nJFK New York; 40.64 -73.78\n";
        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].code().as_str(), "JFK");
    }

    #[test]
    fn test_read_records_reports_line_number() {
        let input = "SFO San Francisco; 37.62 -122.38\n\nJFK New York 40.64 -73.78\n";
        match read_records(input.as_bytes()) {
            Err(Error::MalformedInput { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_write_records() {
        let recs = vec![
            Record::new(Code::new("SFO").unwrap(), "San Francisco", 37.615, -122.39),
            Record::new(Code::new("JFK").unwrap(), "New York", 40.64, -73.78),
        ];
        let mut out = Vec::new();
        let n = write_records(&mut out, &recs).unwrap();
        assert_eq!(n, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("SFO\tSan Francisco;\t37."));
    }
}
