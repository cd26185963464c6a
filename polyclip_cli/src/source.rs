//! Text polygon input: one polygon per line, whitespace separated `x y` pairs.
use crate::error::CliError;
use polyclip::{
    core::math::Vector2,
    ops::PolygonSource,
    polygon::SimplePolygon,
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

/// Parses polygons from `reader`, skipping blank lines. Line numbers in errors start at 1.
pub fn parse_polygons<R>(reader: R) -> Result<Vec<SimplePolygon>, CliError>
where
    R: BufRead,
{
    let mut polygons = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let values = line
            .split_whitespace()
            .map(|s| {
                s.parse::<f64>().map_err(|e| CliError::Parse {
                    line: line_number,
                    message: format!("invalid number {:?}: {}", s, e),
                })
            })
            .collect::<Result<Vec<f64>, CliError>>()?;

        if values.len() % 2 != 0 {
            return Err(CliError::Parse {
                line: line_number,
                message: format!("odd number of coordinates ({})", values.len()),
            });
        }

        polygons.push(
            values
                .chunks_exact(2)
                .map(|xy| Vector2::new(xy[0], xy[1]))
                .collect(),
        );
    }

    log::debug!("parsed {} polygons", polygons.len());
    Ok(polygons)
}

/// Polygons read from a text file.
#[derive(Debug, Clone)]
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PolygonSource<f64> for TextFileSource {
    type Error = CliError;

    fn polygons(&mut self) -> Result<Vec<SimplePolygon>, Self::Error> {
        let file = File::open(&self.path).map_err(|source| CliError::Open {
            path: self.path.clone(),
            source,
        })?;
        parse_polygons(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_polygon_per_line() {
        let input = "0 0 10 0 10 10 0 10\n\n  5 5 15 5\t15 15 5 15  \n";
        let polygons = parse_polygons(input.as_bytes()).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].vertex_count(), 4);
        assert_eq!(polygons[1][2], Vector2::new(15.0, 15.0));
    }

    #[test]
    fn accepts_special_values() {
        // rejected later by validation, not by the parser
        let polygons = parse_polygons("0 0 inf 0 1 NaN".as_bytes()).unwrap();
        assert_eq!(polygons[0].vertex_count(), 3);
        assert!(polygons[0][1].x.is_infinite());
        assert!(polygons[0][2].y.is_nan());
    }

    #[test]
    fn odd_count_reports_line() {
        let err = parse_polygons("0 0 1 0 1 1\n\n0 0 1".as_bytes()).unwrap_err();
        match err {
            CliError::Parse { line, .. } => assert_eq!(line, 3),
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn bad_number_reports_line() {
        let err = parse_polygons("0 0 1 0 1 1\n0 0 1 x 1 1".as_bytes()).unwrap_err();
        match err {
            CliError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("\"x\""));
            }
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn missing_file() {
        let mut source = TextFileSource::new("this/file/does/not/exist.txt");
        assert!(matches!(source.polygons(), Err(CliError::Open { .. })));
    }
}
