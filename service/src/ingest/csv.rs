use ppgcore::prelude::PipelineError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads the first column as the raw signal. A single leading header row is
/// tolerated; unparseable cells become NaN for the sanitizer to repair.
pub fn read_csv_signal(path: &Path) -> anyhow::Result<Vec<f64>> {
    let reader = BufReader::new(File::open(path)?);
    let mut samples = Vec::new();
    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let cell = line.split(',').next().unwrap_or("").trim();
        if cell.is_empty() {
            continue;
        }
        match cell.parse::<f64>() {
            Ok(value) => samples.push(value),
            Err(_) if line_index == 0 && samples.is_empty() => continue,
            Err(_) => samples.push(f64::NAN),
        }
    }
    if samples.is_empty() {
        return Err(
            PipelineError::UnsupportedFormat("no numeric rows in the first CSV column".into())
                .into(),
        );
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> tempfile::TempPath {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(contents.as_bytes()).unwrap();
        temp.into_temp_path()
    }

    #[test]
    fn first_column_is_extracted() {
        let path = write_temp("0.1,9\n0.2,8\n0.3,7\n");
        let samples = read_csv_signal(&path).unwrap();
        assert_eq!(samples, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn header_row_is_skipped() {
        let path = write_temp("ppg,quality\n1.5\n2.5\n");
        let samples = read_csv_signal(&path).unwrap();
        assert_eq!(samples, vec![1.5, 2.5]);
    }

    #[test]
    fn corrupt_cells_become_nan() {
        let path = write_temp("1.0\n--\n3.0\n");
        let samples = read_csv_signal(&path).unwrap();
        assert_eq!(samples.len(), 3);
        assert!(samples[1].is_nan());
    }

    #[test]
    fn empty_file_is_unsupported() {
        let path = write_temp("");
        assert!(read_csv_signal(&path).is_err());
    }
}
