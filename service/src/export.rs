use ppgcore::inference::Prediction;
use std::io::Write;
use std::path::Path;

/// Renders the per-window predictions table in extraction order.
pub fn render_predictions_csv(predictions: &[Prediction]) -> String {
    let mut out = String::from("Window_Index,AF_Prediction,AF_Probability\n");
    for prediction in predictions {
        out.push_str(&format!(
            "{},{},{}\n",
            prediction.index, prediction.label, prediction.probability
        ));
    }
    out
}

pub fn write_predictions_csv(path: &Path, predictions: &[Prediction]) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(render_predictions_csv(predictions).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample_predictions() -> Vec<Prediction> {
        vec![
            Prediction::new(0, 0.9),
            Prediction::new(1, 0.2),
            Prediction::new(2, 0.6),
        ]
    }

    #[test]
    fn table_rows_follow_extraction_order() {
        let csv = render_predictions_csv(&sample_predictions());
        assert_eq!(
            csv,
            "Window_Index,AF_Prediction,AF_Probability\n0,1,0.9\n1,0,0.2\n2,1,0.6\n"
        );
    }

    #[test]
    fn empty_batch_renders_header_only() {
        assert_eq!(
            render_predictions_csv(&[]),
            "Window_Index,AF_Prediction,AF_Probability\n"
        );
    }

    #[test]
    fn file_round_trip_preserves_contents() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.into_temp_path();
        write_predictions_csv(&path, &sample_predictions()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Window_Index"));
        assert_eq!(written.lines().count(), 4);
    }
}
