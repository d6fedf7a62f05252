use window_detector::classifier::LinearClassifier;
use window_detector::config::detect;
use window_detector::diagnostics::DetectionReport;
use window_detector::features::HogExtractor;
use window_detector::image::{load_grayscale_image, save_annotated, write_json_file};
use window_detector::Detector;
use std::env;
use std::path::Path;

fn main() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: detect_demo <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = detect::load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input_path)?;
    let model = LinearClassifier::load(&config.model_path)?;
    let hog = HogExtractor::new(config.hog)?;
    if model.dim() != config.hog.feature_len() {
        return Err(format!(
            "Model {} has {} weights but the HOG descriptor has {} features",
            config.model_path.display(),
            model.dim(),
            config.hog.feature_len()
        ));
    }

    let detector = Detector::new(hog, model, config.params.clone())
        .map_err(|e| format!("Failed to build detector: {e}"))?;
    let report = detector
        .detect_multi_scale_with_diagnostics(gray.as_view())
        .map_err(|e| format!("Detection failed: {e}"))?;

    print_text_summary(&report);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    if let Some(path) = &config.output.annotated_image {
        save_annotated(&gray.as_view(), &report.boxes, path)?;
        println!("Annotated image written to {}", path.display());
    }
    Ok(())
}

fn print_text_summary(report: &DetectionReport) {
    println!("Detection summary");
    println!("  boxes: {}", report.boxes.len());
    println!("  raw hits: {}", report.raw_hits());
    println!("  latency_ms: {:.3}", report.timings.total_ms);
    println!();
    print!("{}", report.summary());
}
