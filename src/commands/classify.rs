//! Classify command implementation

use crate::cli::args::{ClassifyArgs, OutputFormat};
use crate::cli::output::{print_output, ClassificationReport};
use crate::config::Config;
use crate::error::Result;
use crate::signal::{NoiseClassifier, SmoothedSignal};

/// Execute the classify command
pub fn run_classify(args: &ClassifyArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let report = classify(args, config);
    print_output(&report, format)?;
    Ok(())
}

fn classify(args: &ClassifyArgs, config: &Config) -> ClassificationReport {
    let classifier = NoiseClassifier::from_config(&config.signal);
    let signal = SmoothedSignal {
        current: args.current,
        baseline: args.baseline,
    };

    ClassificationReport {
        current: signal.current,
        baseline: signal.baseline,
        ratio: signal.ratio(),
        mode: classifier.mode(),
        thresholds: *classifier.thresholds(),
        severity: classifier.classify(signal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassificationMode, Severity};

    #[test]
    fn test_classify_ratio() {
        let args = ClassifyArgs {
            current: 250.0,
            baseline: 100.0,
        };
        let report = classify(&args, &Config::default());
        assert_eq!(report.ratio, Some(2.5));
        assert_eq!(report.severity, Severity::Critical);
    }

    #[test]
    fn test_classify_zero_baseline_is_ok() {
        let args = ClassifyArgs {
            current: 250.0,
            baseline: 0.0,
        };
        let report = classify(&args, &Config::default());
        assert_eq!(report.ratio, None);
        assert_eq!(report.severity, Severity::Ok);
    }

    #[test]
    fn test_classify_absolute() {
        let mut config = Config::default();
        config.signal.mode = ClassificationMode::Absolute;
        let quiet = ClassifyArgs {
            current: 100.0,
            baseline: 100.0,
        };
        assert_eq!(classify(&quiet, &config).severity, Severity::Ok);

        let loud = ClassifyArgs {
            current: 650.0,
            baseline: 100.0,
        };
        let report = classify(&loud, &config);
        assert_eq!(report.severity, Severity::Elevated);
        assert_eq!(report.thresholds.toxic(), 1_000.0);
    }
}
