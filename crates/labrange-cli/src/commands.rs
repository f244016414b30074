use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace, warn};

use labrange_cli::logging::redact_value;
use labrange_cli::render::{
    classification_table, counts_table, legend_table, panel_table, ranges_table,
};
use labrange_core::{ClassifierConfig, RangeClassifier, read_panel_path};
use labrange_model::Band;

use crate::cli::{ClassifyArgs, PanelArgs, RangesArgs};

/// Build the classifier from an optional config file and range-table override.
pub fn build_classifier(config: Option<&Path>, ranges: Option<&Path>) -> Result<RangeClassifier> {
    let base = match config {
        Some(path) => ClassifierConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => ClassifierConfig::default(),
    };
    let classifier = base
        .with_ranges(ranges.map(Path::to_path_buf))
        .build()
        .context("build classifier")?;
    info!(
        ranges = classifier.table().len(),
        fingerprint = %classifier.table().fingerprint(),
        "reference ranges loaded"
    );
    Ok(classifier)
}

pub fn run_classify(classifier: &RangeClassifier, args: &ClassifyArgs) -> Result<()> {
    let span = info_span!("classify", label = %args.label);
    let _guard = span.enter();

    let value = classifier.resolve_value(args.value.as_str());
    let classification = classifier.classify_raw(&args.label, &value);
    trace!(value = redact_value(&args.value), band = %classification.band, "classified value");
    if classification.band == Band::Unknown {
        warn!("value could not be classified");
    }

    if args.json {
        let json = serde_json::to_string_pretty(&classification).context("serialize result")?;
        println!("{json}");
    } else {
        println!("{}", classification_table(&args.label, &value, &classification));
    }
    Ok(())
}

pub fn run_ranges(classifier: &RangeClassifier, args: &RangesArgs) -> Result<()> {
    let table = classifier.table();
    if args.json {
        let entries: Vec<_> = table.iter().collect();
        let json = serde_json::to_string_pretty(&entries).context("serialize ranges")?;
        println!("{json}");
        return Ok(());
    }
    let summary = table.summary();
    println!("{}", ranges_table(table));
    println!("{}", legend_table());
    println!(
        "{} ranges ({} collapsed), fingerprint {}",
        summary.entries,
        summary.collapsed.len(),
        summary.fingerprint
    );
    Ok(())
}

/// Returns true when `--fail-on-out-of-range` is set and a latest value is out of range.
pub fn run_panel(classifier: &RangeClassifier, args: &PanelArgs) -> Result<bool> {
    let span = info_span!("panel", path = %args.path.display());
    let _guard = span.enter();

    let records = read_panel_path(&args.path)
        .with_context(|| format!("read panel {}", args.path.display()))?;
    let report = classifier.evaluate_panel(&records);
    info!(
        draws = report.draws.len(),
        biomarkers = report.series.len(),
        out_of_range = report.out_of_range(),
        "panel evaluated"
    );
    if report.counts.unknown > 0 {
        warn!(count = report.counts.unknown, "some values could not be classified");
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize panel")?;
        println!("{json}");
    } else {
        println!("{}", panel_table(&report));
        println!("{}", counts_table(&report.counts, &report.latest));
    }
    Ok(args.fail_on_out_of_range && report.out_of_range() > 0)
}
