use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use unify_cli::config::{UnifyConfig, delimiter_byte};
use unify_cli::pipeline::{
    RunReport, load_datasets, log_dropped_rows, summarize_files, tokenize_headers, write_table,
};
use unify_core::{ValidationPipeline, collated_to_dataframe};
use unify_ingest::{IngestOptions, read_dataset_with_options};
use unify_map::HeaderTokenizer;
use unify_model::{HeaderToken, SpellingLocale};
use unify_standards::{DoctorReport, ReferenceRegistry, VerifySummary};

use crate::cli::{TokenizeArgs, ValidateArgs};
use crate::summary::{print_doctor, print_reference_list, print_tokens};
use crate::types::ValidateResult;

fn load_registry(reference_dir: &Path) -> Result<(ReferenceRegistry, VerifySummary)> {
    ReferenceRegistry::verify_and_load(reference_dir)
        .with_context(|| format!("load reference data: {}", reference_dir.display()))
}

fn ingest_options(config: &UnifyConfig, delimiter: Option<char>) -> Result<IngestOptions> {
    let delimiter = delimiter_byte(delimiter.unwrap_or(config.input.delimiter))?;
    Ok(IngestOptions {
        delimiter,
        ..IngestOptions::default()
    })
}

pub fn run_validate(
    args: &ValidateArgs,
    config: &UnifyConfig,
    reference_dir: &Path,
) -> Result<ValidateResult> {
    let span = info_span!("validate_command", inputs = args.inputs.len());
    let _guard = span.enter();

    let min_similarity = args
        .min_similarity
        .or(config.validation.min_similarity);
    if let Some(threshold) = min_similarity
        && !(0.0..=1.0).contains(&threshold)
    {
        bail!("--min-similarity must be between 0 and 1, got {threshold}");
    }

    let (registry, _summary) = load_registry(reference_dir)?;
    let datasets = load_datasets(&args.inputs, &ingest_options(config, args.delimiter)?)?;
    info!(datasets = datasets.len(), "loaded input datasets");

    let mut pipeline = ValidationPipeline::new(registry.directory());
    if let Some(threshold) = min_similarity {
        pipeline = pipeline.with_min_similarity(threshold);
    }
    let (resolved, report) = pipeline.validate(&datasets)?;
    log_dropped_rows(&datasets, &report);

    let files = summarize_files(&datasets, &resolved, &report);

    let preview = match args.preview {
        Some(rows) => {
            let frame = collated_to_dataframe(&resolved).context("build preview frame")?;
            Some(frame.head(Some(rows)).to_string())
        }
        None => None,
    };

    let output = args.output.clone();
    if let Some(path) = &output {
        let format = args.format.map_or(config.output.format, Into::into);
        write_table(&resolved, path, format)?;
    }

    let report_path = args.report.clone();
    if let Some(path) = &report_path {
        let spelling = args
            .spelling
            .map_or(config.validation.spelling, Into::into);
        let headers = tokenize_headers(&datasets, registry.translations(spelling));
        RunReport::new(&files, &report, &headers).write(path)?;
    }

    Ok(ValidateResult {
        reference_dir: reference_dir.to_path_buf(),
        files,
        report,
        output,
        report_path,
        preview,
        max_dropped: args.max_dropped.or(config.validation.max_dropped),
    })
}

pub fn run_tokenize(args: &TokenizeArgs, config: &UnifyConfig, reference_dir: &Path) -> Result<()> {
    let (registry, _summary) = load_registry(reference_dir)?;
    let spelling: SpellingLocale = args
        .spelling
        .map_or(config.validation.spelling, Into::into);
    let translations = registry.translations(spelling);

    let tokens: Vec<HeaderToken> = match &args.from {
        Some(path) => {
            let dataset = read_dataset_with_options(path, &ingest_options(config, None)?)
                .with_context(|| format!("load dataset: {}", path.display()))?;
            tokenize_headers(std::slice::from_ref(&dataset), translations)
        }
        None => {
            let tokenizer = HeaderTokenizer::new(translations);
            args.headers
                .iter()
                .map(|header| tokenizer.tokenize(header))
                .collect()
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        print_tokens(&tokens, spelling);
    }
    Ok(())
}

pub fn run_reference_doctor(reference_dir: &Path, json: bool) -> Result<()> {
    let (registry, summary) = load_registry(reference_dir)?;
    let report = DoctorReport::from_registry(&registry, &summary);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_doctor(&summary, &report);
    }
    Ok(())
}

pub fn run_reference_list(reference_dir: &Path, historical: bool) -> Result<()> {
    let (registry, _summary) = load_registry(reference_dir)?;
    print_reference_list(&registry.directory(), historical);
    Ok(())
}
