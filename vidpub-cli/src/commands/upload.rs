//! Implementation of the 'upload' subcommand.
//!
//! Builds one engine for the whole invocation and feeds it the videos one at
//! a time, so uploader sessions are reused and the emergency stop is checked
//! again before every video.

use crate::cli::UploadArgs;
use crate::commands::parse_platforms;
use crate::error::{CliErrorContext, CliResult};
use crate::output::{print_results_table, print_summary, video_results_json};
use crate::uploaders::registry_from_env;

use vidpub_core::{
    CoreError, FfprobeAnalyzer, MetadataOverrides, Publisher, PublisherConfig, PublisherConfigBuilder, UploadMetadata,
};

use log::{error, info};

/// Loads the metadata file (or the defaults) and applies the command-line
/// overrides.
pub fn resolve_metadata(args: &UploadArgs) -> CliResult<UploadMetadata> {
    let base = match &args.metadata {
        Some(path) => UploadMetadata::from_json_file(path)?,
        None => UploadMetadata::default(),
    };
    let metadata = base.merge(MetadataOverrides {
        title: args.title.clone(),
        description: args.description.clone(),
        tags: args.tags.clone(),
    });
    metadata.validate()?;
    Ok(metadata)
}

/// Runs the upload command. Fails if any platform of any video failed.
pub fn run_upload(args: &UploadArgs) -> CliResult<()> {
    let mut config = PublisherConfig::from_env();
    if args.dry_run {
        config = PublisherConfigBuilder::from_config(config).dry_run(true).build();
    }
    config.validate()?;

    let platforms = args
        .platforms
        .as_deref()
        .map(parse_platforms)
        .transpose()
        .cli_context("Invalid --platforms value")?;
    let metadata = resolve_metadata(args)?;

    if config.dry_run {
        info!("Dry-run mode: nothing will be published and quotas are not counted");
    }

    let mut publisher = Publisher::from_config(&config, FfprobeAnalyzer::new(), registry_from_env())?;

    let mut succeeded = 0;
    let mut failed = 0;
    let mut documents = Vec::new();

    for video in &args.videos {
        info!("Publishing {}", video.display());
        let results = match publisher.upload(video, platforms.as_deref(), Some(&metadata)) {
            Ok(results) => results,
            Err(CoreError::AnalysisError(message)) => {
                error!("Skipping {}: {}", video.display(), message);
                failed += 1;
                if args.json {
                    documents.push(serde_json::json!({
                        "video": video.display().to_string(),
                        "error": message,
                        "results": [],
                    }));
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        succeeded += results.iter().filter(|r| r.success).count();
        failed += results.iter().filter(|r| !r.success).count();

        if args.json {
            documents.push(video_results_json(video, &results));
        } else {
            print_results_table(video, &results);
        }
    }

    if args.json {
        let rendered = serde_json::to_string_pretty(&documents).map_err(CoreError::from)?;
        println!("{}", rendered);
    } else {
        print_summary(succeeded, failed);
    }

    if failed > 0 {
        return Err(CoreError::OperationFailed(format!(
            "{} of {} upload(s) failed",
            failed,
            succeeded + failed
        )));
    }
    Ok(())
}
