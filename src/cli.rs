// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for the photo booth
//!
//! This module drives the booth without a UI:
//! - Composing a strip from image files
//! - Listing the available filters

use photo_booth::backends::camera::StillSourceProvider;
use photo_booth::pipelines::photo::UploadFile;
use photo_booth::share::{self, ShareOutcome};
use photo_booth::{
    AcquisitionMode, BackgroundColor, Booth, Config, FilterType, LayoutMode, Message, Step,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments of the `strip` command
pub struct StripArgs {
    pub files: Vec<PathBuf>,
    pub layout: Option<String>,
    pub background: Option<String>,
    pub filter: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub caption: Option<String>,
    pub share: bool,
}

/// List all filters with their ids
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available filters:");
    println!();
    for filter in FilterType::ALL {
        println!("  {:<12} {}", filter.id(), filter.display_name());
    }
    Ok(())
}

/// Send `message` and surface any failure as an error
async fn send(booth: &mut Booth, message: Message) -> Result<(), Box<dyn std::error::Error>> {
    booth.update(message).await;
    match booth.last_error() {
        Some(e) => Err(e.clone().into()),
        None => Ok(()),
    }
}

/// Compose the given files into a strip and save it
pub fn make_strip(args: StripArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(title) = args.caption {
        config.caption_title = title;
    }

    let layout = match args.layout.as_deref() {
        Some(id) => LayoutMode::from_id(id).ok_or_else(|| format!("Unknown layout: {}", id))?,
        None => config.default_layout,
    };
    let background = match args.background.as_deref() {
        Some(id) => {
            BackgroundColor::from_id(id).ok_or_else(|| format!("Unknown background: {}", id))?
        }
        None => config.default_background,
    };
    let filter = match args.filter.as_deref() {
        Some(id) => FilterType::from_id(id).ok_or_else(|| format!("Unknown filter: {}", id))?,
        None => FilterType::None,
    };

    let files = args.files;
    let share_requested = args.share;
    if files.len() > config.max_photos {
        println!(
            "Only the first {} of {} files fit on a strip",
            config.max_photos,
            files.len()
        );
    }

    // Files only; no camera is opened
    let provider = Arc::new(StillSourceProvider::new());
    let mut booth = Booth::new(config, provider)?;
    let output_file = match args.output {
        Some(path) if path.is_dir() => {
            booth = booth.with_output_dir(path);
            None
        }
        other => other,
    };

    let rt = tokio::runtime::Runtime::new()?;
    let saved = rt.block_on(async {
        let mut uploads = Vec::with_capacity(files.len());
        for path in &files {
            uploads.push(UploadFile::from_path(path).await?);
        }

        send(&mut booth, Message::Start(AcquisitionMode::Upload)).await?;
        let summary = booth.import_uploads(uploads).await?;
        for skipped in &summary.skipped {
            println!("Skipped {}: {}", skipped.name, skipped.reason);
        }
        println!("Imported {} photo(s)", summary.added.len());

        // Review → reorder → filter
        while booth.session().step() != Step::FilterApply {
            send(&mut booth, Message::Next).await?;
        }
        if filter != FilterType::None {
            for id in booth.session().photo_ids() {
                send(&mut booth, Message::ApplyFilter(id, filter)).await?;
            }
        }

        send(&mut booth, Message::Next).await?;
        send(&mut booth, Message::SelectLayout(layout)).await?;
        send(&mut booth, Message::SelectBackground(background)).await?;
        let strip = booth.create_strip().await?;
        println!("Strip: {}x{}", strip.width(), strip.height());
        send(&mut booth, Message::Next).await?;

        let saved = match output_file {
            Some(path) => booth.save_strip_to(path).await?,
            None => booth.save_strip().await?,
        };

        if share_requested {
            match booth.share_strip().await? {
                ShareOutcome::Shared => println!("Strip shared"),
                ShareOutcome::Fallback { link, saved_path } => {
                    println!("Share link: {}", link);
                    println!("Share copy: {}", saved_path.display());
                    if let Err(e) = share::open_share_link(&link) {
                        println!("Could not open share link: {}", e);
                    }
                }
            }
        }

        Ok::<_, Box<dyn std::error::Error>>(saved)
    })?;

    println!("Strip saved: {}", saved.display());
    Ok(())
}
