//! Headless course builder session
//!
//! Drives the controller through a short authoring session against a
//! recording host and prints the resulting views as JSON.

use clap::Parser;
use course_builder::app::forms::{LinkForm, ModuleForm, SelectedFile, UploadForm};
use course_builder::app::state::{AddKind, DialogEvent};
use course_builder::domain::content::ItemKind;
use course_builder::domain::core::Rect;
use course_builder::domain::reorder::{DragSource, DropTarget};
use course_builder::domain::viewport::SectionLayout;
use course_builder::logging::{init_logging, LogConfig};
use course_builder::{BuilderConfig, CourseBuilder, RecordingHost};
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "course-builder", about = "Run a headless course builder session")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search query applied before printing the module cards
    #[arg(short, long, default_value = "")]
    query: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

const SECTION_HEIGHT: i32 = 320;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&LogConfig {
        level: if cli.verbose { Level::DEBUG } else { Level::INFO },
        ..LogConfig::default()
    });

    let config = match &cli.config {
        Some(path) => BuilderConfig::load(path)?,
        None => BuilderConfig::default(),
    };
    let mut builder = CourseBuilder::new(config, RecordingHost::new())?;

    // Modules through the header menu
    let mut modules = Vec::new();
    for name in ["Getting started", "Ownership", "Async Rust"] {
        builder.open_dialog(DialogEvent::HeaderAdd(AddKind::Module))?;
        modules.push(builder.save_module(&ModuleForm::new(name))?);
    }

    builder.open_dialog(DialogEvent::AddToModule(modules[0], ItemKind::Link))?;
    let book = builder.save_link(&LinkForm::new(
        "The Rust book",
        "https://doc.rust-lang.org/book/",
    ))?;

    builder.open_dialog(DialogEvent::AddToModule(modules[1], ItemKind::File))?;
    builder.save_upload(&UploadForm::new(
        "Borrowing cheatsheet",
        Some(SelectedFile {
            name: "borrowing.pdf".to_string(),
            size: 183_500,
            mime_type: "application/pdf".to_string(),
        }),
    ))?;

    builder.open_dialog(DialogEvent::HeaderAdd(AddKind::Link))?;
    let loose = builder.save_link(&LinkForm::new(
        "Tokio tutorial",
        "https://tokio.rs/tokio/tutorial",
    ))?;

    // Move the last module to the front, then file the loose link under it
    builder.handle_drag_end(DragSource::Module(modules[2]), Some(DropTarget::Module(modules[0])))?;
    builder.handle_drag_end(DragSource::Item(loose), Some(DropTarget::Module(modules[2])))?;
    builder.handle_drag_end(DragSource::Item(book), None)?;

    builder.set_search_query(cli.query.as_str());

    // Lay rendered sections out top to bottom and scroll a little
    let viewport = Rect::new(0, 0, 1280, 800);
    let layouts: Vec<SectionLayout> = builder
        .visible_modules()
        .modules()
        .iter()
        .enumerate()
        .map(|(i, card)| SectionLayout {
            module_id: card.module.id,
            bounds: Rect::new(0, i as i32 * SECTION_HEIGHT - 200, viewport.w, SECTION_HEIGHT),
        })
        .collect();
    builder.handle_layout(viewport, &layouts);

    println!("{}", serde_json::to_string_pretty(&builder.visible_modules())?);
    println!("{}", serde_json::to_string_pretty(&builder.unassigned_items())?);
    println!("{}", serde_json::to_string_pretty(&builder.outline())?);

    Ok(())
}
