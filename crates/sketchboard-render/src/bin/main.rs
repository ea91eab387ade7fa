//! Render a JSON scene headlessly and print the draw commands.

use clap::Parser;
use sketchboard_core::storage::{FileStorage, SceneStorage, StorageError};
use sketchboard_core::{BoardOptions, Config, CoreError, Editor};
use sketchboard_render::{RecordingPainter, Renderer, RendererError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("render: {0}")]
    Render(#[from] RendererError),
    #[error("scene path has no file name: {0}")]
    SceneName(PathBuf),
}

#[derive(Parser, Debug)]
#[command(name = "sketchboard-render", about = "Render a Sketchboard scene and print its draw commands")]
struct Cli {
    /// Scene JSON file.
    scene: PathBuf,

    /// Board and content width in CSS pixels.
    #[arg(default_value_t = 1000.0)]
    width: f64,

    /// Board and content height in CSS pixels.
    #[arg(default_value_t = 1000.0)]
    height: f64,

    /// Uuid of the element to draw the selection wrapper for.
    #[arg(long)]
    select: Option<String>,

    /// Save the normalised scene into this directory, named after the scene file.
    #[arg(long, value_name = "DIR")]
    store: Option<PathBuf>,
}

fn store_scene(dir: PathBuf, cli: &Cli, editor: &Editor) -> Result<(), CliError> {
    let id = cli
        .scene
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CliError::SceneName(cli.scene.clone()))?;
    let storage = FileStorage::new(dir)?;
    pollster::block_on(storage.save(id, editor.data()))?;
    log::info!("Saved scene {} to {}", id, storage.base_path().display());
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let data = FileStorage::read_path(&cli.scene)?;
    log::info!("Loaded {} elements from {}", data.len(), cli.scene.display());

    let options = BoardOptions::new(cli.width, cli.height, cli.width, cli.height);
    let mut editor = Editor::new(options, Config::default())?;
    editor.set_data(data);
    if let Some(uuid) = &cli.select {
        editor.select_element_by_uuid(uuid)?;
    }

    let mut painter = RecordingPainter::new().with_all_images_loaded();
    let stats = Renderer::new().render_frame(&mut painter, &editor.draw())?;

    for command in painter.commands() {
        println!("{}", command);
    }
    eprintln!("{} drawn, {} culled, {} failed", stats.drawn, stats.culled, stats.failed);

    if let Some(dir) = cli.store.clone() {
        store_scene(dir, &cli, &editor)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sketchboard-render", "scene.json"]).unwrap();
        assert_eq!(cli.scene, PathBuf::from("scene.json"));
        assert_eq!(cli.width, 1000.0);
        assert_eq!(cli.height, 1000.0);
        assert!(cli.select.is_none());
        assert!(cli.store.is_none());
    }

    #[test]
    fn test_size_and_select() {
        let cli =
            Cli::try_parse_from(["sketchboard-render", "scene.json", "640", "480", "--select", "abc"]).unwrap();
        assert_eq!(cli.width, 640.0);
        assert_eq!(cli.height, 480.0);
        assert_eq!(cli.select.as_deref(), Some("abc"));
    }

    #[test]
    fn test_invalid_width_is_rejected() {
        assert!(Cli::try_parse_from(["sketchboard-render", "scene.json", "wide"]).is_err());
    }

    #[test]
    fn test_missing_scene_is_rejected() {
        assert!(Cli::try_parse_from(["sketchboard-render"]).is_err());
    }

    #[test]
    fn test_run_stores_normalised_scene() {
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("board.json");
        std::fs::write(
            &scene,
            r#"{"elements":[{"x":1,"y":2,"w":3,"h":4,"type":"rect","desc":{}}]}"#,
        )
        .unwrap();
        let store = dir.path().join("store");
        let cli = Cli::try_parse_from([
            OsStr::new("sketchboard-render"),
            scene.as_os_str(),
            OsStr::new("--store"),
            store.as_os_str(),
        ])
        .unwrap();

        run(cli).unwrap();

        let storage = FileStorage::new(&store).unwrap();
        let saved = pollster::block_on(storage.load("board")).unwrap();
        assert_eq!(saved.len(), 1);
        assert!(!saved.elements[0].uuid.is_empty());
    }
}
