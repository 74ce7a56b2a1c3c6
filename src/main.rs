//! Aberred Scene command line entry point.
//!
//! Loads a scene document under the scene root, runs it for a number of
//! steps, and optionally writes the result back.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --config scene.ini level1.json --steps 120 --save out/level1.json --tree
//! ```
//!
//! Scene paths are relative to `config_root` from the `[scene]` section of
//! the config file (default `./data/configs/`).

use std::path::PathBuf;
use std::process::ExitCode;

use aberredscene::core::factory::register_builtin_types;
use aberredscene::core::typeinfo::Object;
use aberredscene::resources::sceneconfig::SceneConfig;
use aberredscene::scene::arena::NodeId;
use aberredscene::scene::tree::Scene;
use clap::Parser;
use log::{error, info};

/// Aberred Scene
#[derive(Parser)]
#[command(version, about = "Load, step and save Aberred scene documents.")]
struct Cli {
    /// INI file with a [scene] section. Defaults apply when missing.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scene document, relative to the config root.
    scene: PathBuf,

    /// Number of fixed steps to run after loading.
    #[arg(long, default_value_t = 0)]
    steps: u32,

    /// Write the loaded scene back to this path, relative to the config root.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Print the node tree after running.
    #[arg(long)]
    tree: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SceneConfig::with_path(path),
        None => SceneConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        // Missing config is fine, defaults are safe.
        info!("{}; using defaults", e);
    }
    let fixed_step = config.fixed_step;

    register_builtin_types();

    let mut scene = Scene::with_config(config);
    let root = scene.root();
    let name = cli
        .scene
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let loaded = match scene.create_child_from_file(root, &name, &cli.scene) {
        Ok(id) => id,
        Err(e) => {
            error!("Failed to load scene {:?}: {}", cli.scene, e);
            return ExitCode::FAILURE;
        }
    };
    scene.apply_commands();

    for _ in 0..cli.steps {
        scene.fixed_update();
        scene.update(fixed_step);
    }
    if cli.steps > 0 {
        info!("Ran {} steps of {}s", cli.steps, fixed_step);
    }

    if cli.tree {
        print_tree(&scene, root);
    }

    if let Some(path) = &cli.save {
        if !scene.contains(loaded) {
            error!("Scene '{}' destroyed itself; nothing to save", name);
            return ExitCode::FAILURE;
        }
        if let Err(e) = scene.save_to_file(loaded, path) {
            error!("Failed to save scene to {:?}: {}", path, e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn print_tree(scene: &Scene, start: NodeId) {
    for (id, depth) in scene.depth_first(start) {
        let node = scene.node(id);
        let p = scene.absolute_position(id);
        let components = node.component_names().join(", ");
        println!(
            "{:indent$}{} <{}>{} at ({:.1}, {:.1}, {:.1}) [{}]",
            "",
            if node.name().is_empty() { "_" } else { node.name() },
            node.type_name(),
            if node.is_active() { "" } else { " (inactive)" },
            p.x,
            p.y,
            p.z,
            components,
            indent = depth * 2
        );
    }
}
