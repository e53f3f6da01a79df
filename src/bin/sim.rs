//! Replay scripted drag-and-drop scenarios against a sample dock layout and
//! print the resulting tree, for eyeballing engine behavior without a GUI.

#[macro_use]
extern crate tracing;

use std::env;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::Parser;
use quay::{
    DockElement, DockTree, DragController, DragEffect, Factory, HitTestSurface, Options, Point,
    Rect, SurfaceElement,
};
use quay_config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Parser)]
#[command(about = "Replay scripted drag-and-drop scenarios against a sample dock layout")]
struct Cli {
    /// Path to a KDL config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Scenario to replay.
    #[arg(long, value_enum, default_value_t = Scenario::Move)]
    scenario: Scenario,

    /// Run every scenario in sequence and exit (CI smoke mode).
    #[arg(long)]
    smoke_test: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Scenario {
    Move,
    Swap,
    Copy,
}

impl Scenario {
    fn effect(self) -> DragEffect {
        match self {
            Scenario::Move => DragEffect::Move,
            Scenario::Swap => DragEffect::Link,
            Scenario::Copy => DragEffect::Copy,
        }
    }
}

#[derive(Debug, Clone)]
struct Panel {
    name: String,
}

impl Panel {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

impl DockElement for Panel {
    type Id = String;

    fn id(&self) -> &String {
        &self.name
    }

    fn title(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "quay=debug".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("using default config: {err:?}");
                Config::default()
            }
        },
        None => Config::default(),
    };
    let options = Rc::new(Options::from_config(&config));

    if cli.smoke_test {
        for scenario in [Scenario::Move, Scenario::Swap, Scenario::Copy] {
            run_scenario(scenario, options.clone())?;
        }
        return Ok(());
    }

    run_scenario(cli.scenario, options)
}

fn run_scenario(scenario: Scenario, options: Rc<Options>) -> anyhow::Result<()> {
    info!("running scenario {scenario:?}");

    let factory = Factory::new(options.clone());
    let mut tree = DockTree::new();
    let root = tree.root();

    let left = factory.add_dock(&mut tree, root).context("adding left dock")?;
    let right = factory.add_dock(&mut tree, root).context("adding right dock")?;
    let terminal = factory
        .add_dockable(&mut tree, left, Panel::new("terminal"))
        .context("adding terminal")?;
    let editor = factory
        .add_dockable(&mut tree, left, Panel::new("editor"))
        .context("adding editor")?;
    let inspector = factory
        .add_dockable(&mut tree, right, Panel::new("inspector"))
        .context("adding inspector")?;

    let mut surface = HitTestSurface::new();
    surface.push(
        SurfaceElement::new(Rect::new(0., 0., 400., 600.))
            .with_node(left)
            .drop_area()
            .with_label("left-dock"),
    );
    surface.push(
        SurfaceElement::new(Rect::new(400., 0., 400., 600.))
            .with_node(right)
            .drop_area()
            .with_label("right-dock"),
    );
    surface.push(
        SurfaceElement::new(Rect::new(0., 0., 400., 300.))
            .with_node(terminal)
            .drag_area()
            .drop_area()
            .with_label("terminal"),
    );
    surface.push(
        SurfaceElement::new(Rect::new(0., 300., 400., 300.))
            .with_node(editor)
            .drag_area()
            .drop_area()
            .with_label("editor"),
    );
    surface.push(
        SurfaceElement::new(Rect::new(400., 0., 400., 300.))
            .with_node(inspector)
            .drag_area()
            .drop_area()
            .with_label("inspector"),
    );

    println!("before:\n{}", tree.format_tree());

    let mut controller = DragController::new(options);
    let grab_point = Point::new(200., 450.);
    let drop_point = Point::new(600., 150.);

    anyhow::ensure!(
        controller.on_pointer_down(&tree, &surface, grab_point),
        "gesture did not start",
    );
    let valid = controller.on_pointer_move(&tree, &surface, drop_point, scenario.effect());
    debug!("hover over drop point: valid={valid}");
    let committed = controller.on_pointer_up(&mut tree, &surface, drop_point);
    anyhow::ensure!(committed, "drop was rejected");

    tree.verify_invariants();

    println!("after:\n{}", tree.format_tree());
    let json = serde_json::to_string_pretty(&tree.snapshot()).context("serializing snapshot")?;
    println!("{json}");

    Ok(())
}
