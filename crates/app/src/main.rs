use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{prelude::*, EnvFilter};
use tree_layout::{LayoutStrategy, Order, Scene, SceneConfig};

/// Lay out a complete binary tree and print the resulting scene
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// RON file holding a scene configuration, flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Depth of the tree, a depth of d gives 2^(d+1) - 1 nodes
    #[arg(long, allow_negative_numbers = true)]
    depth: Option<i32>,

    /// Layout strategy: rank, centroid or partition
    #[arg(long)]
    strategy: Option<LayoutStrategy>,

    #[arg(long)]
    h_spacing: Option<f64>,

    #[arg(long)]
    v_spacing: Option<f64>,

    /// Width the layout is fitted to
    #[arg(long)]
    width: Option<f64>,

    /// Width of the frame the layout is shown in, the layout fills 90% of it
    #[arg(long)]
    frame_width: Option<f64>,

    /// Deepest tree accepted
    #[arg(long)]
    max_depth: Option<u32>,

    /// Also list the node labels in this traversal order
    #[arg(long)]
    order: Option<Order>,

    #[arg(long, value_enum, default_value_t = Format::Summary)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human readable listing
    Summary,
    /// The scene description as RON
    Ron,
}

impl Args {
    fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                ron::from_str(&text)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
            None => SceneConfig::default(),
        };

        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(h_spacing) = self.h_spacing {
            config.h_spacing = h_spacing;
        }
        if let Some(v_spacing) = self.v_spacing {
            config.v_spacing = v_spacing;
        }
        if let Some(width) = self.width {
            config.target_width = width;
        }
        if let Some(frame_width) = self.frame_width {
            config.frame_width = Some(frame_width);
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }

        Ok(config)
    }
}

fn summary(scene: &Scene, order: Option<Order>) -> Result<String> {
    let mut out = String::new();
    let tree = scene.tree();
    let transform = scene.transform();

    writeln!(
        out,
        "{} layout, {} nodes, {} leaves, {} edges, scale {:.4}",
        scene.config().strategy,
        tree.len(),
        scene.leaves().len(),
        scene.edges().len(),
        transform.scale
    )?;
    for node in tree.nodes() {
        let Some(p) = node.position() else {
            continue;
        };
        writeln!(
            out,
            "{:>4} {:>6} level {:<2} ({:>9.4}, {:>9.4})",
            node.id(),
            node.label(),
            node.level(),
            p.x,
            p.y
        )?;
    }

    if let Some(order) = order {
        let labels: Vec<_> = tree.traverse(order).map(|n| n.label()).collect();
        writeln!(out, "{order}: {}", labels.join(" "))?;
    }

    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the scene can be piped
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = args.scene_config()?;
    debug!("Using {config:?}");

    let scene = Scene::compose(&config).context("Failed to compose the scene")?;

    match args.format {
        Format::Summary => print!("{}", summary(&scene, args.order)?),
        Format::Ron => {
            let text = ron::ser::to_string_pretty(&scene.describe(), Default::default())?;
            println!("{text}");
        }
    }

    Ok(())
}
