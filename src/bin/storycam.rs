use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "storycam", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a story into projections, camera path and narrative moments.
    Resolve(ResolveArgs),
    /// Evaluate one projection at a global time.
    Sample(SampleArgs),
    /// Plan a transition between two positions.
    Plan(PlanArgs),
    /// List the stories stored in a directory.
    List(ListArgs),
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Input story JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Projection to build the camera path from, overriding the story's own choice.
    #[arg(long)]
    camera_path: Option<String>,

    /// Projection the viewer has focused.
    #[arg(long)]
    focus: Option<String>,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input story JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Projection id.
    #[arg(long)]
    projection: String,

    /// Global timeline time.
    #[arg(long)]
    time: f64,

    /// Viewport aspect ratio used for the projection camera.
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect: f64,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Start position, `"x y z"`.
    #[arg(long, allow_hyphen_values = true)]
    from: String,

    /// Target position, `"x y z"`.
    #[arg(long, allow_hyphen_values = true)]
    to: String,

    /// Requested duration in milliseconds.
    #[arg(long, default_value_t = 1800.0)]
    duration_ms: f64,

    /// Also print this many evenly spaced curve samples.
    #[arg(long, default_value_t = 0)]
    samples: usize,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Directory holding `<id>.json` stories.
    #[arg(long)]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Resolve(args) => cmd_resolve(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Plan(args) => cmd_plan(args),
        Command::List(args) => cmd_list(args),
    }
}

fn read_story(path: &Path) -> anyhow::Result<storycam::StoryDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read story '{}'", path.display()))?;
    let story = storycam::parse_story_json(&text)
        .with_context(|| format!("parse story '{}'", path.display()))?;
    Ok(story)
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize output")?;
    println!("{out}");
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let story = read_story(&args.in_path)?;
    let opts = storycam::PathOptions {
        camera_path_id: args.camera_path,
        focused_projection_id: args.focus,
        max_timeline_time: 0.0,
    };
    let resolved = storycam::resolve_document(story, &opts);
    print_json(&resolved, args.pretty)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let story = read_story(&args.in_path)?;
    let projection = story
        .projection(&args.projection)
        .with_context(|| format!("projection '{}' not found", args.projection))?
        .clone();

    let mut state = storycam::ProjectionState::new(projection, args.aspect);
    state.tick(args.time);
    let camera = state.camera();
    let out = serde_json::json!({
        "projection": state.id(),
        "time": args.time,
        "visible": state.visual().visible,
        "opacity": state.visual().opacity,
        "position": camera.position,
        "orientation": camera.orientation,
        "fov": camera.fov(),
        "far": camera.far(),
        "screenPlane": state.visual().screen_plane,
        "resolved": state.current(),
    });
    print_json(&out, true)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let from = storycam::parse_vec3(&args.from)
        .with_context(|| format!("invalid --from '{}', expected \"x y z\"", args.from))?;
    let to = storycam::parse_vec3(&args.to)
        .with_context(|| format!("invalid --to '{}', expected \"x y z\"", args.to))?;

    let profile = storycam::plan(from, to, args.duration_ms);
    let curve = storycam::build_curve(from, to, profile.arc_height);
    let samples: Vec<storycam::DVec3> = match args.samples {
        0 => Vec::new(),
        1 => vec![curve.point_at(0.0)],
        n => (0..n)
            .map(|i| curve.point_at(i as f64 / (n - 1) as f64))
            .collect(),
    };
    let out = serde_json::json!({
        "profile": profile,
        "straight": curve.is_straight(),
        "curve": curve,
        "samples": samples,
    });
    print_json(&out, true)
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    use storycam::StoryRepository as _;

    let repo = storycam::FsStoryRepository::new(args.dir.clone());
    let ids = repo
        .list()
        .with_context(|| format!("list stories in '{}'", args.dir.display()))?;
    for id in ids {
        println!("{id}");
    }
    Ok(())
}
