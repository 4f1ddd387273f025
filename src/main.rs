use argh::FromArgs;
use course_planner::Planner;
use course_planner::logging;
use std::path::PathBuf;

#[derive(FromArgs)]
/// Interactive course planner: load a course catalog, list it, look up prerequisites.
struct PlannerArgs {
    #[argh(option, short = 'f')]
    /// catalog file to load before the menu is shown.
    file: Option<PathBuf>,

    #[argh(option, default = "String::from(logging::DEFAULT_FILTER)")]
    /// log filter directive, e.g. "info" or "course_planner=debug". RUST_LOG takes precedence.
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args: PlannerArgs = argh::from_env();
    logging::init_logging(&args.log_level)?;

    let mut planner = Planner::default();
    if let Some(path) = &args.file {
        planner.preload(path, &mut std::io::stdout())?;
    }
    planner.repl()
}
