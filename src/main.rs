//! CLI entry point for lineout.

mod cli;

use clap::Parser;
use cli::{Args, Command};
use lineout::config::load_config;
use lineout::error::UiError;
use lineout::suggest::did_you_mean;
use lineout::textutil::indent;
use lineout::ui::terminal::{
    symbols, Choice, Fragment, PromptOutcome, StdinSource, StyleToken, TokenKind,
};
use lineout::ui::{error_chain, Ui};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    let args = Args::parse();

    let config = match load_config(args.config.as_deref(), &args.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let ui = match Ui::setup(config) {
        Ok(ui) => ui,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = match args.command.unwrap_or_default() {
        Command::Demo => run_demo(&ui),
        Command::Colors => show_colors(&ui),
    };
    if let Err(err) = result {
        ui.fatal(error_chain(&err, "lineout:"));
    }
}

/// Diagnostics go to stderr and stay off unless `LINEOUT_LOG` is set.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LINEOUT_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn run_demo(ui: &Ui) -> Result<(), UiError> {
    ui.info_section(vec![Fragment::styled("lineout demo", &[StyleToken::Bold])])?;
    ui.info_1(vec!["Preparing".into(), Fragment::styled("workspace", &[StyleToken::Bold])])?;
    ui.info_2(vec!["Fetching sources".into()])?;
    ui.info_3(vec!["Found".into(), Fragment::styled("3", &[StyleToken::Blue]), "projects".into()])?;

    let projects = ["core", "cli", "docs"];
    for (index, project) in projects.iter().enumerate() {
        ui.info_count(
            index,
            projects.len(),
            vec![Fragment::plain(*project), Fragment::symbol(&symbols::CHECK)],
        )?;
    }

    for _ in 0..5 {
        ui.dot(false)?;
    }
    ui.dot(true)?;

    for step in 0..=10 {
        ui.info_progress("Indexing", f64::from(step), 10.0)?;
        thread::sleep(Duration::from_millis(20));
    }
    ui.info(vec![])?;

    let rows = vec![
        vec![vec!["core".into()], vec![Fragment::symbol(&symbols::CHECK)]],
        vec![vec!["cli".into()], vec![Fragment::symbol(&symbols::CHECK)]],
        vec![vec!["docs".into()], vec![Fragment::symbol(&symbols::CROSS)]],
    ];
    ui.info_table(&rows, &["project", "status"])?;

    ui.timed("Summing", || (1..=100_000u64).sum::<u64>())?;
    ui.debug(vec!["Capabilities:".into(), format!("{:?}", ui.capabilities()).into()])?;
    ui.warning(vec!["docs".into(), Fragment::symbol(&symbols::ARROW), "no index page".into()])?;
    ui.info(vec![did_you_mean("Unknown project: `clu`", "clu", &projects).into()])?;
    ui.info(vec![indent("docs/index.md\ndocs/setup.md", 4).into()])?;

    let choices: Vec<Choice<&str>> = projects.iter().map(|p| Choice::new(*p, *p)).collect();
    let mut stdin = StdinSource;
    match ui.ask_choice(&mut stdin, &["Which project should be built?".into()], &choices, Some(0))? {
        PromptOutcome::Answered(project) => {
            ui.info_1(vec!["Building".into(), Fragment::styled(project, &[StyleToken::Green])])?;
        }
        PromptOutcome::Cancelled(_) => ui.warning(vec!["Nothing selected".into()])?,
    }
    Ok(())
}

fn show_colors(ui: &Ui) -> Result<(), UiError> {
    for token in StyleToken::NAMED {
        if matches!(token.kind(), TokenKind::Color | TokenKind::Attribute) && token != StyleToken::Reset {
            ui.info(vec![Fragment::styled(token.name(), &[token])])?;
        }
    }
    Ok(())
}
