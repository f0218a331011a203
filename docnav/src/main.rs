mod cli;
mod errors;
mod router;
mod script;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use docnav_sidebar::{
    JsonFileStore, OptionsLoadStatus, SidebarEffect, SidebarOptions,
    SidebarProvider, SidebarSnapshot, SidebarStore, load_options_from_path,
    load_sidebars_from_path,
};
use env_logger::Env;
use serde::Serialize;

use crate::cli::Args;
use crate::errors::CliError;
use crate::router::Router;
use crate::script::{ScriptStep, load_script};

// Upper bound on navigation follow-ups per step.
const MAX_FOLLOW_UPS: usize = 8;

#[derive(Serialize)]
struct StepReport<'a> {
    step: usize,
    effects: &'a [SidebarEffect],
    snapshot: &'a SidebarSnapshot,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let seed = load_sidebars_from_path(&args.seed)?;
    let mut options = load_options(&args)?;
    if let Some(project) = args.project {
        options.project = project;
    }

    let storage = match args.storage {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location(),
    };
    log::debug!("using storage at {}", storage.path().display());

    let store = SidebarStore::new(seed, options, Box::new(storage));
    let mut provider = SidebarProvider::new(store);
    let mut router = Router::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let Some(script_path) = args.script else {
        return write_report(&mut out, 0, &[], provider.store().snapshot());
    };

    let steps = load_script(&script_path)?;
    log::info!(
        "replaying {} steps from {}",
        steps.len(),
        script_path.display()
    );

    for (index, step) in steps.into_iter().enumerate() {
        let effects = apply_step(&mut provider, &mut router, step)?;
        let snapshot = provider.store().snapshot();
        write_report(&mut out, index + 1, &effects, snapshot)?;
    }

    log::debug!(
        "final location {:?}, pushed entries {:?}",
        router.location(),
        router.history()
    );
    Ok(())
}

fn load_options(args: &Args) -> Result<SidebarOptions, CliError> {
    let Some(path) = &args.options else {
        return Ok(SidebarOptions::default());
    };

    let (options, status) = load_options_from_path(path)?.into_parts();
    match status {
        OptionsLoadStatus::Loaded => {},
        OptionsLoadStatus::Missing => {
            log::warn!(
                "options file {} not found, using defaults",
                path.display()
            );
        },
        OptionsLoadStatus::Invalid(message) => {
            log::warn!("options file is invalid, using defaults: {message}");
        },
    }
    Ok(options)
}

/// Run one script step and every navigation it triggers.
fn apply_step(
    provider: &mut SidebarProvider,
    router: &mut Router,
    step: ScriptStep,
) -> Result<Vec<SidebarEffect>, CliError> {
    let command = match step {
        ScriptStep::ToggleCategory { category, opened } => {
            provider
                .store_mut()
                .update_persisted_category_state(&category, opened)?;
            return Ok(Vec::new());
        },
        ScriptStep::Command(command) => command,
    };

    router.observe(&command);
    provider.proxy().send(command)?;
    let mut effects = provider.pump();

    let mut routed = 0;
    for _ in 0..MAX_FOLLOW_UPS {
        let follow_ups: Vec<_> = effects[routed..]
            .iter()
            .filter_map(|effect| router.route_effect(effect))
            .collect();
        routed = effects.len();
        if follow_ups.is_empty() {
            break;
        }

        let proxy = provider.proxy();
        for command in follow_ups {
            proxy.send(command)?;
        }
        effects.extend(provider.pump());
    }

    Ok(effects)
}

fn write_report(
    out: &mut impl Write,
    step: usize,
    effects: &[SidebarEffect],
    snapshot: &SidebarSnapshot,
) -> Result<(), CliError> {
    let report = StepReport {
        step,
        effects,
        snapshot,
    };
    let line = serde_json::to_string(&report).map_err(CliError::Report)?;
    writeln!(out, "{line}").map_err(CliError::Output)
}
