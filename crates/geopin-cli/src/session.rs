//! The interactive session loop.
//!
//! Input lines and finished queries are multiplexed on one task, so clicks
//! keep flowing while queries are outstanding and all interaction state is
//! mutated in one place.

use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use geopin_client::{HttpGeoClient, MemoryGeoService};
use geopin_core::config::{
    normalize_api_url, parse_distance_unit, CliConfigOverrides, LayeredConfig,
};
use geopin_core::models::{format_kilometers, GeoPoint, PinRole};
use geopin_core::ports::{DisplayedResult, GeoQueryService};
use geopin_core::projection::{Projection, WebMercator};
use geopin_interaction::{InteractionDispatcher, MemorySurface, PendingQuery};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::Cli;
use crate::command::{SessionCommand, HELP};
use crate::output::OutputWriter;
use crate::presenter::TerminalPresenter;

type Dispatcher = InteractionDispatcher<dyn GeoQueryService, MemorySurface, TerminalPresenter>;

/// Resolve configuration: defaults, then file, then environment, then flags
fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();
    if let Some(path) = &cli.config {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
    }
    let mut config = config.load_from_env();

    let api_url = cli.api_url.as_deref().map(normalize_api_url).transpose()?;
    let radius_unit = cli.radius_unit.as_deref().map(parse_distance_unit).transpose()?;
    config.update_from_cli(CliConfigOverrides {
        api_url,
        radius_unit,
        request_timeout_secs: cli.timeout,
    });
    Ok(config)
}

fn build_service(cli: &Cli, config: &LayeredConfig) -> Result<Arc<dyn GeoQueryService>> {
    if cli.offline {
        tracing::info!("Using in-memory place service");
        return Ok(Arc::new(MemoryGeoService::new()));
    }
    let client = HttpGeoClient::from_config(config)?;
    tracing::info!("Using place service at {}", client.base_url());
    Ok(Arc::new(client))
}

pub async fn run(cli: Cli) -> Result<()> {
    let out = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;
    let service = build_service(&cli, &config)?;
    let radius_unit = config.radius_unit.value;

    let presenter = TerminalPresenter::new(out, radius_unit);
    let mut dispatcher: Dispatcher =
        InteractionDispatcher::new(service, MemorySurface::new(), presenter)
            .with_radius_unit(radius_unit);
    dispatcher.select_mode(cli.mode.into());

    let view = config.view.value;
    if !out.is_json() {
        out.info(format!(
            "Map centred on ({}, {}) at zoom {}. Mode: {}. Type 'help' for commands.",
            view.latitude,
            view.longitude,
            view.zoom,
            dispatcher.current_mode()
        ));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: FuturesUnordered<PendingQuery> = FuturesUnordered::new();

    loop {
        tokio::select! {
            Some(done) = in_flight.next(), if !in_flight.is_empty() => {
                apply(&mut dispatcher, done);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match SessionCommand::parse(&line) {
                    Ok(Some(SessionCommand::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Some(query) = handle(&mut dispatcher, &out, command) {
                            in_flight.push(query);
                        }
                    }
                    Ok(None) => {}
                    Err(message) => out.error(message),
                }
            }
        }
    }

    // Input ended; let outstanding queries land before exiting
    while let Some(done) = in_flight.next().await {
        apply(&mut dispatcher, done);
    }
    Ok(())
}

fn apply(dispatcher: &mut Dispatcher, done: geopin_interaction::QueryCompletion) {
    let mode = done.mode();
    if let Err(e) = dispatcher.complete(done) {
        tracing::debug!(%mode, "{}", e);
    }
}

fn handle(
    dispatcher: &mut Dispatcher,
    out: &OutputWriter,
    command: SessionCommand,
) -> Option<PendingQuery> {
    match command {
        SessionCommand::SetMode(mode) => {
            dispatcher.select_mode(mode);
            out.success(format!("Mode: {}", mode.title()));
            None
        }
        SessionCommand::Click { latitude, longitude } => match GeoPoint::new(latitude, longitude) {
            Ok(point) => dispatcher.on_map_click(point),
            Err(e) => {
                out.error(e);
                None
            }
        },
        SessionCommand::ClickProjected(projected) => match WebMercator.unproject(projected) {
            Ok(point) => dispatcher.on_map_click(point),
            Err(e) => {
                out.error(e);
                None
            }
        },
        SessionCommand::Name(name) => {
            dispatcher.set_place_name(&name);
            None
        }
        SessionCommand::Type(place_type) => {
            dispatcher.set_place_type(&place_type);
            None
        }
        SessionCommand::Radius(radius) => {
            dispatcher.set_radius(&radius);
            None
        }
        SessionCommand::Confirm => dispatcher.confirm(),
        SessionCommand::Dismiss => {
            dispatcher.dismiss();
            None
        }
        SessionCommand::Pins => {
            print_pins(dispatcher, out);
            None
        }
        SessionCommand::Status => {
            print_status(dispatcher, out);
            None
        }
        SessionCommand::Help => {
            println!("{}", HELP);
            None
        }
        SessionCommand::Quit => None,
    }
}

fn print_pins(dispatcher: &Dispatcher, out: &OutputWriter) {
    let pins = dispatcher.pins();
    out.section("Pins");
    for role in [PinRole::Persistent, PinRole::TransientDistance] {
        for handle in pins.pins(role) {
            if let Some(marker) = pins.surface().get(*handle) {
                let projected = WebMercator.project(marker.at);
                out.kv(
                    format!("#{} {:?}", handle.0, role),
                    format!("{} -> ({:.1}, {:.1})", marker.at, projected.x, projected.y),
                );
            }
        }
    }
}

fn print_status(dispatcher: &Dispatcher, out: &OutputWriter) {
    let modes = dispatcher.modes();
    out.section("Status");
    out.kv("Mode", modes.current_mode());
    if let Some(selection) = modes.pending() {
        out.kv("Selected point", selection.point);
    }
    if let Some(first) = modes.distance().pending() {
        out.kv("First distance point", first);
    }
    let inputs = modes.inputs();
    if !inputs.name.is_empty() || !inputs.place_type.is_empty() {
        out.kv("Name / Type", format!("{} / {}", inputs.name, inputs.place_type));
    }
    if !inputs.radius.is_empty() {
        out.kv(
            "Radius",
            format!("{} {}", inputs.radius, dispatcher.radius_unit().abbreviation()),
        );
    }
    let showing = match dispatcher.results().current() {
        None => "nothing".to_string(),
        Some(DisplayedResult::Created(place)) => format!("created '{}'", place.name),
        Some(DisplayedResult::Nearby(places)) => format!("{} nearby places", places.len()),
        Some(DisplayedResult::Nearest(n)) => format!("nearest '{}'", n.place.name),
        Some(DisplayedResult::Distance(m)) => format_kilometers(*m),
    };
    out.kv("Showing", showing);
    out.kv(
        "Pins",
        format!(
            "{} persistent, {} distance",
            dispatcher.pins().count(PinRole::Persistent),
            dispatcher.pins().count(PinRole::TransientDistance)
        ),
    );
}
