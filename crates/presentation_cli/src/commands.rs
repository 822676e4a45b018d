//! Subcommand handlers

use std::{path::Path, sync::Arc};

use anyhow::{Context, anyhow, bail};
use application::{
    FilterController, LocationResolver, ReportBuilder, ReportLayout, ReportSession, ResolverState,
    location_message,
};
use domain::{ColumnKey, ConditionOption, ConditionOptions, GeoLocation, LocationSelection};
use infrastructure::{AppConfig, ForecastAdapter, GeocodingAdapter, WorkbookHost, export_xlsx};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::args::{FilterArgs, GenerateArgs};

fn resolver(config: &AppConfig) -> anyhow::Result<LocationResolver> {
    let geocoder = GeocodingAdapter::new(&config.geocoding)?;
    Ok(LocationResolver::with_config(
        Arc::new(geocoder),
        config.resolver.to_resolver_config(&config.geocoding),
    ))
}

fn open_host(config: &AppConfig) -> anyhow::Result<Arc<WorkbookHost>> {
    let host = WorkbookHost::open(&config.document)
        .with_context(|| format!("Failed to open {}", config.document.display()))?;
    Ok(Arc::new(host))
}

fn report_options(host: &WorkbookHost, config: &AppConfig) -> anyhow::Result<ConditionOptions> {
    host.condition_options(ReportLayout::TABLE_NAME).ok_or_else(|| {
        anyhow!(
            "No report in {}; run `generate` first",
            config.document.display()
        )
    })
}

fn print_state(state: &ResolverState) {
    if let Some(message) = state.message() {
        println!("{message}");
    }
    for (index, suggestion) in state.suggestions().iter().enumerate() {
        println!(
            "{:>2}. {}  ({:.4}, {:.4})",
            index + 1,
            suggestion.label,
            suggestion.coordinates.latitude(),
            suggestion.coordinates.longitude()
        );
    }
}

/// `search`
pub async fn search(
    config: &AppConfig,
    query: Option<String>,
    pick: Option<usize>,
) -> anyhow::Result<()> {
    let resolver = resolver(config)?;

    let Some(query) = query else {
        return search_interactive(resolver).await;
    };

    let state = resolver.resolve_now(query.trim()).await;
    match pick {
        Some(n) => {
            let selection = n
                .checked_sub(1)
                .and_then(|index| resolver.select(index))
                .ok_or_else(|| anyhow!("No suggestion #{n} for '{query}'"))?;
            println!("{}", selection.display_text);
        },
        None => print_state(&state),
    }
    Ok(())
}

/// Debounced lookups over stdin lines
async fn search_interactive(resolver: LocationResolver) -> anyhow::Result<()> {
    let mut updates = resolver.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            print_state(&state);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = String::new();
    while let Some(line) = lines.next_line().await? {
        last = line.trim().to_string();
        resolver.on_input(&last);
    }

    // stdin closed: settle the last input instead of waiting out the timer
    printer.abort();
    if !last.is_empty() && matches!(resolver.state(), ResolverState::Loading) {
        print_state(&resolver.flush(&last).await);
    }
    Ok(())
}

async fn resolve_location(
    config: &AppConfig,
    args: &GenerateArgs,
) -> anyhow::Result<(LocationSelection, ResolverState)> {
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        let coordinates = GeoLocation::new(lat, lon)?;
        let label = args
            .label
            .clone()
            .unwrap_or_else(|| coordinates.path_segment());
        return Ok((
            LocationSelection {
                coordinates: Some(coordinates),
                display_text: label,
            },
            ResolverState::Idle,
        ));
    }

    let text = args.location.as_deref().unwrap_or_default().trim();
    let resolver = resolver(config)?;
    let state = resolver.resolve_now(text).await;
    let selection = args
        .pick
        .checked_sub(1)
        .and_then(|index| resolver.select(index))
        .unwrap_or_else(|| LocationSelection::typed(text));
    debug!(resolved = selection.is_resolved(), label = %selection.display_text, "Location chosen");
    Ok((selection, state))
}

/// `generate`
pub async fn generate(config: &AppConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let (selection, resolver_state) = resolve_location(config, &args).await?;

    let host = open_host(config)?;
    let forecast = ForecastAdapter::new(&config.forecast)?;
    let builder = ReportBuilder::new(Arc::new(forecast), host.clone());
    let filters = FilterController::for_layout(host.clone(), builder.layout());
    let mut session = ReportSession::new(builder, filters);

    let today = chrono::Local::now().date_naive();
    let form = session.form_mut();
    form.set_location(selection);
    form.set_start_date(args.start.unwrap_or(today), today)?;
    form.set_days(args.days);

    if !session.generate_report().await {
        let errors = session.form().errors();
        if let Some(message) = location_message(&errors, &resolver_state) {
            println!("❌ Location: {message}");
        }
        if let Some(message) = errors.start_date {
            println!("❌ Start date: {message}");
        }
        bail!("Report was not generated");
    }

    host.save()?;
    let workbook = host.snapshot();
    let rows = workbook
        .table(ReportLayout::TABLE_NAME)
        .map(|table| table.rows.len())
        .unwrap_or_default();

    println!("✅ {}", session.title().unwrap_or_default());
    println!("   {rows} day(s) written to {}", config.document.display());
    if let Some(options) = session.condition_options() {
        println!("   Conditions: {}", join_options(options));
    }

    if let Some(output) = &args.output {
        export_xlsx(&workbook, output)?;
        println!("   📊 Exported to {}", output.display());
    }
    Ok(())
}

fn join_options(options: &ConditionOptions) -> String {
    options
        .iter()
        .map(|o| format!("{}={}", o.key, o.text))
        .collect::<Vec<_>>()
        .join(", ")
}

fn find_condition(options: &ConditionOptions, value: &str) -> Option<ConditionOption> {
    let value = value.trim();
    value
        .parse::<u32>()
        .ok()
        .and_then(|key| options.find_by_key(key))
        .or_else(|| options.find_by_text(value))
        .or_else(|| options.iter().find(|o| o.text.eq_ignore_ascii_case(value)))
        .cloned()
}

/// `filter`
pub async fn filter(config: &AppConfig, args: FilterArgs) -> anyhow::Result<()> {
    let host = open_host(config)?;
    let options = report_options(&host, config)?;
    let condition = match &args.condition {
        Some(value) => Some(find_condition(&options, value).ok_or_else(|| {
            anyhow!("Unknown condition '{value}'. Options: {}", join_options(&options))
        })?),
        None => None,
    };
    let mut session = ReportSession::resume(FilterController::new(host.clone()), options);

    if args.reset {
        if !session.reset_filters().await {
            bail!("Filters were not cleared");
        }
        println!("🧹 Filters cleared");
    }

    if let Some(option) = condition {
        if !session.filter_by_condition(option.key).await {
            bail!("Condition filter '{}' was not applied", option.text);
        }
        println!("🔎 Condition: {}", option.text);
    }

    if let Some(range) = args.cloud_cover {
        session.set_cloud_cover_range(range);
        if !session.filter_by_cloud_cover().await {
            bail!("Cloud cover filter {range} was not applied");
        }
        println!("☁️  Cloud cover: {}", session.cloud_cover());
    }

    host.save()?;

    let workbook = host.snapshot();
    let table = workbook.table(ReportLayout::TABLE_NAME)?;
    let visible = table.visible_rows()?.len();
    info!(visible, total = table.rows.len(), "Filters applied");
    println!("   {visible} of {} day(s) shown", table.rows.len());
    Ok(())
}

/// `conditions`
pub fn conditions(config: &AppConfig) -> anyhow::Result<()> {
    let host = open_host(config)?;
    let options = report_options(&host, config)?;

    let workbook = host.snapshot();
    let active = workbook
        .table(ReportLayout::TABLE_NAME)
        .ok()
        .and_then(|table| table.filters.get(ColumnKey::Conditions.label()))
        .map(|filter| filter.criterion1.clone());

    for option in options.iter() {
        println!("{:>3}  {}", option.key, option.text);
    }
    if let Some(criterion) = active {
        println!("\nActive condition filter: {criterion}");
    }
    Ok(())
}

/// `export`
pub fn export(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let host = open_host(config)?;
    export_xlsx(&host.snapshot(), path)?;
    println!("📊 Exported {} to {}", config.document.display(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ConditionOptions {
        ConditionOptions::from_joined(["Rain, Overcast", "Partially cloudy"])
    }

    #[test]
    fn condition_by_key() {
        let option = find_condition(&options(), "2").unwrap();
        assert_eq!(option.text, "Overcast");
    }

    #[test]
    fn condition_by_text_ignores_case() {
        let option = find_condition(&options(), "partially CLOUDY").unwrap();
        assert_eq!(option.key, 3);
    }

    #[test]
    fn show_all_by_key_or_text() {
        assert!(find_condition(&options(), "0").unwrap().is_show_all());
        assert!(find_condition(&options(), "Show All").unwrap().is_show_all());
    }

    #[test]
    fn unknown_condition() {
        assert!(find_condition(&options(), "Hail").is_none());
        assert!(find_condition(&options(), "42").is_none());
    }

    #[test]
    fn joined_option_list() {
        assert_eq!(
            join_options(&options()),
            "0=Show All, 1=Rain, 2=Overcast, 3=Partially cloudy"
        );
    }
}
