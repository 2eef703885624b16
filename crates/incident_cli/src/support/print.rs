use core_model::incident::IncidentRecord;
use core_model::region::RegionConfig;
use core_model::Severity;
use core_view::{DashboardSession, ResolvedView, Statistics, Viewport};
use incident_store::{Dataset, LoadReport};

pub fn print_query_header(session: &DashboardSession) {
    println!(
        "{} of {} incidents match ({} active filters)",
        session.filtered_len(),
        session.dataset().len(),
        session.filters().active_facet_count()
    );
}

pub fn print_record(record: &IncidentRecord, selected: bool) {
    let marker = if selected { "*" } else { "-" };
    let opposing = if record.actor_secondary.trim().is_empty() {
        String::new()
    } else {
        format!(" vs {}", record.actor_secondary)
    };
    println!(
        "{} {} [{}] {} ({}{})",
        marker,
        record.id,
        record.severity,
        record.title,
        record.actor_primary,
        opposing
    );
    println!(
        "    {} | {}, {} | injured {} dead {}{}",
        record.timestamp.format("%Y-%m-%d %H:%M"),
        record.location.district,
        record.location.division,
        record.casualties.injured,
        record.casualties.dead,
        if record.verified { " | verified" } else { "" }
    );
}

pub fn print_viewport(viewport: &Viewport, resolved: &ResolvedView) {
    match viewport {
        Viewport::Center { center, zoom } => println!(
            "Viewport: centre {:.4},{:.4} zoom {}",
            center.lat, center.lng, zoom
        ),
        Viewport::Fit { bounds, padding_px } => println!(
            "Viewport: fit N {:.4} S {:.4} E {:.4} W {:.4} (padding {}px)",
            bounds.north, bounds.south, bounds.east, bounds.west, padding_px
        ),
    }
    println!(
        "Resolved: centre {:.4},{:.4} zoom {}",
        resolved.center.lat, resolved.center.lng, resolved.zoom
    );
}

pub fn print_facets(dataset: &Dataset, region: &RegionConfig) {
    print_list("Political parties", dataset.distinct_actors());
    print_list("Districts", dataset.distinct_districts());
    print_list("Divisions", &region.divisions);
    println!("Severities:");
    for severity in Severity::ALL {
        println!("  {} ({})", severity, dataset.metadata().severity_label(severity));
    }
}

fn print_list(title: &str, values: &[String]) {
    println!("{} ({}):", title, values.len());
    for value in values {
        println!("  {}", value);
    }
}

pub fn print_load_report(report: &LoadReport) {
    println!(
        "Loaded {} incidents from {} (policy: {})",
        report.accepted, report.origin, report.policy
    );
    if !report.rejected.is_empty() {
        println!("Rejected {} records:", report.rejected.len());
        for rejected in &report.rejected {
            println!(
                "  #{} {}: {}",
                rejected.position,
                rejected.id.as_deref().unwrap_or("<no id>"),
                rejected.reason
            );
        }
    }
}

pub fn print_statistics(stats: &Statistics<'_>) {
    println!(
        "Events: {} | Injured: {} | Dead: {}",
        stats.total_events, stats.total_injured, stats.total_dead
    );
    println!("By severity:");
    for (severity, count) in &stats.by_severity {
        println!("  {}: {}", severity, count);
    }
    println!("By division:");
    for (division, count) in &stats.by_division {
        println!("  {}: {}", division, count);
    }
    println!("By party:");
    for (actor, count) in &stats.by_actor {
        println!("  {}: {}", actor, count);
    }
    if !stats.recent_events.is_empty() {
        println!("Most recent:");
        for record in &stats.recent_events {
            print_record(record, false);
        }
    }
}
