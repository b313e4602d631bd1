use crate::infra::memory_service;
use clap::Args;
use process_match::catalog::{Catalog, CatalogImporter};
use process_match::error::AppError;
use process_match::placement::{
    Communication, MemoryPlacementStore, PlacementRequest, PlacementService, Potential,
    ReassignmentRequest,
};
use process_match::report::{PlacementReport, PlacementReportSummary, StaffingInsights};
use std::io::Cursor;
use std::path::PathBuf;

// Seed rows mirroring the catalog the service was first rolled out with.
const DEMO_CATALOG: &str = "\
name,potential,communication,vacancy
TVS CC,Service,Good,20
CW Massbrand,Consultation,Excellent,9
CW Inbound,Service,Good,8
Bgauss CC,Service,Good,3
TVS Credit,Service,Good,2
abSure,Consultation,Excellent,2
Consumer Feedback,Support,Good,2
Citroen CC,Service,Good,2
CW Cross Sell,Service,Good,2
Bajaj Online Booking,Sales,Good,1
TVS DC,Service,Good,1
Jawa & Yezdi DC,Service,Good,1
Piaggio DC,Service,Good,1
Ather DC,Service,Good,1
Jeep CC,Service,Good,1
Citroen DC,Service,Good,1
UCD CC,Service,Good,1
";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Catalog CSV file to load instead of the built-in demo data.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Skip the reassignment portion of the demo.
    #[arg(long)]
    pub(crate) skip_reassignment: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogCheckArgs {
    /// Catalog CSV file to validate
    #[arg(long)]
    pub(crate) file: PathBuf,
}

pub(crate) fn run_catalog_check(args: CatalogCheckArgs) -> Result<(), AppError> {
    let CatalogCheckArgs { file } = args;

    let catalog = CatalogImporter::from_path(&file)?;
    println!("Catalog file: {}", file.display());
    println!(
        "- {} processes | {} open slots",
        catalog.len(),
        catalog.total_open_slots()
    );

    let report = PlacementReport::build(catalog.processes(), &[]);
    let summary = report.summary();
    let insights = summary.insights();

    println!("\nOpen slots by potential");
    for entry in &summary.potential_distribution {
        println!(
            "- {}: {} processes ({:.1}% of catalog) | {} open slots",
            entry.potential.label(),
            entry.processes,
            entry.share_pct,
            entry.open_slots
        );
    }

    let full: Vec<&str> = catalog
        .processes()
        .iter()
        .filter(|process| !process.has_open_slots())
        .map(|process| process.name.as_str())
        .collect();
    if full.is_empty() {
        println!("\nEvery process has at least one open slot");
    } else {
        println!("\nProcesses with no open slots");
        for name in full {
            println!("- {name}");
        }
    }

    println!("\nCapacity: {}", insights.capacity_level.label());
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog,
        skip_reassignment,
    } = args;

    println!("Process matching demo");
    let (catalog, imported) = load_demo_catalog(catalog)?;
    if imported {
        println!("Data source: catalog CSV import");
    } else {
        println!("Data source: built-in demo catalog");
    }

    let service = memory_service();
    let open_slots = catalog.total_open_slots();
    let installed = match service.install_catalog(catalog) {
        Ok(installed) => installed,
        Err(err) => {
            println!("  Catalog installation failed: {err}");
            return Ok(());
        }
    };
    println!("Installed {installed} processes with {open_slots} open slots");

    println!("\nSuggested processes for Jane Smith (Sales / Excellent)");
    match service.suggestions(Potential::Sales, Communication::Excellent) {
        Ok(suggestions) => {
            for suggestion in &suggestions {
                println!(
                    "- {} (relevance {}, {} open slots)",
                    suggestion.process.name, suggestion.relevance, suggestion.process.vacancy
                );
            }
        }
        Err(err) => {
            println!("  Suggestions unavailable: {err}");
            return Ok(());
        }
    }

    println!("\nPlacing demo employees");
    let mut reassignment_candidate = None;
    for employee in demo_employees() {
        let label = format!(
            "{} ({} / {})",
            employee.name,
            employee.potential.label(),
            employee.communication.label()
        );
        let result = match service.allocate(employee.clone()) {
            Ok(result) => result,
            Err(err) => {
                println!("  Allocation failed for {label}: {err}");
                return Ok(());
            }
        };
        match result.process_name.as_deref() {
            Some(process) => println!("- {label} -> {process} [{}]", result.assignment_id.0),
            None => println!("- {label} -> no open process; recorded as unplaced"),
        }
        if employee.email == "mark@example.com" {
            reassignment_candidate = Some(result.assignment_id);
        }
    }

    if !skip_reassignment {
        if let Some(mark_id) = reassignment_candidate {
            println!("\nReassigning Mark Johnson to abSure");
            let request = ReassignmentRequest {
                name: "Mark Johnson".to_string(),
                email: "mark@example.com".to_string(),
                potential: Potential::Consultation,
                communication: Communication::VeryGood,
                process: Some("abSure".to_string()),
            };
            match service.reassign(&mark_id, request) {
                Ok(updated) => {
                    println!(
                        "- now on {}",
                        updated.process.as_deref().unwrap_or("the bench")
                    );
                    if let Some(released) = vacancy_of(&service, "CW Massbrand") {
                        println!("- CW Massbrand open slots back to {released}");
                    }
                    if let Some(taken) = vacancy_of(&service, "abSure") {
                        println!("- abSure open slots down to {taken}");
                    }
                }
                Err(err) => {
                    println!("  Reassignment failed: {err}");
                    return Ok(());
                }
            }
        }
    }

    let assignments = match service.list() {
        Ok(assignments) => assignments,
        Err(err) => {
            println!("  Assignment listing unavailable: {err}");
            return Ok(());
        }
    };
    println!("\nCurrent assignments (newest first)");
    for record in &assignments {
        match record.process.as_deref() {
            Some(process) => println!(
                "- {} <{}> on {} since {}",
                record.employee.name,
                record.employee.email,
                process,
                record.assigned_at.date_naive()
            ),
            None => println!(
                "- {} <{}> awaiting placement",
                record.employee.name, record.employee.email
            ),
        }
    }

    let report = match service.report() {
        Ok(report) => report,
        Err(err) => {
            println!("  Report unavailable: {err}");
            return Ok(());
        }
    };
    let summary = report.summary();
    let insights = summary.insights();
    render_placement_report(&summary, &insights);

    Ok(())
}

fn demo_employees() -> Vec<PlacementRequest> {
    vec![
        PlacementRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            potential: Potential::Service,
            communication: Communication::Good,
        },
        PlacementRequest {
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            potential: Potential::Sales,
            communication: Communication::Excellent,
        },
        PlacementRequest {
            name: "Mark Johnson".to_string(),
            email: "mark@example.com".to_string(),
            potential: Potential::Consultation,
            communication: Communication::VeryGood,
        },
        PlacementRequest {
            name: "Priya Nair".to_string(),
            email: "priya@example.com".to_string(),
            potential: Potential::Sales,
            communication: Communication::VeryGood,
        },
    ]
}

fn load_demo_catalog(path: Option<PathBuf>) -> Result<(Catalog, bool), AppError> {
    match path {
        Some(path) => CatalogImporter::from_path(path)
            .map(|catalog| (catalog, true))
            .map_err(AppError::from),
        None => CatalogImporter::from_reader(Cursor::new(DEMO_CATALOG))
            .map(|catalog| (catalog, false))
            .map_err(AppError::from),
    }
}

fn vacancy_of(service: &PlacementService<MemoryPlacementStore>, name: &str) -> Option<u32> {
    service
        .catalog()
        .ok()?
        .into_iter()
        .find(|process| process.name == name)
        .map(|process| process.vacancy)
}

fn render_placement_report(summary: &PlacementReportSummary, insights: &StaffingInsights) {
    println!("\nPlacement report");
    println!(
        "- {} processes, {} with open slots, {} open slots total",
        summary.total_processes, summary.open_processes, summary.open_slots
    );
    println!(
        "- {} allocation attempts: {} placed, {} unplaced",
        summary.placements, summary.placed, summary.unplaced
    );

    println!("\nOpen slots by potential");
    for entry in &summary.potential_distribution {
        println!(
            "- {}: {} processes ({:.1}% of catalog) | {} open slots",
            entry.potential.label(),
            entry.processes,
            entry.share_pct,
            entry.open_slots
        );
    }

    println!("\nDaily placement history");
    for day in &summary.daily_history {
        println!(
            "- {}: {} attempts ({} placed, {} failed)",
            day.date, day.total, day.successful, day.failed
        );
    }

    println!("\nCapacity: {}", insights.capacity_level.label());
    if let Some(pool) = &insights.deepest_pool {
        println!("Deepest pool: {pool}");
    }
    if !insights.depleted_potentials.is_empty() {
        println!(
            "Depleted potentials: {}",
            insights.depleted_potentials.join(", ")
        );
    }

    if !insights.observations.is_empty() {
        println!("\nObservations");
        for note in &insights.observations {
            println!("- {note}");
        }
    }
}
