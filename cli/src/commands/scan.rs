use std::sync::Arc;

use colored::*;

use webdeck_core::cache::{CacheSnapshot, ServiceCache};
use webdeck_core::network::interface::InterfaceResolver;
use webdeck_core::probe::ServiceProber;
use webdeck_core::probe::http::HttpFetcher;
use webdeck_core::scanner::{self, PortSweep};
use webdeck_core::scheduler::{CycleReport, Scheduler};

use crate::dprint;
use crate::terminal::{colors, format, print, progress::SweepProgress};

pub async fn scan() -> anyhow::Result<()> {
    let cache: Arc<ServiceCache> = Arc::new(ServiceCache::new());
    let prober = ServiceProber::new(HttpFetcher::new()?);
    let progress = SweepProgress::start(scanner::total_ports());

    let bar = progress.bar();
    let sweep = PortSweep::new().on_progress(Arc::new(move |done: usize| {
        bar.set_position(done as u64);
    }));

    let scheduler = Scheduler::new(
        cache.clone(),
        Box::new(InterfaceResolver),
        Box::new(sweep),
        prober,
    );

    let mut phases = scheduler.phases();
    let cycle = scheduler.run_cycle();
    tokio::pin!(cycle);

    let report: CycleReport = loop {
        tokio::select! {
            report = &mut cycle => break report,
            changed = phases.changed() => {
                if changed.is_ok() {
                    progress.set_message(format!("{}", *phases.borrow_and_update()));
                }
            }
        }
    };
    progress.finish();

    print_inventory(&cache.snapshot(), &report);
    Ok(())
}

fn print_inventory(snapshot: &CacheSnapshot, report: &CycleReport) {
    if snapshot.no_services {
        print::header("zero services detected");
        print::no_results();
        return;
    }

    print::header(&format!("web services on {}", report.address));
    for (idx, record) in snapshot.services.iter().enumerate() {
        print::tree_head(idx, &record.title);
        print::as_tree_one_level(format::service_to_details(record));
        if idx + 1 != snapshot.services.len() {
            dprint!();
        }
    }

    let services: ColoredString = format!("{} web services", report.services).bold().green();
    let open: ColoredString = format!("{} open ports", report.open_ports).bold();
    let total_time: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64())
        .bold()
        .yellow();
    print::fat_separator();
    print::centerln(
        &format!("Scan Complete: {services} out of {open} in {total_time}")
            .color(colors::TEXT_DEFAULT)
            .to_string(),
    );
}
