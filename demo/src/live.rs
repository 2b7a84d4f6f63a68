//! The `live` subcommand: three feeds on independent timers.

use std::time::Duration;

use clap::Args;
use tokio::sync::mpsc;

use wardlens_contracts::error::{WardlensError, WardlensResult};
use wardlens_live::{
    LiveFeed, OpsState, RevenueState, VitalsState, OPS_INTERVAL, REVENUE_INTERVAL,
    VITALS_INTERVAL,
};

#[derive(Args)]
pub struct LiveArgs {
    /// Stop after this many vitals ticks.
    #[arg(long, default_value_t = 5)]
    ticks: usize,
    /// Divide every cadence by this factor.
    #[arg(long, default_value_t = 1)]
    speed: u32,
}

pub async fn run(args: &LiveArgs) -> WardlensResult<()> {
    if args.speed == 0 {
        return Err(WardlensError::ConfigError {
            reason: "--speed must be at least 1".to_string(),
        });
    }
    let scaled = |d: Duration| d / args.speed;

    let mut vitals = LiveFeed::new(VitalsState::default());
    let mut ops = LiveFeed::new(OpsState::default());
    let mut revenue = LiveFeed::new(RevenueState::default());

    println!();
    println!(
        "wardlens: live feeds (vitals every {:?}, ops every {:?}, revenue every {:?})",
        scaled(VITALS_INTERVAL),
        scaled(OPS_INTERVAL),
        scaled(REVENUE_INTERVAL)
    );
    println!();

    let (tx, mut rx) = mpsc::unbounded_channel();
    vitals.subscribe(scaled(VITALS_INTERVAL), move |v: &VitalsState| {
        let _ = tx.send(*v);
    })?;
    ops.subscribe(scaled(OPS_INTERVAL), |o: &OpsState| {
        println!(
            "  [ops]     OPD {:>3}  IP admits {:>2}  OT {:>2}  ER/h {:>2}  beds {:>2}%",
            o.opd_today, o.ip_admits_today, o.ot_surgeries_today, o.er_last_hour, o.bed_occ_pct
        );
    })?;
    revenue.subscribe(scaled(REVENUE_INTERVAL), |r: &RevenueState| {
        println!("  [revenue] today ${}", r.revenue_today);
    })?;

    let mut seen = 0;
    while seen < args.ticks {
        let Some(v) = rx.recv().await else { break };
        seen += 1;
        println!(
            "  [vitals]  HR {:>5.1}  SpO2 {:>5.1}  T {:>5.1}F  BP {:>3.0}/{:<3.0}  RR {:>4.1}",
            v.hr, v.spo2, v.temp, v.sys, v.dia, v.rr
        );
    }

    vitals.unsubscribe();
    ops.unsubscribe();
    revenue.unsubscribe();

    let final_ops = ops.snapshot()?;
    println!();
    println!("  Stopped after {} vitals tick(s); OPD today {}.", seen, final_ops.opd_today);
    println!();
    Ok(())
}
