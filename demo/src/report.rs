//! Plain-text rendering of a dashboard.

use wardlens_contracts::{
    dashboard::Dashboard,
    filter::{EncounterFilters, PatientFilters},
};
use wardlens_core::aggregate::{
    apply_filters, apply_patient_filters, count_by_key, count_by_month, most_recent,
    patient_kpis, sum_cost,
};

const RULE: &str = "=================================";

fn heading(title: &str) {
    println!();
    println!("=== {} ===", title);
    println!();
}

pub fn print_summary(d: &Dashboard) {
    println!();
    println!("wardlens: hospital overview");
    println!("{}", RULE);

    heading("Hospital KPIs");
    let k = &d.kpis;
    println!("  Patients:               {}", k.total_patients);
    println!("  Encounters:             {}", k.total_encounters);
    println!("  Departments:            {}", k.departments);
    println!("  Readmission rate:       {:.1}%", k.readmission_rate_pct);
    println!("  Total cost:             ${:.2}", k.total_cost_usd);
    println!("  Conditions / meds:      {} / {}", k.total_conditions, k.total_medications);
    println!("  Observations / imaging: {} / {}", k.total_observations, k.total_imaging_studies);
    println!("  Beds (illustrative):    {}", k.bed_capacity);
    println!("  Staff (illustrative):   {}", k.staff_on_duty);

    heading("Doctors");
    for doc in &d.doctors {
        let patients = d
            .doctor_by_patient
            .values()
            .filter(|id| **id == doc.doctor_id)
            .count();
        println!(
            "  {}  {:<24} {:<20} {:<9} rating {:.1}  {} patient(s)",
            doc.doctor_id,
            doc.doctor_name,
            doc.specialization,
            format!("{:?}", doc.status),
            doc.rating,
            patients
        );
    }

    heading("Charges");
    if d.charges.is_empty() {
        println!("  (no encounters)");
    }
    for bucket in &d.charges {
        println!("  {:<10} ${:>12.2}", bucket.category.label(), bucket.amount);
    }
    println!("  {:<10} ${:>12.2}", "Total", d.total_bill_amount);

    heading("Medicine stock (top sellers)");
    if d.medicine_stock.is_empty() {
        println!("  (no medications)");
    }
    for item in &d.medicine_stock {
        println!("  {:<28} sold {:>5}   in stock {:>5}", item.name, item.sale_qty, item.stock_qty);
    }

    heading("Monthly trend");
    if d.trends.is_empty() {
        println!("  (no dated encounters)");
    }
    for point in &d.trends {
        println!("  {:<8} {:>5}", point.label, point.value);
    }

    heading("Upcoming appointments");
    for appt in d.appointments.iter().take(5) {
        println!(
            "  {}  {:<20} with {:<22} {:<10} {:?}",
            appt.appointment_id, appt.patient_name, appt.doctor_name, appt.date, appt.status
        );
    }
    println!();
}

pub fn print_encounters(d: &Dashboard, filters: &EncounterFilters, limit: usize) {
    let selected = apply_filters(&d.clinical.encounters, filters);

    heading("Encounters");
    println!(
        "  Filters: department={} type={} year={} readmitted={}",
        filters.department, filters.encounter_type, filters.year, filters.readmitted
    );
    println!("  Options: departments {:?}", d.filter_options.department);
    println!("           years       {:?}", d.filter_options.year);
    println!();
    println!("  Matching encounters:    {}", selected.len());
    println!("  Matching cost:          ${:.2}", sum_cost(&selected));

    heading("By department");
    for row in count_by_key(&selected, "department", limit) {
        println!("  {:<24} {:>5}", row.name, row.value);
    }

    heading("By month");
    for row in count_by_month(&selected) {
        println!("  {:<8} {:>5}", row.name, row.value);
    }

    heading("Most recent");
    for e in most_recent(&selected, limit) {
        let date = if e.date_str.is_empty() { "-" } else { e.date_str.as_str() };
        println!(
            "  {:<10} {:<8} {:<12} {:<18} ${:>10.2}",
            e.encounter_id, e.patient_id, date, e.department, e.total_cost_usd
        );
    }
    println!();
}

pub fn print_patients(d: &Dashboard, filters: &PatientFilters) {
    let selected = apply_patient_filters(&d.clinical.patients, filters);
    let kpis = patient_kpis(&selected);

    heading("Patients");
    println!("  Total: {}   Male: {}   Female: {}", kpis.total, kpis.male, kpis.female);
    println!("  Options: gender {:?}", d.patient_filter_options.gender);
    println!();
    for p in &selected {
        let age = p.age.map_or_else(|| "-".to_string(), |a| a.to_string());
        let doctor = d
            .doctor_by_patient
            .get(&p.patient_id)
            .and_then(|id| d.doctors.iter().find(|doc| &doc.doctor_id == id))
            .map_or("Unassigned", |doc| doc.doctor_name.as_str());
        println!(
            "  {:<10} {:<22} {:<7} {:>3}  {:<14} {:<22} {}",
            p.patient_id, p.full_name, p.gender, age, p.city, p.primary_condition_name, doctor
        );
    }
    println!();
}
