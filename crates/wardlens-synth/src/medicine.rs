//! Medicine stock ranking built from raw medication records.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use wardlens_contracts::{derived::MedicineStockItem, filter::UNKNOWN};
use wardlens_core::{
    normalize::{resolve_text, Accessor},
    seeded::seeded,
};

use crate::{config::SynthConfig, draw::draw_count};

/// Where a medication's display name may live in a raw record.
pub const MEDICATION_NAME: &[Accessor] = &[
    Accessor::Key("medication_name"),
    Accessor::Key("name"),
    Accessor::Key("medication"),
    Accessor::Key("drug"),
    Accessor::Key("description"),
    Accessor::Key("DESCRIPTION"),
    Accessor::Key("Medication"),
];

pub fn medication_name(raw: &Value) -> String {
    raw.as_object()
        .and_then(|record| resolve_text(MEDICATION_NAME, record))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Aggregate medication records by name and keep the top sellers.
///
/// Record `i` is seeded by `med_{name}_{i}` and draws its sale quantity
/// first. The first record for a name sets stock to the sale quantity plus a
/// margin; each repeat adds its sale quantity and a smaller restock amount.
/// Ties in sale quantity keep first-seen order.
pub fn derive_medicine_stock(medications: &[Value], config: &SynthConfig) -> Vec<MedicineStockItem> {
    let cfg = &config.medicine;
    let mut items: Vec<MedicineStockItem> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for (i, raw) in medications.iter().enumerate() {
        let name = medication_name(raw);
        let mut rng = seeded(&format!("med_{}_{}", name, i));
        let sale = draw_count(&mut rng, cfg.sale_qty);

        match index_by_name.get(&name).copied() {
            Some(idx) => {
                let item = &mut items[idx];
                item.sale_qty = item.sale_qty.saturating_add(sale);
                item.stock_qty = item
                    .stock_qty
                    .saturating_add(sale)
                    .saturating_add(draw_count(&mut rng, cfg.restock));
            }
            None => {
                let stock_qty = sale.saturating_add(draw_count(&mut rng, cfg.stock_margin));
                index_by_name.insert(name.clone(), items.len());
                items.push(MedicineStockItem {
                    name,
                    sale_qty: sale,
                    stock_qty,
                });
            }
        }
    }

    let distinct = items.len();
    items.sort_by(|a, b| b.sale_qty.cmp(&a.sale_qty));
    items.truncate(cfg.top_n);
    debug!(records = medications.len(), distinct, kept = items.len(), "medicine stock derived");
    items
}
