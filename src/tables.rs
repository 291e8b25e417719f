use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use ordered_float::OrderedFloat;

use crate::{
    bill::{extracted::Confidence, normalize::NormalizedBill},
    catalog::provider::Provider,
    core::{distribution::ColorDistribution, ranking::ProviderCost},
    quantity::{Quantity, cost::Cost},
};

/// Cost differences below half a euro per month read as noise.
const SIMILAR_MARGIN: Cost = Quantity(OrderedFloat(0.5));

pub fn build_comparison_table(
    costs: &[ProviderCost<'_>],
    baseline_id: &str,
    distribution: &ColorDistribution,
) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec![
        "#",
        "Provider",
        "Tariff",
        "Rate",
        "Fee",
        "Monthly",
        "Annual",
        "Savings / year",
    ]);
    for (index, cost) in costs.iter().enumerate() {
        let is_baseline = cost.provider.id == baseline_id;
        let is_cheapest = index == 0;

        let rank = if is_baseline {
            Cell::new("★").add_attribute(Attribute::Bold)
        } else {
            Cell::new(index + 1)
        };
        let name = Cell::new(&cost.provider.name).fg(if is_baseline {
            Color::Grey
        } else if is_cheapest {
            Color::Green
        } else {
            Color::Reset
        });
        table.add_row(vec![
            rank,
            name,
            Cell::new(format!("{:?}", cost.provider.tariff_kind())),
            Cell::new(cost.provider.display_rate(distribution)).set_alignment(CellAlignment::Right),
            Cell::new(cost.provider.monthly_fee).set_alignment(CellAlignment::Right),
            Cell::new(cost.monthly_cost).set_alignment(CellAlignment::Right),
            Cell::new(cost.annual_cost)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            savings_cell(cost, is_baseline),
        ]);
    }
    table
}

fn savings_cell(cost: &ProviderCost<'_>, is_baseline: bool) -> Cell {
    if is_baseline {
        Cell::new("baseline").add_attribute(Attribute::Dim)
    } else if cost.savings_vs_current > SIMILAR_MARGIN {
        Cell::new(-cost.annual_savings).set_alignment(CellAlignment::Right).fg(Color::Green)
    } else if cost.savings_vs_current < -SIMILAR_MARGIN {
        Cell::new(format!("+{}", -cost.annual_savings))
            .set_alignment(CellAlignment::Right)
            .fg(Color::Red)
    } else {
        Cell::new("≈ same").add_attribute(Attribute::Dim)
    }
}

#[must_use]
pub fn build_catalog_table(providers: &[Provider]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Id", "Provider", "Tariff", "Rate", "Fee", "Lock-in", "Green", "Phone"]);
    for provider in providers {
        table.add_row(vec![
            Cell::new(&provider.id).add_attribute(Attribute::Dim),
            Cell::new(if provider.is_program {
                format!("{} (program)", provider.name)
            } else {
                provider.name.clone()
            }),
            Cell::new(format!("{:?}", provider.tariff_kind())),
            Cell::new(provider.display_rate(&ColorDistribution::TYPICAL))
                .set_alignment(CellAlignment::Right),
            Cell::new(provider.monthly_fee).set_alignment(CellAlignment::Right),
            Cell::new(if provider.contract_months == 0 {
                "—".to_string()
            } else {
                format!("{} mo", provider.contract_months)
            }),
            Cell::new(if provider.green_energy {
                format!("{} %", provider.green_energy_percent)
            } else {
                "—".to_string()
            })
            .fg(if provider.green_energy { Color::Green } else { Color::Reset }),
            Cell::new(provider.info.phone.as_deref().unwrap_or("—")),
        ]);
    }
    table
}

#[must_use]
pub fn build_bill_table(bill: &NormalizedBill) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Extracted", "Value"]);

    let kwh = match (bill.raw_kwh, bill.monthly_kwh) {
        (Some(raw), Some(monthly)) => format!("{raw:.0} kWh on the bill → {monthly} / month"),
        (Some(raw), None) => format!("{raw:.0} kWh (implausible, ignored)"),
        _ => "—".to_string(),
    };
    table.add_row(vec![Cell::new("Consumption"), Cell::new(kwh)]);
    table.add_row(vec![
        Cell::new("Billing days"),
        Cell::new(bill.billing_days.map_or_else(|| "—".to_string(), |days| days.to_string())),
    ]);
    table.add_row(vec![
        Cell::new("Supplier"),
        Cell::new(match (&bill.provider_name, bill.provider_id) {
            (Some(name), Some(id)) => format!("{name} → {id}"),
            (Some(name), None) => format!("{name} (not recognised)"),
            _ => "—".to_string(),
        }),
    ]);
    table.add_row(vec![
        Cell::new("Tariff"),
        Cell::new(match &bill.tariff_name {
            Some(name) if bill.student_tariff => format!("{name} (student)"),
            Some(name) => name.clone(),
            None => "—".to_string(),
        }),
    ]);
    table.add_row(vec![
        Cell::new("Amount payable"),
        Cell::new(bill.bill_amount.map_or_else(|| "—".to_string(), |amount| amount.to_string())),
    ]);
    table.add_row(vec![
        Cell::new("Confidence"),
        Cell::new(bill.confidence).fg(match bill.confidence {
            Confidence::High => Color::Green,
            Confidence::Medium => Color::DarkYellow,
            Confidence::Low => Color::Red,
        }),
    ]);
    table
}
