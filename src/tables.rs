use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use rrc_savings::{
    band::{ChartSeries, Direction},
    currency::Currency,
    fmt::FormattedMonths,
    label::LabelSet,
    projection::BreakEven,
    projector::Projection,
    quantity::{cost::Cost, ratios::Percentage, time::Months},
    query::{QueryPoint, Reading},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn cost_cell(cost: Cost, currency: Currency) -> Cell {
    Cell::new(currency.format(cost)).set_alignment(CellAlignment::Right).fg(
        if cost > Cost::ZERO {
            Color::Green
        } else if cost < Cost::ZERO {
            Color::Red
        } else {
            Color::Reset
        },
    )
}

fn break_even_cell(break_even: BreakEven, upfront_delta: Cost, horizon: Months) -> Cell {
    if !upfront_delta.is_positive() {
        return Cell::new("-").add_attribute(Attribute::Dim);
    }
    match break_even.within(horizon) {
        Some(month) => Cell::new(FormattedMonths(month)).fg(Color::Green),
        None => Cell::new("never").fg(Color::Red),
    }
}

fn marker_cell(break_even: Option<Months>) -> Cell {
    break_even.map_or_else(
        || Cell::new("-").add_attribute(Attribute::Dim),
        |month| Cell::new(month).set_alignment(CellAlignment::Right),
    )
}

/// Per-class savings summary.
pub fn build_summary_table(projection: &Projection, currency: Currency) -> Table {
    let horizon = projection.horizon();
    let mut table = new_table();
    table.set_header(vec![
        "Class",
        "RRC",
        "Annual savings",
        format!("Over {} yr", projection.years).as_str(),
        "Upfront delta",
        "Break-even",
    ]);
    for class in &projection.classes {
        table.add_row(vec![
            Cell::new(&class.class.label).add_attribute(Attribute::Bold),
            Cell::new(class.class.midpoint).add_attribute(Attribute::Dim),
            cost_cell(class.annual_savings, currency),
            cost_cell(class.annual_savings * f64::from(projection.years), currency),
            Cell::new(currency.format(class.upfront_delta)).set_alignment(CellAlignment::Right),
            break_even_cell(class.break_even, class.upfront_delta, horizon),
        ]);
    }
    table
}

/// Chart datasets with their start and end values.
pub fn build_chart_table(projection: &Projection, currency: Currency) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Class", "Series", "Start", "End", "Break-even"]);
    for class in &projection.classes {
        let label = format!("{} vs {}", projection.baseline.label, class.class.label);
        for series in class.chart_series() {
            let (name, start, end, break_even) = match series {
                ChartSeries::Band { worst, best } => (
                    String::from("Band"),
                    format!("{} … {}", currency.format(worst[0]), currency.format(best[0])),
                    format!(
                        "{} … {}",
                        currency.format(worst.last_value()),
                        currency.format(best.last_value()),
                    ),
                    None,
                ),
                ChartSeries::Central { series, break_even } => (
                    String::from("Central"),
                    currency.format(series[0]),
                    currency.format(series.last_value()),
                    break_even,
                ),
                ChartSeries::FuelBracket { variation, direction, series, break_even } => (
                    format!("Fuel {direction}{variation}"),
                    currency.format(series[0]),
                    currency.format(series.last_value()),
                    break_even,
                ),
            };
            table.add_row(vec![
                Cell::new(&label),
                Cell::new(name),
                Cell::new(start).set_alignment(CellAlignment::Right),
                Cell::new(end).set_alignment(CellAlignment::Right),
                marker_cell(break_even),
            ]);
        }
    }
    table
}

/// Detail panel values for the crosshair position.
pub fn build_readings_table(
    projection: &Projection,
    point: Option<QueryPoint>,
    readings: &[Reading<'_>],
    currency: Currency,
) -> Table {
    let horizon = projection.horizon();
    let variation: Option<Percentage> = projection
        .classes
        .iter()
        .find_map(|class| class.fuel_brackets.as_ref().map(|brackets| brackets.variation));

    let mut header = vec![
        String::from("Class"),
        match point {
            Some(point) => format!("At {}", point.month),
            None => format!("At {horizon}"),
        },
        String::from("Annual savings"),
        String::from("Break-even"),
        String::from("RRC"),
    ];
    if let Some(variation) = variation {
        header.push(format!("Fuel {}{variation}", Direction::High));
        header.push(format!("Fuel {}{variation}", Direction::Low));
    }

    let mut table = new_table();
    table.set_header(header);
    for reading in readings {
        let upfront_delta = projection
            .get(&reading.class.label)
            .map_or(Cost::ZERO, |class| class.upfront_delta);
        let mut label = Cell::new(&reading.class.label);
        if reading.in_band {
            label = label.add_attribute(Attribute::Bold).fg(Color::Cyan);
        }
        let mut row = vec![
            label,
            cost_cell(reading.cumulative, currency),
            cost_cell(reading.annual_savings, currency),
            break_even_cell(reading.break_even, upfront_delta, horizon),
            Cell::new(reading.implied_rrc).set_alignment(CellAlignment::Right),
        ];
        if let Some(brackets) = reading.fuel_brackets {
            row.push(cost_cell(brackets.high, currency));
            row.push(cost_cell(brackets.low, currency));
        }
        table.add_row(row);
    }
    table
}

pub fn build_label_set_table(label_set: &LabelSet) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Class", "Min", "Midpoint", "Max"]);
    for class in &label_set.classes {
        table.add_row(vec![
            Cell::new(&class.label).add_attribute(Attribute::Bold),
            Cell::new(class.min).set_alignment(CellAlignment::Right),
            Cell::new(class.midpoint).set_alignment(CellAlignment::Right),
            Cell::new(class.max).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use rrc_savings::{label::LabelSets, state::AppState};

    use super::*;

    fn projection(state: &AppState) -> Projection {
        state.project(&LabelSets::default()).into_projection().unwrap()
    }

    #[test]
    fn test_summary_table() {
        let mut state = AppState::default();
        state.tire_prices.insert("C", Cost(900.0));
        let table = build_summary_table(&projection(&state), state.currency).to_string();
        assert!(table.contains("Over 5 yr"));
        assert!(table.contains("900.00 zł"));
    }

    #[test]
    fn test_chart_table_lists_brackets() {
        let mut state = AppState::default();
        state.usage.fuel_price_variation = Percentage(10.0);
        let table = build_chart_table(&projection(&state), Currency::Eur).to_string();
        assert!(table.contains("Band"));
        assert!(table.contains("Central"));
        assert!(table.contains("Fuel +10 %"));
        assert!(table.contains("Fuel −10 %"));
    }

    #[test]
    fn test_readings_table() {
        let state = AppState::default();
        let projection = projection(&state);
        let readings = projection.query(None);
        let table = build_readings_table(&projection, None, &readings, state.currency).to_string();
        assert!(table.contains("At 60.0 mo"));
        assert!(table.contains('E'));
    }
}
