//! Plain tabular views of a solution in engineering units.

use hl_solver::SteadySolution;
use uom::si::pressure::bar;
use uom::si::volume_rate::liter_per_second;

use crate::model::HydraulicModel;

/// One named value in a result table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: String,
    pub value: f64,
}

/// Branch flows in l/s, in branch input order.
pub fn branch_flows_lps(model: &HydraulicModel, solution: &SteadySolution) -> Vec<Row> {
    model
        .branches
        .iter()
        .enumerate()
        .filter_map(|(j, b)| {
            solution.flow_rate(j).map(|q| Row {
                name: b.name.clone(),
                value: q.get::<liter_per_second>(),
            })
        })
        .collect()
}

/// Node pressures in barg (`p / 1e5`), in node input order.
pub fn node_pressures_barg(model: &HydraulicModel, solution: &SteadySolution) -> Vec<Row> {
    model
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(i, n)| {
            solution.pressure(i).map(|p| Row {
                name: n.name.clone(),
                value: p.get::<bar>(),
            })
        })
        .collect()
}

/// Fixed-width two-column table.
pub fn format_table(title: &str, unit: &str, rows: &[Row]) -> String {
    let width = rows
        .iter()
        .map(|r| r.name.len())
        .chain([title.len()])
        .max()
        .unwrap_or(0);
    let value_width = unit.len().max(12);
    let mut out = format!("{title:<width$}  {unit:>value_width$}\n");
    out.push_str(&format!("{}\n", "-".repeat(width + 2 + value_width)));
    for row in rows {
        out.push_str(&format!(
            "{:<width$}  {:>value_width$.4}\n",
            row.name, row.value
        ));
    }
    out
}
