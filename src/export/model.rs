// src/export/model.rs

use crate::core::calculator::EntryTotals;
use crate::core::report::GeneralReport;
use crate::models::settings::SummaryCategory;
use crate::models::totals::QtdValor;
use rust_decimal::Decimal;

/// Label of the closing row that carries the range totals.
pub(crate) const TOTAL_ROW_LABEL: &str = "TOTAL";

/// Column headers shared by CSV and XLSX: the date, a quantity/value pair
/// per summary category, then internal consumption and the grand totals.
pub(crate) fn get_headers() -> Vec<String> {
    let mut headers = vec!["date".to_string()];
    for category in SummaryCategory::ALL {
        headers.push(format!("{category}_qtd"));
        headers.push(format!("{category}_valor"));
    }
    headers.extend(
        [
            "consumoInterno_qtd",
            "consumoInterno_valor",
            "ciAdjustment",
            "grandTotalSemCI_qtd",
            "grandTotalSemCI_valor",
            "grandTotalComCI_qtd",
            "grandTotalComCI_valor",
        ]
        .map(String::from),
    );
    headers
}

fn money(v: Decimal) -> String {
    format!("{:.2}", v.round_dp(2))
}

fn push_pair(row: &mut Vec<String>, qv: QtdValor) {
    row.push(qv.qtd.to_string());
    row.push(money(qv.valor));
}

fn day_to_row(day: &EntryTotals) -> Vec<String> {
    let mut row = vec![day.date.clone()];
    for category in SummaryCategory::ALL {
        push_pair(&mut row, day.category(category));
    }
    push_pair(&mut row, day.consumo_interno.total);
    row.push(money(day.consumo_interno.adjustment));
    push_pair(&mut row, day.grand_total_sem_ci);
    push_pair(&mut row, day.grand_total_com_ci);
    row
}

/// One row per day, in date order, followed by the totals row.
pub(crate) fn report_to_table(report: &GeneralReport) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = report.daily_breakdown.iter().map(day_to_row).collect();

    let summary = &report.summary;
    let mut total = vec![TOTAL_ROW_LABEL.to_string()];
    for category in SummaryCategory::ALL {
        push_pair(
            &mut total,
            summary
                .period_totals
                .get(&category)
                .copied()
                .unwrap_or_default(),
        );
    }
    push_pair(&mut total, summary.consumo_interno.total);
    total.push(money(summary.consumo_interno.adjustment));
    push_pair(&mut total, summary.grand_total_sem_ci);
    push_pair(&mut total, summary.grand_total_com_ci);
    rows.push(total);

    rows
}
