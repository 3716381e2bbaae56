use crate::error::Result;
use crate::export::CSV_HEADERS;
use crate::model::AnalysisReport;
use rust_xlsxwriter::{
    ConditionalFormat3ColorScale, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use std::path::Path;

/// Write an analysis report to an Excel file
pub fn write_report_to_xlsx(report: &AnalysisReport, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    write_usage_sheet(worksheet, report)?;

    let worksheet = workbook.add_worksheet();
    write_auto_decklist_sheet(worksheet, report)?;

    workbook.save(path)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

/// Card usage: one row per (card, quantity)
fn write_usage_sheet(sheet: &mut Worksheet, report: &AnalysisReport) -> Result<()> {
    sheet.set_name("Card Usage")?;

    sheet.set_column_width(0, 14)?; // Category
    sheet.set_column_width(1, 24)?; // Card
    sheet.set_column_width(2, 30)?; // Display Name
    sheet.set_column_width(3, 9)?;  // Quantity
    sheet.set_column_width(4, 8)?;  // Count
    sheet.set_column_width(5, 11)?; // Percentage
    sheet.set_column_width(6, 12)?; // Tournaments
    sheet.set_column_width(7, 30)?; // Href

    let header_format = header_format();
    for (col, header) in CSV_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let center_format = Format::new().set_align(FormatAlign::Center);
    let percent_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_num_format("0.0");

    let mut row = 1u32;
    for (category, rows) in &report.by_category {
        for card in rows {
            sheet.write_string(row, 0, category)?;
            sheet.write_string(row, 1, &card.card_name)?;
            sheet.write_string(row, 2, &card.display_name)?;
            sheet.write_number_with_format(row, 3, card.quantity as f64, &center_format)?;
            sheet.write_number_with_format(row, 4, card.count as f64, &center_format)?;
            sheet.write_number_with_format(row, 5, card.percentage, &percent_format)?;
            sheet.write_number_with_format(
                row,
                6,
                report.tournaments_for(&card.card_name) as f64,
                &center_format,
            )?;
            if let Some(href) = &card.href {
                sheet.write_string(row, 7, href)?;
            }
            row += 1;
        }
    }

    if row > 1 {
        let last_row = row - 1;
        let presence_scale = ConditionalFormat3ColorScale::new()
            .set_minimum_color("F8696B") // Red
            .set_midpoint_color("FFEB84") // Yellow
            .set_maximum_color("63BE7B"); // Green

        sheet.add_conditional_format(1, 5, last_row, 5, &presence_scale)?;
    }

    Ok(())
}

/// The inferred decklist, category by category
fn write_auto_decklist_sheet(sheet: &mut Worksheet, report: &AnalysisReport) -> Result<()> {
    sheet.set_name("Auto Decklist")?;

    sheet.set_column_width(0, 14)?; // Category
    sheet.set_column_width(1, 9)?;  // Quantity
    sheet.set_column_width(2, 30)?; // Card
    sheet.set_column_width(3, 11)?; // Percentage

    let header_format = header_format();
    let headers = ["Category", "Quantity", "Card", "Percentage"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let center_format = Format::new().set_align(FormatAlign::Center);
    let percent_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_num_format("0");

    let mut row = 1u32;
    for (category, cards) in &report.auto_decklist {
        for card in cards {
            sheet.write_string(row, 0, category)?;
            sheet.write_number_with_format(row, 1, card.quantity as f64, &center_format)?;
            sheet.write_string(row, 2, &card.display_name)?;
            sheet.write_number_with_format(row, 3, card.percentage, &percent_format)?;
            row += 1;
        }
    }

    let bold = Format::new().set_bold();
    sheet.write_string_with_format(row, 0, "Total", &bold)?;
    sheet.write_number_with_format(row, 1, report.auto_decklist_size() as f64, &bold)?;

    Ok(())
}
