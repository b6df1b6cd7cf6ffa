//! Plain-text tables for the terminal.

use fashion_recommend::RecommendationResponse;
use std::fmt::Write;

pub fn response(response: &RecommendationResponse) -> String {
    let mut out = String::new();

    out.push_str("Recommended Products:\n");
    if response.products.is_empty() {
        out.push_str("(no matching products)\n");
    } else {
        let rows = response
            .products
            .iter()
            .map(|p| {
                vec![
                    p.product_id.clone(),
                    p.product_name.clone(),
                    p.category.clone(),
                    p.brand.clone(),
                    p.color.clone(),
                ]
            })
            .collect::<Vec<_>>();
        out.push_str(&table(
            &["Product ID", "Product Name", "Category", "Brand", "Color"],
            &rows,
        ));
    }

    out.push_str("\nUser History:\n");
    if response.history.is_empty() {
        out.push_str("(no history)\n");
    } else {
        let rows = response
            .history
            .iter()
            .map(|h| {
                vec![
                    h.product_name.clone(),
                    h.category.clone(),
                    h.brand.clone(),
                    h.color.clone(),
                ]
            })
            .collect::<Vec<_>>();
        out.push_str(&table(&["Product Name", "Category", "Brand", "Color"], &rows));
    }

    out
}

pub fn options(names: &[String], categories: &[String]) -> String {
    let mut out = String::new();
    out.push_str("Product Names:\n");
    for name in names {
        let _ = writeln!(out, "  {}", name);
    }
    out.push_str("Categories:\n");
    for category in categories {
        let _ = writeln!(out, "  {}", category);
    }
    out
}

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", line.trim_end());
}
