//! CSV export of the order log.
//!
//! The document has a bare header line and one line per order with every
//! field double-quoted. Lines end in `\n`.

use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;
use chrono::{DateTime, NaiveDate, Utc};
use tienda_core::{Notice, OrderLog, Update};
use tracing::instrument;

use super::fragment;
use crate::bindings;
use crate::components::OrderColumn;
use crate::error::{AdminError, Result};
use crate::state::AdminState;

/// A written export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub path: PathBuf,
    pub filename: String,
    /// Order rows, header excluded
    pub rows: usize,
}

/// Link to the written file.
#[derive(Template)]
#[template(path = "partials/download_link.html")]
pub struct DownloadLinkTemplate<'a> {
    pub href: &'a str,
    pub filename: &'a str,
}

/// Build the CSV document for `orders`.
#[must_use]
pub fn orders_csv(orders: &OrderLog) -> String {
    let header: Vec<&str> = OrderColumn::exported_columns()
        .map(OrderColumn::label)
        .collect();
    let mut csv = header.join(",");
    csv.push('\n');

    for order in orders {
        let fields: Vec<String> = OrderColumn::exported_columns()
            .filter_map(|column| column.value(order))
            .map(|value| quote(&value))
            .collect();
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }
    csv
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Export file name for a date, e.g. `pedidos_2026-10-16.csv`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("pedidos_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the CSV document into `dir`, named after the UTC date of `now`.
///
/// # Errors
///
/// Returns [`AdminError::NothingToExport`] for an empty log, or
/// [`AdminError::Export`] if the file cannot be written.
pub fn write_export(dir: &Path, orders: &OrderLog, now: DateTime<Utc>) -> Result<Export> {
    if orders.is_empty() {
        return Err(AdminError::NothingToExport);
    }

    let filename = export_filename(now.date_naive());
    let path = dir.join(&filename);
    fs::write(&path, orders_csv(orders)).map_err(|source| AdminError::Export {
        path: path.clone(),
        source,
    })?;

    Ok(Export {
        path,
        filename,
        rows: orders.len(),
    })
}

/// Export button handler.
///
/// # Errors
///
/// Returns [`AdminError::NothingToExport`] for an empty log, or a write or
/// render error.
#[instrument(skip(admin, orders))]
pub fn export(admin: &AdminState, orders: &OrderLog, now: DateTime<Utc>) -> Result<Update> {
    let export = write_export(&admin.config().export_dir, orders, now)?;
    tracing::info!(
        path = %export.path.display(),
        rows = export.rows,
        "Orders exported"
    );

    let href = export.path.display().to_string();
    let link = fragment(
        bindings::EXPORT_DOWNLOAD,
        &DownloadLinkTemplate {
            href: &href,
            filename: &export.filename,
        },
    )?;
    Ok(Update::new()
        .with_fragment(link)
        .with_notice(Notice::success("Pedidos exportados correctamente")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use tienda_core::{Cart, CartItem, CustomerInfo, OrderStatus, Price, ShippingPolicy};

    use super::*;
    use crate::config::AdminConfig;

    fn log_with(customers: &[&str]) -> OrderLog {
        let mut log = OrderLog::new();
        for (n, name) in customers.iter().enumerate() {
            let mut cart = Cart::default();
            cart.add(CartItem::new("te", "Té", Price::from_units(1000), "te.jpg"));
            cart.add(CartItem::new("te", "Té", Price::from_units(1000), "te.jpg"));
            cart.add(CartItem::new("miel", "Miel", "12.50".parse::<Price>().unwrap(), "miel.jpg"));
            let totals = ShippingPolicy::default().quote(&cart);
            let now = Utc
                .with_ymd_and_hms(2026, 3, 9, 10, 0, u32::try_from(n).unwrap())
                .unwrap();
            log.place(
                cart.snapshot(),
                CustomerInfo::new(*name, "c@example.com", "5555-1234", "Antigua"),
                totals,
                &now,
            )
            .unwrap();
        }
        log
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tienda-export-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_csv_layout() {
        let mut log = log_with(&["Ana"]);
        let id = log.iter().next().unwrap().id;
        log.set_status(id, OrderStatus::Completed).unwrap();

        let csv = orders_csv(&log);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "ID,Cliente,Email,Teléfono,Productos,Total,Fecha,Estado"
        );
        assert_eq!(
            lines[1],
            format!(
                "\"{id}\",\"Ana\",\"c@example.com\",\"5555-1234\",\"3 producto(s)\",\"$2012.50\",\"9/3/2026\",\"Completado\""
            )
        );
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_csv_doubles_embedded_quotes() {
        let csv = orders_csv(&log_with(&["Ana \"La Chapina\" López"]));
        assert!(csv.contains("\"Ana \"\"La Chapina\"\" López\""));
    }

    #[test]
    fn test_export_filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
        assert_eq!(export_filename(date), "pedidos_2026-10-06.csv");
    }

    #[test]
    fn test_write_export_one_row_per_order() {
        let dir = temp_dir();
        let log = log_with(&["Ana", "Beto", "Carla"]);
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 23, 30, 0).unwrap();

        let export = write_export(&dir, &log, now).unwrap();

        assert_eq!(export.filename, "pedidos_2026-10-16.csv");
        assert_eq!(export.rows, 3);
        let written = fs::read_to_string(&export.path).unwrap();
        assert_eq!(written.lines().count(), log.len() + 1);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_export_empty_log_writes_nothing() {
        let dir = temp_dir();
        let admin = AdminState::new(AdminConfig {
            export_dir: dir.clone(),
            ..AdminConfig::default()
        });

        let err = export(&admin, &OrderLog::new(), Utc::now()).unwrap_err();

        assert!(matches!(err, AdminError::NothingToExport));
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_export_notice_and_link() {
        let dir = temp_dir();
        let admin = AdminState::new(AdminConfig {
            export_dir: dir.clone(),
            ..AdminConfig::default()
        });
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

        let update = export(&admin, &log_with(&["Ana"]), now).unwrap();

        assert_eq!(
            update.notice.as_ref().unwrap().message,
            "Pedidos exportados correctamente"
        );
        let link = &update.fragment("export-download").unwrap().html;
        assert!(link.contains("download=\"pedidos_2026-10-16.csv\""));
        fs::remove_dir_all(dir).unwrap();
    }
}
