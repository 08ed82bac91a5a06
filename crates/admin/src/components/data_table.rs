//! Order table column definitions.
//!
//! The on-screen order table and the CSV export share one column set; each
//! column says whether it is displayed, exported, or both.

use tienda_core::Order;

/// Column of the order table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    Id,
    Customer,
    Email,
    Phone,
    Products,
    Total,
    Date,
    Status,
    Actions,
}

impl OrderColumn {
    /// All columns in display order.
    pub const ALL: [Self; 9] = [
        Self::Id,
        Self::Customer,
        Self::Email,
        Self::Phone,
        Self::Products,
        Self::Total,
        Self::Date,
        Self::Status,
        Self::Actions,
    ];

    /// Header label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Customer => "Cliente",
            Self::Email => "Email",
            Self::Phone => "Teléfono",
            Self::Products => "Productos",
            Self::Total => "Total",
            Self::Date => "Fecha",
            Self::Status => "Estado",
            Self::Actions => "Acciones",
        }
    }

    /// Whether the column is shown in the order table.
    #[must_use]
    pub const fn displayed(self) -> bool {
        !matches!(self, Self::Email | Self::Phone)
    }

    /// Whether the column is written to the CSV export.
    #[must_use]
    pub const fn exported(self) -> bool {
        !matches!(self, Self::Actions)
    }

    /// Plain-text cell value, `None` for the button column.
    #[must_use]
    pub fn value(self, order: &Order) -> Option<String> {
        let value = match self {
            Self::Id => order.id.to_string(),
            Self::Customer => order.customer.name.clone(),
            Self::Email => order.customer.email.clone(),
            Self::Phone => order.customer.phone.clone(),
            Self::Products => order.item_count_label(),
            Self::Total => order.total.to_string(),
            Self::Date => order.date.clone(),
            Self::Status => order.status.label().to_string(),
            Self::Actions => return None,
        };
        Some(value)
    }

    /// Columns shown in the order table.
    pub fn displayed_columns() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|column| column.displayed())
    }

    /// Columns written to the CSV export.
    pub fn exported_columns() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|column| column.exported())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displayed_columns() {
        assert_eq!(OrderColumn::displayed_columns().count(), 7);
        assert!(OrderColumn::displayed_columns().all(|c| c != OrderColumn::Email));
    }

    #[test]
    fn test_exported_header() {
        let header: Vec<_> = OrderColumn::exported_columns()
            .map(OrderColumn::label)
            .collect();
        assert_eq!(
            header.join(","),
            "ID,Cliente,Email,Teléfono,Productos,Total,Fecha,Estado"
        );
    }
}
