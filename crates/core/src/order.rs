//! Customer details, orders and the order log.
//!
//! An [`Order`] is created once at checkout confirmation and afterwards only
//! its [`OrderStatus`] may change. The persisted field names follow the
//! catalog page's camelCase JSON (`customerName`, `customerEmail`, ...).

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::pricing::Totals;
use crate::types::{OrderId, OrderStatus, Price};

/// Errors that block checkout confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("the cart is empty")]
    EmptyCart,
    /// A required customer field is blank.
    #[error("required field is blank: {0}")]
    MissingField(CustomerField),
}

/// Errors from order log lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order {0} not found")]
    NotFound(OrderId),
}

/// The four checkout form fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Name,
    Email,
    Phone,
    Address,
}

impl CustomerField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Address];

    /// Element id of the matching checkout input.
    #[must_use]
    pub const fn input_id(&self) -> &'static str {
        match self {
            Self::Name => "customer-name",
            Self::Email => "customer-email",
            Self::Phone => "customer-phone",
            Self::Address => "customer-address",
        }
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input_id())
    }
}

/// Customer details captured by the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(rename = "customerName")]
    pub name: String,
    #[serde(rename = "customerEmail")]
    pub email: String,
    #[serde(rename = "customerPhone")]
    pub phone: String,
    #[serde(rename = "customerAddress")]
    pub address: String,
}

impl CustomerInfo {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    #[must_use]
    pub fn field(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::Name => &self.name,
            CustomerField::Email => &self.email,
            CustomerField::Phone => &self.phone,
            CustomerField::Address => &self.address,
        }
    }

    /// Presence check only: every field must contain a non-blank value.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] naming the first blank field.
    pub fn require_all(&self) -> Result<(), CheckoutError> {
        CustomerField::ALL
            .into_iter()
            .find(|field| self.field(*field).trim().is_empty())
            .map_or(Ok(()), |field| Err(CheckoutError::MissingField(field)))
    }
}

/// A confirmed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(flatten)]
    pub customer: CustomerInfo,
    pub items: Vec<CartItem>,
    pub date: String,
    pub status: OrderStatus,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl Order {
    /// Sum of item quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Item count as shown in tables and exports, e.g. `3 producto(s)`.
    #[must_use]
    pub fn item_count_label(&self) -> String {
        format!("{} producto(s)", self.item_count())
    }
}

/// Short `es-MX` date: day/month/year without zero padding.
#[must_use]
pub fn es_mx_date(date: impl Datelike) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Ordered log of confirmed orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderLog {
    orders: Vec<Order>,
}

impl OrderLog {
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Confirm a new order and append it to the log.
    ///
    /// The id is the confirmation timestamp in milliseconds, bumped past the
    /// newest existing id if two orders land in the same millisecond.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when `items` is empty and
    /// [`CheckoutError::MissingField`] when a customer field is blank.
    pub fn place<Tz: TimeZone>(
        &mut self,
        items: Vec<CartItem>,
        customer: CustomerInfo,
        totals: Totals,
        now: &DateTime<Tz>,
    ) -> Result<Order, CheckoutError> {
        customer.require_all()?;
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order = Order {
            id: self.next_id(now.timestamp_millis()),
            customer,
            items,
            date: es_mx_date(now.date_naive()),
            status: OrderStatus::Pending,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
        };
        self.orders.push(order.clone());
        Ok(order)
    }

    #[must_use]
    pub fn find(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Change an order's status.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for an unknown id.
    pub fn set_status(&mut self, id: OrderId, status: OrderStatus) -> Result<(), OrderError> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(OrderError::NotFound(id))?;
        order.status = status;
        Ok(())
    }

    /// Remove an order, leaving the others in place and in order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: OrderId) -> Result<Order, OrderError> {
        let index = self
            .orders
            .iter()
            .position(|order| order.id == id)
            .ok_or(OrderError::NotFound(id))?;
        Ok(self.orders.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn next_id(&self, timestamp_millis: i64) -> OrderId {
        let newest = self.orders.iter().map(|order| order.id.as_i64()).max();
        match newest {
            Some(newest) if timestamp_millis <= newest => OrderId::new(newest + 1),
            _ => OrderId::new(timestamp_millis),
        }
    }
}

impl<'a> IntoIterator for &'a OrderLog {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}
