//! Element ids and classes the admin panel binds to.

pub const ORDERS_LIST: &str = "orders-list";
pub const EXPORT_ORDERS: &str = "export-orders";
pub const EXPORT_DOWNLOAD: &str = "export-download";
pub const ADMIN_TABS: &str = "admin-tabs";
pub const DETAILS_MODAL: &str = "details-modal";
pub const CLOSE_DETAILS: &str = "close-details";
pub const CLOSE_DETAILS_MODAL: &str = "close-details-modal";
pub const ORDER_STATUS: &str = "order-status";
pub const NOTIFICATION: &str = "notification";

pub const TAB_BTN_CLASS: &str = "tab-btn";
pub const VIEW_BTN_CLASS: &str = "view-btn";
pub const DELETE_BTN_CLASS: &str = "delete-btn";
