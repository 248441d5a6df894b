// Tags from `u8::MAX` down to `u8::MAX - 4` are reserved by CIS-2.

/// Tag for the Custom Status Update event.
pub const STATUS_UPDATE_TAG: u8 = u8::MAX - 5;

/// Tag for the Custom Supplier Update event.
pub const SUPPLIER_UPDATE_TAG: u8 = u8::MAX - 6;
