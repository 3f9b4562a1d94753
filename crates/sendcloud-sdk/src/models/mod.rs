//! Domain entities mapped from Sendcloud API and webhook data.
//!
//! Every entity is constructed through a `from_json` mapper that applies the
//! unit conversions in [`crate::units`]: weights become grams and prices
//! become cents.
//!
//! The mapped entities implement `Serialize` but not `Deserialize`, so vendor
//! data cannot bypass the mappers' validation:
//!
//! ```compile_fail
//! use sendcloud_sdk::models::Address;
//!
//! let address: Address = serde_json::from_str(r#"{"company_name": ""}"#).unwrap();
//! ```

mod address;
mod parcel;
mod parcel_item;
mod sender_address;
mod service_point;
mod shipping_method;

pub use address::Address;
pub use parcel::{CustomsShipmentType, Dimensions, LabelFormat, Parcel, ParcelStatus};
pub use parcel_item::ParcelItem;
pub use sender_address::SenderAddress;
pub use service_point::{ServicePoint, ServicePointQuery};
pub use shipping_method::ShippingMethod;
